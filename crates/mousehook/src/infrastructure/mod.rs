//! Infrastructure layer: hook backends that own OS resources.

pub mod hook;
