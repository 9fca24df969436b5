//! Application layer: the public subscribe/dispatch surface.

pub mod dispatch;
