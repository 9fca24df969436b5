//! Raw hook record handling: the fixed binary layout and its decoder.

pub mod layout;
