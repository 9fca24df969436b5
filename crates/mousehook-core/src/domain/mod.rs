//! Decoded event types exposed to consumers.

pub mod event;
