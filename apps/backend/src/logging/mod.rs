//! Logging helpers shared across layers.

pub mod pii;
pub mod security;
