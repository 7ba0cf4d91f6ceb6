//! Application lifecycle
//!
//! - `lifetime`: startup wiring and shutdown signal handling
//! - `modes`: execution modes (HTTP server)

pub mod lifetime;
pub mod modes;
