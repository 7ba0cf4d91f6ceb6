//! Tinylink - a tiny URL shortener with expiring links
//!
//! Accepts a long URL, hands back an opaque short code, and redirects
//! requests carrying that code until the link expires.
//!
//! # Architecture
//! - `store`: Expiring key-value store (moka or DashMap backend)
//! - `services`: Link creation / resolution on top of the store
//! - `api`: HTTP handlers and middleware
//! - `config`: Static configuration (TOML + environment)
//! - `runtime`: Server startup and graceful shutdown
//! - `system`: Logging initialization
//! - `utils`: Short code generation and URL validation

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod services;
pub mod store;
pub mod system;
pub mod utils;
