//! Shared utilities for zero
//!
//! This crate provides common functionality used across the zero workspace,
//! currently logging setup and its configuration.

pub mod config;
pub mod logging;

pub use config::{LogFormat, LoggingConfig};
pub use logging::{init_tracing, init_tracing_with};
