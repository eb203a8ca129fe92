//! # Observability Infrastructure
//!
//! Structured logging for the ingress xDS builders.

pub mod logging;

pub use logging::{init_logging, log_config_info};
