//! Structured logging
//!
//! This module wires up `env_logger` and holds the log helpers used
//! across analysis and delivery.

pub mod logging;
