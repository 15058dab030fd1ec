//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via the tracing crate
//! - Request ID flows through all subsystems
//! - Log level configurable via environment (RUST_LOG)

pub mod logging;
