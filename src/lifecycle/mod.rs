//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     Load config → Validate → Open store → Bind listener → Serve
//!
//! Shutdown:
//!     Signal received (Ctrl+C or broadcast) → Stop accepting → Drain → Exit
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then store, then listener
//! - Fail fast: any startup error is fatal

pub mod shutdown;

pub use shutdown::Shutdown;
