//! Flat-file document store subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     data file (JSON) → db.rs (load, fail-safe to empty)
//!
//! Per mutation:
//!     insert/update/delete
//!     → in-memory table change (under the store mutex)
//!     → persist.rs (whole-snapshot write, temp → rename)
//! ```
//!
//! # Design Decisions
//! - One mutex serializes every mutation together with its persist step
//! - Persist is whole-snapshot and atomic; no partial writes on disk
//! - Missing or corrupt data file resets to an empty store (logged)
//! - Absent tables read as empty sequences, never as errors

pub mod db;
pub mod persist;

pub use db::{Document, Store, StoreError};
