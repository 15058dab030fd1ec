//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, url, decoded body)
//!     → table.rs (linear route scan, first match wins)
//!     → pattern.rs (segment matching, parameter extraction)
//!     → query.rs (query-string decoding)
//!     → Invoke handler with RequestContext, or 404 fallback
//!
//! Route Compilation (at startup):
//!     (method, "/products/:id", handler)
//!     → Tokenize pattern into literal and parameter segments
//!     → Reject invalid or duplicate parameter names
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Patterns compiled at startup, immutable at runtime
//! - No regex: explicit segment tokenizer, anchored at both ends
//! - Deterministic: declaration order decides overlapping patterns
//! - Explicit 404 fallback rather than silent default

pub mod pattern;
pub mod query;
pub mod table;

pub use pattern::{PathMatch, PatternError, RoutePattern};
pub use table::{Handler, RequestContext, RouteTable};
