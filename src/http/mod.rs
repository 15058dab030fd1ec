//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, body decoding)
//!     → routing table (method + path match, parameter extraction)
//!     → products.rs (handler reads/writes the store)
//!     → Response to client
//! ```

pub mod products;
pub mod server;

pub use server::HttpServer;
