//! Route table and request dispatch.
//!
//! # Responsibilities
//! - Hold compiled routes in declaration order
//! - Scan linearly per request; first method+pattern match wins
//! - Build the handler's RequestContext (params, query, body, store)
//! - Fall back to 404 when nothing matches
//!
//! # Design Decisions
//! - Declaration order is significant for overlapping patterns
//! - Handlers are plain functions; they write exactly one response
//! - The store handle is injected per dispatch, not a global

use std::collections::HashMap;
use std::sync::Arc;

use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::Value;

use crate::routing::pattern::{PatternError, RoutePattern};
use crate::routing::query;
use crate::store::Store;

/// Everything a handler gets to see about a matched request.
pub struct RequestContext {
    /// Named parameter values extracted from the path.
    pub params: HashMap<String, String>,

    /// Decoded query-string parameters (empty when no query was sent).
    pub query: HashMap<String, String>,

    /// Decoded JSON request body; `None` for absent or malformed bodies.
    pub body: Option<Value>,

    /// Handle to the document store.
    pub store: Arc<Store>,
}

/// A route handler: reads the context, performs store operations, and
/// produces the terminal response.
pub type Handler = fn(RequestContext) -> Response;

struct Route {
    method: Method,
    pattern: RoutePattern,
    handler: Handler,
}

/// Ordered list of (method, compiled pattern, handler) entries.
#[derive(Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a route. Declaration order is preserved.
    pub fn route(
        mut self,
        method: Method,
        pattern: &str,
        handler: Handler,
    ) -> Result<Self, PatternError> {
        let pattern = RoutePattern::compile(pattern)?;
        self.routes.push(Route {
            method,
            pattern,
            handler,
        });
        Ok(self)
    }

    /// Match `method` + `url` against the table and invoke the winning
    /// handler, or answer 404 when no entry matches.
    pub fn dispatch(
        &self,
        method: &Method,
        url: &str,
        body: Option<Value>,
        store: &Arc<Store>,
    ) -> Response {
        let matched = self.routes.iter().find_map(|route| {
            if route.method != *method {
                return None;
            }
            route.pattern.match_url(url).map(|m| (route, m))
        });

        let Some((route, path_match)) = matched else {
            tracing::debug!(method = %method, url = %url, "No route matched");
            return (StatusCode::NOT_FOUND, "Route not found").into_response();
        };

        tracing::debug!(
            method = %method,
            pattern = %route.pattern.as_str(),
            "Route matched"
        );

        let query = path_match
            .query
            .as_deref()
            .map(query::parse)
            .unwrap_or_default();

        (route.handler)(RequestContext {
            params: path_match.params,
            query,
            body,
            store: store.clone(),
        })
    }

    /// Number of registered routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
