//! Route pattern compilation and matching.
//!
//! # Responsibilities
//! - Tokenize declarative path patterns (`/products/:id`) into segments
//! - Match concrete URLs against a compiled pattern
//! - Extract named parameter values and the raw trailing query string
//!
//! # Design Decisions
//! - Segment tokenizer instead of regex (no dialect to depend on)
//! - Matching is anchored at both the start and the end of the path
//! - Parameter values accept `[a-z0-9-_]+` only
//! - Duplicate parameter names are a compile error, not a silent overwrite

use std::collections::HashMap;
use thiserror::Error;

/// Error raised while compiling a route pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// A `:name` segment with an empty or non-alphabetic name.
    #[error("invalid parameter segment `{0}`: names must be one or more ASCII letters")]
    InvalidParam(String),

    /// The same parameter name appeared twice in one pattern.
    #[error("duplicate parameter name `{0}`")]
    DuplicateParam(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// A compiled route pattern.
///
/// Compiled once at table construction and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
}

/// Successful match of a URL against a [`RoutePattern`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMatch {
    /// Extracted parameter values, keyed by the `:name` in the pattern.
    pub params: HashMap<String, String>,

    /// Raw trailing query string including its leading `?`, if present.
    pub query: Option<String>,
}

impl RoutePattern {
    /// Compile a declarative path pattern.
    ///
    /// Each `/`-separated segment of the form `:name` becomes a named
    /// capture; every other segment must match literally.
    pub fn compile(pattern: &str) -> Result<Self, PatternError> {
        let mut segments = Vec::new();
        for part in pattern.split('/') {
            match part.strip_prefix(':') {
                Some(name) => {
                    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphabetic()) {
                        return Err(PatternError::InvalidParam(part.to_string()));
                    }
                    let duplicate = segments
                        .iter()
                        .any(|s| matches!(s, Segment::Param(existing) if existing == name));
                    if duplicate {
                        return Err(PatternError::DuplicateParam(name.to_string()));
                    }
                    segments.push(Segment::Param(name.to_string()));
                }
                None => segments.push(Segment::Literal(part.to_string())),
            }
        }
        Ok(Self {
            raw: pattern.to_string(),
            segments,
        })
    }

    /// Match a concrete URL (path plus optional `?query`) against this
    /// pattern. Returns `None` unless the whole path matches.
    pub fn match_url(&self, url: &str) -> Option<PathMatch> {
        let (path, query) = match url.find('?') {
            Some(at) => (&url[..at], Some(url[at..].to_string())),
            None => (url, None),
        };

        let parts: Vec<&str> = path.split('/').collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = HashMap::new();
        for (segment, part) in self.segments.iter().zip(&parts) {
            match segment {
                Segment::Literal(literal) => {
                    if literal != part {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if part.is_empty() || !part.chars().all(is_param_char) {
                        return None;
                    }
                    params.insert(name.clone(), part.to_string());
                }
            }
        }

        Some(PathMatch { params, query })
    }

    /// The pattern as originally written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

fn is_param_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_'
}
