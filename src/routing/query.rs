//! Query-string decoding.
//!
//! # Design Decisions
//! - No percent-decoding and no `+` handling; values pass through raw
//! - Duplicate keys: last occurrence wins
//! - A pair without `=` yields an empty-string value

use std::collections::HashMap;

/// Decode a raw query string (with or without its leading `?`) into a
/// flat key→value map. Empty input produces an empty map.
pub fn parse(raw: &str) -> HashMap<String, String> {
    let raw = raw.strip_prefix('?').unwrap_or(raw);

    let mut params = HashMap::new();
    for pair in raw.split('&') {
        if pair.is_empty() {
            continue;
        }
        match pair.split_once('=') {
            Some((key, value)) => params.insert(key.to_string(), value.to_string()),
            None => params.insert(pair.to_string(), String::new()),
        };
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pairs() {
        let params = parse("?name=Joao&age=30");
        assert_eq!(params.len(), 2);
        assert_eq!(params["name"], "Joao");
        assert_eq!(params["age"], "30");
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("").is_empty());
        assert!(parse("?").is_empty());
    }

    #[test]
    fn test_last_duplicate_wins() {
        let params = parse("?a=1&a=2");
        assert_eq!(params.len(), 1);
        assert_eq!(params["a"], "2");
    }

    #[test]
    fn test_pair_without_equals() {
        let params = parse("?flag&a=1");
        assert_eq!(params["flag"], "");
        assert_eq!(params["a"], "1");
    }

    #[test]
    fn test_value_split_on_first_equals_only() {
        let params = parse("?expr=a=b");
        assert_eq!(params["expr"], "a=b");
    }

    #[test]
    fn test_no_percent_decoding() {
        let params = parse("?name=Jo%C3%A3o+Silva");
        assert_eq!(params["name"], "Jo%C3%A3o+Silva");
    }

    #[test]
    fn test_empty_pairs_skipped() {
        let params = parse("?a=1&&b=2&");
        assert_eq!(params.len(), 2);
    }
}
