//! Typed query-string builder used by list filters.

use std::fmt::Display;

/// Ordered list of query parameters.
///
/// Only defined, non-empty values are ever stored, so a filter with no
/// fields set produces an empty query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value; empty strings are skipped
    pub fn push(mut self, key: &str, value: impl Display) -> Self {
        let value = value.to_string();
        if !value.is_empty() {
            self.pairs.push((key.to_string(), value));
        }
        self
    }

    /// Append a value if it is set
    pub fn push_opt<V: Display>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.push(key, value),
            None => self,
        }
    }

    /// Drop every pair with this key
    pub fn without(mut self, key: &str) -> Self {
        self.pairs.retain(|(k, _)| k != key);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Form-urlencoded string without the leading `?`
    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }
}

/// Filter types that can be sent as a query string
pub trait ToQuery {
    fn to_query(&self) -> QueryParams;
}

impl ToQuery for QueryParams {
    fn to_query(&self) -> QueryParams {
        self.clone()
    }
}

/// Percent-encode `raw` for use as a single path segment
pub fn segment(raw: &str) -> String {
    // byte_serialize writes a literal '+' as %2B, so every '+' left is a space
    url::form_urlencoded::byte_serialize(raw.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skips_missing_and_empty_values() {
        let params = QueryParams::new()
            .push_opt("department", Some("Engineering"))
            .push_opt::<&str>("status", None)
            .push_opt("search", Some(""))
            .push("page", 2);

        assert_eq!(params.len(), 2);
        assert_eq!(params.get("department"), Some("Engineering"));
        assert_eq!(params.get("page"), Some("2"));
        assert!(params.get("status").is_none());
        assert!(params.get("search").is_none());
    }

    #[test]
    fn test_zero_is_still_sent() {
        let params = QueryParams::new().push_opt("page", Some(0u32));
        assert_eq!(params.to_query_string(), "page=0");
    }

    #[test]
    fn test_encodes_special_characters() {
        let params = QueryParams::new()
            .push("search", "Ada Lovelace & co")
            .push("sortBy", "lastName");
        assert_eq!(
            params.to_query_string(),
            "search=Ada+Lovelace+%26+co&sortBy=lastName"
        );
    }

    #[test]
    fn test_without_removes_key() {
        let params = QueryParams::new()
            .push("employeeId", "e-1")
            .push("status", "pending")
            .without("employeeId");
        assert_eq!(params.to_query_string(), "status=pending");
    }

    #[test]
    fn test_empty_params() {
        let params = QueryParams::new();
        assert!(params.is_empty());
        assert_eq!(params.to_query_string(), "");
    }

    #[test]
    fn test_segment_escapes_path_delimiters() {
        assert_eq!(segment("665f1c2a9b"), "665f1c2a9b");
        assert_eq!(segment("a/b?c#d"), "a%2Fb%3Fc%23d");
        assert_eq!(segment("a b+c"), "a%20b%2Bc");
    }
}
