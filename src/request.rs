//! Request context for pagination
//!
//! A paginator never reads ambient request state. The caller hands it a
//! [`PageRequest`] holding the request's base URI and its query string pairs,
//! either built by hand or extracted from a host framework request.

use crate::error::Result;
use url::{form_urlencoded, ParseError, Position, Url};

/// Base URI and query parameters of the request being paginated
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    /// URI without its query string (e.g. `/users` or `https://api.example.com/users`)
    pub base_uri: String,
    /// Decoded query pairs in their original order, duplicates kept
    pub query: Vec<(String, String)>,
}

impl PageRequest {
    /// Create a request context with no query parameters
    pub fn new(base_uri: impl Into<String>) -> Self {
        Self {
            base_uri: base_uri.into(),
            query: Vec::new(),
        }
    }

    /// Append a query parameter
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Split a request URI into base URI and query pairs
    ///
    /// Accepts absolute URLs (`https://host/path?a=1`) and origin-form
    /// paths (`/path?a=1`). Fragments are dropped. Only a malformed absolute
    /// URL is an error; query values are never inspected.
    pub fn from_uri(uri: &str) -> Result<Self> {
        match Url::parse(uri) {
            Ok(url) => {
                return Ok(Self {
                    base_uri: url[..Position::AfterPath].to_string(),
                    query: url.query_pairs().into_owned().collect(),
                });
            }
            Err(ParseError::RelativeUrlWithoutBase) => {}
            Err(e) => return Err(e.into()),
        }

        let without_fragment = uri.split('#').next().unwrap_or_default();
        let (base, query) = match without_fragment.split_once('?') {
            Some((base, query)) => (base, query),
            None => (without_fragment, ""),
        };

        Ok(Self {
            base_uri: base.to_string(),
            query: parse_query(query),
        })
    }

    /// First value for a query key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Page number carried by the request, if it is a positive integer
    ///
    /// Missing, non-numeric, and non-positive values all read as `None`.
    pub fn page_number(&self, page_name: &str) -> Option<u64> {
        let raw = self.get(page_name)?;
        let page = raw.trim().parse::<u64>().ok().filter(|page| *page >= 1);
        if page.is_none() {
            tracing::debug!("Ignoring unusable {page_name} value '{raw}'");
        }
        page
    }
}

/// Decode an `application/x-www-form-urlencoded` query string
pub(crate) fn parse_query(query: &str) -> Vec<(String, String)> {
    form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test]
    fn test_from_uri_path_only() {
        let request = PageRequest::from_uri("/users").unwrap();
        assert_eq!(request.base_uri, "/users");
        assert!(request.query.is_empty());
    }

    #[test]
    fn test_from_uri_path_with_query() {
        let request = PageRequest::from_uri("/users?sort=name&page=2&tag=a&tag=b").unwrap();
        assert_eq!(request.base_uri, "/users");
        assert_eq!(
            request.query,
            vec![
                ("sort".to_string(), "name".to_string()),
                ("page".to_string(), "2".to_string()),
                ("tag".to_string(), "a".to_string()),
                ("tag".to_string(), "b".to_string()),
            ]
        );
    }

    #[test]
    fn test_from_uri_decodes_values() {
        let request = PageRequest::from_uri("/search?q=hello+world&name=J%C3%BCrgen").unwrap();
        assert_eq!(request.get("q"), Some("hello world"));
        assert_eq!(request.get("name"), Some("Jürgen"));
    }

    #[test]
    fn test_from_uri_drops_fragment() {
        let request = PageRequest::from_uri("/users?page=4#top").unwrap();
        assert_eq!(request.base_uri, "/users");
        assert_eq!(request.get("page"), Some("4"));
    }

    #[test]
    fn test_from_uri_absolute() {
        let request = PageRequest::from_uri("https://api.example.com:8443/v1/users?page=3").unwrap();
        assert_eq!(request.base_uri, "https://api.example.com:8443/v1/users");
        assert_eq!(request.get("page"), Some("3"));
    }

    #[test_case("/login?next=https://example.com/home&page=2", "/login", "next", "https://example.com/home")]
    #[test_case("/cb?redirect_uri=http://localhost:3000/done", "/cb", "redirect_uri", "http://localhost:3000/done")]
    #[test_case("users?back=ftp://files.example.com", "users", "back", "ftp://files.example.com")]
    fn test_from_uri_query_contains_url(uri: &str, base: &str, key: &str, value: &str) {
        let request = PageRequest::from_uri(uri).unwrap();
        assert_eq!(request.base_uri, base);
        assert_eq!(request.get(key), Some(value));
    }

    #[test]
    fn test_from_uri_query_url_keeps_page() {
        let request = PageRequest::from_uri("/login?next=https://example.com/home&page=2").unwrap();
        assert_eq!(request.page_number("page"), Some(2));
    }

    #[test]
    fn test_from_uri_invalid_absolute() {
        assert!(PageRequest::from_uri("http://[::1/users").is_err());
    }

    #[test]
    fn test_get_returns_first_value() {
        let request = PageRequest::new("/x")
            .with_query("page", "2")
            .with_query("page", "9");
        assert_eq!(request.get("page"), Some("2"));
        assert_eq!(request.get("missing"), None);
    }

    #[test_case("3", Some(3) ; "plain number")]
    #[test_case(" 7 ", Some(7) ; "surrounding whitespace")]
    #[test_case("1", Some(1) ; "first page")]
    #[test_case("0", None ; "zero")]
    #[test_case("-2", None ; "negative")]
    #[test_case("two", None ; "not a number")]
    #[test_case("", None ; "empty")]
    #[test_case("2.5", None ; "fractional")]
    fn test_page_number(raw: &str, expected: Option<u64>) {
        let request = PageRequest::new("/items").with_query("page", raw);
        assert_eq!(request.page_number("page"), expected);
    }

    #[test]
    fn test_page_number_custom_name() {
        let request = PageRequest::new("/items").with_query("p", "5");
        assert_eq!(request.page_number("p"), Some(5));
        assert_eq!(request.page_number("page"), None);
    }
}
