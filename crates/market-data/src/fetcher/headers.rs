//! HTTP headers for quote page requests

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use tracing::warn;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

/// Create headers for fetching a quote page as a browser would.
///
/// `user_agent` overrides the client-identifying header. A value that is not
/// a legal header value falls back to [`DEFAULT_USER_AGENT`].
pub fn document_headers(user_agent: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

    let agent = HeaderValue::from_str(user_agent).unwrap_or_else(|_| {
        warn!(
            "Invalid user agent '{}', falling back to '{}'",
            user_agent, DEFAULT_USER_AGENT
        );
        HeaderValue::from_static(DEFAULT_USER_AGENT)
    });
    headers.insert(USER_AGENT, agent);
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_headers_has_required_fields() {
        let headers = document_headers(DEFAULT_USER_AGENT);
        assert!(headers.contains_key(ACCEPT));
        assert!(headers.contains_key(ACCEPT_LANGUAGE));
        assert!(headers.contains_key(USER_AGENT));
    }

    #[test]
    fn test_user_agent_is_overridable() {
        let headers = document_headers("folio-test/1.0");
        assert_eq!(headers.get(USER_AGENT).unwrap(), "folio-test/1.0");
    }

    #[test]
    fn test_invalid_user_agent_falls_back() {
        let headers = document_headers("bad\nagent");
        assert_eq!(headers.get(USER_AGENT).unwrap(), DEFAULT_USER_AGENT);
    }
}
