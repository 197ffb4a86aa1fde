//! Typed session cookie adapter.
//!
//! All cookie reads and writes go through this module, so the handler
//! code never touches raw `Cookie`/`Set-Cookie` strings and the cookie
//! attributes are set in exactly one place.

use std::time::Duration;

use axum::http::header::COOKIE;
use axum::http::HeaderMap;

/// Cookie name carrying the session ID.
pub const SESSION_COOKIE: &str = "session";

/// Typed view of the session cookie.
pub struct SessionCookie;

impl SessionCookie {
    /// Builds the `Set-Cookie` value issuing a session.
    ///
    /// `secure` is dropped only for plain-HTTP test deployments.
    #[must_use]
    pub fn issue(session_id: &str, max_age: Duration, secure: bool) -> String {
        let secure_attr = if secure { " Secure;" } else { "" };
        format!(
            "{SESSION_COOKIE}={session_id}; Path=/; HttpOnly;{secure_attr} SameSite=Strict; Max-Age={}",
            max_age.as_secs()
        )
    }

    /// Builds the `Set-Cookie` value clearing the session.
    #[must_use]
    pub fn clear(secure: bool) -> String {
        let secure_attr = if secure { " Secure;" } else { "" };
        format!("{SESSION_COOKIE}=; Path=/; HttpOnly;{secure_attr} SameSite=Strict; Max-Age=0")
    }

    /// Extracts the session ID from request headers, if present.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Option<String> {
        let cookies = headers.get(COOKIE)?.to_str().ok()?;
        cookies.split(';').find_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            (name == SESSION_COOKIE && !value.is_empty()).then(|| value.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn issue_sets_security_attributes() {
        let cookie = SessionCookie::issue("abc123", Duration::from_secs(3600), true);
        assert!(cookie.starts_with("session=abc123;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("SameSite=Strict"));
        assert!(cookie.contains("Max-Age=3600"));
    }

    #[test]
    fn insecure_deployments_can_drop_the_secure_attribute() {
        let cookie = SessionCookie::issue("abc123", Duration::from_secs(3600), false);
        assert!(!cookie.contains("Secure"));
        assert!(cookie.contains("HttpOnly"));
    }

    #[test]
    fn clear_expires_immediately() {
        let cookie = SessionCookie::clear(true);
        assert!(cookie.starts_with("session=;"));
        assert!(cookie.contains("Max-Age=0"));
    }

    #[test]
    fn parses_session_among_other_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; session=abc123; lang=en"),
        );
        assert_eq!(SessionCookie::from_headers(&headers).as_deref(), Some("abc123"));
    }

    #[test]
    fn missing_or_empty_cookie_reads_as_none() {
        let headers = HeaderMap::new();
        assert!(SessionCookie::from_headers(&headers).is_none());

        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("session="));
        assert!(SessionCookie::from_headers(&headers).is_none());
    }
}
