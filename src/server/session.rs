//! Session identification through a cookie

use super::handlers::AppState;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue, header};
use std::convert::Infallible;
use uuid::Uuid;

/// The session a request belongs to
///
/// Read from the session cookie. A request without a valid cookie starts a
/// new session, and the response must then carry [`SessionHandle::cookie_headers`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionHandle {
    pub id: Uuid,
    pub is_new: bool,
}

impl SessionHandle {
    /// Find the session id in the `Cookie` headers
    pub fn from_headers(headers: &HeaderMap, cookie_name: &str) -> Option<Uuid> {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == cookie_name)
            .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
    }

    /// `Set-Cookie` for a freshly started session, nothing otherwise
    pub fn cookie_headers(&self, cookie_name: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if !self.is_new {
            return headers;
        }

        let cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            cookie_name, self.id
        );
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                headers.insert(header::SET_COOKIE, value);
            }
            Err(e) => tracing::warn!(error = %e, "session cookie name is not a valid header value"),
        }
        headers
    }
}

impl FromRequestParts<AppState> for SessionHandle {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(match Self::from_headers(&parts.headers, &state.cookie_name) {
            Some(id) => Self { id, is_new: false },
            None => {
                let id = Uuid::new_v4();
                tracing::debug!(session = %id, "starting new session");
                Self { id, is_new: true }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_cookie_among_others() {
        let id = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("theme=dark; roster_session={}; lang=it", id)).unwrap(),
        );
        assert_eq!(
            SessionHandle::from_headers(&headers, "roster_session"),
            Some(id)
        );
        assert_eq!(SessionHandle::from_headers(&headers, "other"), None);
    }

    #[test]
    fn test_invalid_cookie_value_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("roster_session=not-a-uuid"),
        );
        assert_eq!(SessionHandle::from_headers(&headers, "roster_session"), None);
    }

    #[test]
    fn test_cookie_headers_only_for_new_sessions() {
        let id = Uuid::new_v4();
        let existing = SessionHandle { id, is_new: false };
        assert!(existing.cookie_headers("roster_session").is_empty());

        let fresh = SessionHandle { id, is_new: true };
        let headers = fresh.cookie_headers("roster_session");
        let value = headers.get(header::SET_COOKIE).unwrap().to_str().unwrap();
        assert!(value.starts_with(&format!("roster_session={};", id)));
        assert!(value.contains("HttpOnly"));
    }
}
