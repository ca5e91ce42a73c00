// src/utils/session.rs

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{HeaderName, HeaderValue, request::Parts},
};

/// Header carrying the client's session identity, both ways.
pub static SESSION_HEADER: HeaderName = HeaderName::from_static("x-session-id");

const MAX_SESSION_ID_LEN: usize = 64;

/// Session identity of the current request.
///
/// Taken from the `x-session-id` header when it is well formed; otherwise a
/// fresh UUID is issued and the client is expected to echo it back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionId(pub String);

impl SessionId {
    fn parse(raw: &str) -> Option<Self> {
        let valid = !raw.is_empty()
            && raw.len() <= MAX_SESSION_ID_LEN
            && raw
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        valid.then(|| SessionId(raw.to_string()))
    }

    pub fn issue() -> Self {
        SessionId(uuid::Uuid::new_v4().to_string())
    }

    /// `(header, value)` pair for echoing the identity in a response.
    pub fn header(&self) -> [(HeaderName, HeaderValue); 1] {
        // Parsed and issued ids are ASCII-only.
        let value = HeaderValue::from_str(&self.0)
            .unwrap_or_else(|_| HeaderValue::from_static("invalid"));
        [(SESSION_HEADER.clone(), value)]
    }
}

impl<S> FromRequestParts<S> for SessionId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let provided = parts
            .headers
            .get(&SESSION_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(SessionId::parse);

        Ok(provided.unwrap_or_else(|| {
            let issued = SessionId::issue();
            tracing::debug!("Issued new session {}", issued.0);
            issued
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(header: Option<&str>) -> SessionId {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = header {
            builder = builder.header("x-session-id", value);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        SessionId::from_request_parts(&mut parts, &()).await.unwrap()
    }

    #[tokio::test]
    async fn test_well_formed_header_is_kept() {
        assert_eq!(extract(Some("client-42_a")).await, SessionId("client-42_a".to_string()));
    }

    #[tokio::test]
    async fn test_missing_or_malformed_header_issues_uuid() {
        for header in [None, Some(""), Some("has space"), Some(&"x".repeat(65)[..])] {
            let id = extract(header).await;
            assert!(uuid::Uuid::parse_str(&id.0).is_ok());
        }
    }
}
