//! Origin allow-listing and preflight handling shared by the score endpoints.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{
        HeaderMap, HeaderValue, Method, StatusCode,
        header::{
            ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS,
            ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN, ORIGIN, VARY,
        },
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

/// CORS headers advertised by one endpoint.
///
/// Unlisted origins never receive `Access-Control-Allow-Origin`, which makes browsers discard
/// the response.
#[derive(Clone)]
pub struct CorsPolicy {
    allowed_origins: Arc<[HeaderValue]>,
    allow_methods: HeaderValue,
}

impl CorsPolicy {
    /// Policy for an endpoint serving `method` (plus `OPTIONS`).
    pub fn new(origins: &[String], method: Method) -> Self {
        let allowed_origins = origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(err) => {
                    warn!(%origin, error = %err, "ignoring invalid allowed origin");
                    None
                }
            })
            .collect();

        let allow_methods = HeaderValue::from_str(&format!("{}, OPTIONS", method.as_str()))
            .unwrap_or(HeaderValue::from_static("OPTIONS"));

        Self {
            allowed_origins,
            allow_methods,
        }
    }

    /// The request origin if it is on the allow-list.
    fn matching_origin(&self, headers: &HeaderMap) -> Option<HeaderValue> {
        let origin = headers.get(ORIGIN)?;
        if self.allowed_origins.iter().any(|allowed| allowed == origin) {
            Some(origin.clone())
        } else {
            debug!(origin = ?origin, "origin not allowed; omitting CORS allow-origin header");
            None
        }
    }

    fn decorate(&self, headers: &mut HeaderMap, origin: Option<HeaderValue>) {
        if let Some(origin) = origin {
            headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin);
        }
        headers.append(VARY, HeaderValue::from_static("origin"));
        headers.insert(ACCESS_CONTROL_ALLOW_METHODS, self.allow_methods.clone());
        headers.insert(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        );
        headers.insert(
            ACCESS_CONTROL_ALLOW_CREDENTIALS,
            HeaderValue::from_static("true"),
        );
    }
}

/// Answer `OPTIONS` immediately and attach CORS headers to every response.
pub async fn apply_cors(State(policy): State<CorsPolicy>, req: Request, next: Next) -> Response {
    let origin = policy.matching_origin(req.headers());

    let mut response = if req.method() == Method::OPTIONS {
        StatusCode::OK.into_response()
    } else {
        next.run(req).await
    };

    policy.decorate(response.headers_mut(), origin);
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> CorsPolicy {
        CorsPolicy::new(&["https://game.example.com".to_owned()], Method::GET)
    }

    fn with_origin(origin: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ORIGIN, HeaderValue::from_static(origin));
        headers
    }

    #[test]
    fn listed_origin_is_echoed() {
        let origin = policy().matching_origin(&with_origin("https://game.example.com"));
        assert_eq!(
            origin,
            Some(HeaderValue::from_static("https://game.example.com"))
        );
    }

    #[test]
    fn unlisted_or_missing_origin_is_dropped() {
        assert!(
            policy()
                .matching_origin(&with_origin("https://evil.example.com"))
                .is_none()
        );
        assert!(policy().matching_origin(&HeaderMap::new()).is_none());
    }

    #[test]
    fn methods_and_credentials_are_always_advertised() {
        let mut headers = HeaderMap::new();
        policy().decorate(&mut headers, None);

        assert!(headers.get(ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_METHODS], "GET, OPTIONS");
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    }
}
