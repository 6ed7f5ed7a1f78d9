// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! HTTP basic auth for the metrics route

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{
        HeaderMap, StatusCode,
        header::{AUTHORIZATION, WWW_AUTHENTICATE},
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use secrecy::ExposeSecret;

use super::AppState;
use crate::config::BasicAuth;

const REALM: &str = "Basic realm=\"metrics\"";

/// Decodes `Authorization: Basic <base64>` into username and password
fn credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let encoded = value.strip_prefix("Basic ")?;
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

fn authorized(headers: &HeaderMap, expected: &BasicAuth) -> bool {
    credentials(headers).is_some_and(|(username, password)| {
        username == expected.username && password == expected.password.expose_secret()
    })
}

/// Passes requests through unless basic auth is configured and the
/// credentials do not match
pub async fn require_basic_auth(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let Some(expected) = &state.config.web.basic_auth else {
        return next.run(request).await;
    };
    if authorized(request.headers(), expected) {
        return next.run(request).await;
    }

    let remote = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map_or_else(|| "unknown".to_string(), |ConnectInfo(addr)| addr.to_string());
    tracing::error!("Invalid HTTP auth from `{}`", remote);

    (
        StatusCode::UNAUTHORIZED,
        [(WWW_AUTHENTICATE, REALM)],
        "Invalid username or password\n",
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use secrecy::SecretString;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    fn expected() -> BasicAuth {
        BasicAuth {
            username: "prom".to_string(),
            password: SecretString::from("s3cret:x".to_string()),
        }
    }

    #[test]
    fn test_credentials_decoding() {
        let value = format!("Basic {}", STANDARD.encode("prom:s3cret:x"));
        assert_eq!(
            credentials(&headers(&value)),
            Some(("prom".to_string(), "s3cret:x".to_string()))
        );
        assert!(authorized(&headers(&value), &expected()));
    }

    #[test]
    fn test_rejects_wrong_or_malformed_credentials() {
        let wrong = format!("Basic {}", STANDARD.encode("prom:nope"));
        assert!(!authorized(&headers(&wrong), &expected()));
        assert!(!authorized(&headers("Bearer abc"), &expected()));
        assert!(!authorized(&headers("Basic !!!"), &expected()));
        assert!(!authorized(&HeaderMap::new(), &expected()));
    }
}
