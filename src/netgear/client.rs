// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Stateful SOAP session client for Netgear routers
//!
//! One client holds exactly one session (cookie plus session id) and is shared
//! by every collector. A 401 response triggers a single login followed by a
//! single retry of the rejected operation.

use std::time::Duration;

use reqwest::header::{
    CONTENT_TYPE, COOKIE, HeaderMap, HeaderName, HeaderValue, SET_COOKIE, USER_AGENT,
};
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::Mutex;
use url::Url;

use crate::config::RouterConfig;
use crate::error::{AppError, Result};

use super::decode::{decode, decode_devices, decode_flat};
use super::envelope::{Envelope, parse_envelope};
use super::operation::Operation;
use super::types::{DecodedRecord, DeviceRecord};

/// Fixed SOAP endpoint path on the router
pub const SOAP_PATH: &str = "/soap/server_sa/";

/// Client-chosen session id echoed in every request envelope
pub const SESSION_ID: &str = "A7D88AE69687E58D9A00";

/// Cookie value sent before the router has issued one
const UNSET_COOKIE: &str = "UNSET";

/// Router firmware rejects requests without a familiar agent string
const FIRMWARE_USER_AGENT: &str = "curl/7.59.0";

const SOAP_CONTENT_TYPE: &str = "text/xml;charset=utf-8";

/// Log target for request/response dumps in client debug mode
const SOAP_LOG_TARGET: &str = "netgear_exporter::soap";

/// Mutable session state, only touched under the client's lock
struct SessionState {
    cookie: String,
    session_id: String,
}

/// Outcome of one HTTP exchange with the router
enum Exchange {
    Success(Vec<u8>),
    NotLoggedIn,
}

/// Netgear SOAP API client
pub struct SessionClient {
    http: reqwest::Client,
    base_url: Url,
    endpoint: Url,
    username: String,
    password: SecretString,
    debug: bool,
    state: Mutex<SessionState>,
}

impl SessionClient {
    /// Creates a client; no network traffic happens until the first invoke
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` for an empty password or an unparseable URL.
    pub fn new(config: &RouterConfig) -> Result<Self> {
        if config.debug {
            tracing::info!(target: SOAP_LOG_TARGET, "Constructing debug client");
        }
        if config.password.expose_secret().is_empty() {
            return Err(AppError::Config(
                "Router password is required".to_string(),
            ));
        }

        let username = if config.username.trim().is_empty() {
            "admin".to_string()
        } else {
            config.username.clone()
        };

        let (base_url, endpoint) = normalize_base_url(&config.url)?;

        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(config.insecure)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url,
            endpoint,
            username,
            password: SecretString::from(config.password.expose_secret().to_owned()),
            debug: config.debug,
            state: Mutex::new(SessionState {
                cookie: UNSET_COOKIE.to_string(),
                session_id: SESSION_ID.to_string(),
            }),
        })
    }

    /// Normalized router base URL
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Invokes a remote operation and returns the raw inner body of the response.
    ///
    /// The session lock is held for the whole exchange, including any login and
    /// retry, so concurrent callers never observe a half-updated session.
    ///
    /// # Errors
    ///
    /// `Transport` for network failures, `Protocol` for unexpected response
    /// codes, `Auth` when login fails or a 401 survives the re-login, and
    /// `Decode` for malformed envelopes.
    pub async fn invoke(&self, operation: Operation) -> Result<Vec<u8>> {
        let mut state = self.state.lock().await;

        if let Exchange::Success(body) = self.exchange(&mut state, operation).await? {
            return Ok(body);
        }
        if !operation.allows_login() {
            return Err(AppError::Auth("router rejected the login".to_string()));
        }

        tracing::debug!("Router session is not authenticated, logging in");
        self.login_locked(&mut state).await?;

        match self.exchange(&mut state, operation).await? {
            Exchange::Success(body) => Ok(body),
            Exchange::NotLoggedIn => Err(AppError::Auth(
                "router still reports not logged in after re-login".to_string(),
            )),
        }
    }

    /// Performs an explicit login
    ///
    /// # Errors
    ///
    /// Same failure modes as [`SessionClient::invoke`].
    pub async fn login(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        self.login_locked(&mut state).await
    }

    /// Fetches and decodes the attached-device list
    ///
    /// # Errors
    ///
    /// Any invoke or decode failure.
    pub async fn get_attach_device(&self) -> Result<Vec<DeviceRecord>> {
        let body = self.invoke(Operation::AttachDevice).await?;
        decode_devices(&decode(&body)?)
    }

    /// Fetches and decodes system resource usage
    ///
    /// # Errors
    ///
    /// Any invoke or decode failure.
    pub async fn get_system_info(&self) -> Result<DecodedRecord> {
        let body = self.invoke(Operation::SystemInfo).await?;
        decode_flat(&decode(&body)?, false)
    }

    /// Fetches and decodes traffic meter counters
    ///
    /// # Errors
    ///
    /// Any invoke or decode failure.
    pub async fn get_traffic_meter(&self) -> Result<DecodedRecord> {
        let body = self.invoke(Operation::TrafficMeter).await?;
        decode_flat(&decode(&body)?, true)
    }

    async fn login_locked(&self, state: &mut SessionState) -> Result<()> {
        match self.exchange(state, Operation::Login).await? {
            Exchange::Success(_) => {
                tracing::debug!("Logged in to router as '{}'", self.username);
                Ok(())
            }
            Exchange::NotLoggedIn => Err(AppError::Auth(format!(
                "login rejected for user '{}'",
                self.username
            ))),
        }
    }

    async fn exchange(&self, state: &mut SessionState, operation: Operation) -> Result<Exchange> {
        let payload = operation.render(
            &state.session_id,
            &self.username,
            self.password.expose_secret(),
        );

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(SOAP_CONTENT_TYPE));
        headers.insert(USER_AGENT, HeaderValue::from_static(FIRMWARE_USER_AGENT));
        headers.insert(
            HeaderName::from_static("soapaction"),
            HeaderValue::from_static(operation.soap_action()),
        );
        if let Ok(cookie) = HeaderValue::from_str(&state.cookie) {
            headers.insert(COOKIE, cookie);
        }

        if self.debug {
            let shown = if operation.allows_login() {
                payload.as_str()
            } else {
                "<login request redacted>"
            };
            tracing::info!(
                target: SOAP_LOG_TARGET,
                "POST {} SOAPAction={} Cookie={}\n{}",
                self.endpoint,
                operation.soap_action(),
                state.cookie,
                shown
            );
        }

        let response = self
            .http
            .post(self.endpoint.clone())
            .headers(headers)
            .body(payload)
            .send()
            .await?;

        let status = response.status();
        let set_cookie = response
            .headers()
            .get(SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let raw = response.bytes().await?;

        if self.debug {
            tracing::info!(
                target: SOAP_LOG_TARGET,
                "Response {} Set-Cookie={:?}\n{}",
                status,
                set_cookie,
                String::from_utf8_lossy(&raw)
            );
        }

        let envelope = parse_envelope(&raw).map_err(|e| {
            if status.is_success() {
                e
            } else {
                AppError::Protocol(format!("HTTP {status} with unreadable body: {e}"))
            }
        })?;

        classify(envelope, operation).map(|exchange| {
            if let (Exchange::Success(_), Some(cookie)) = (&exchange, set_cookie) {
                state.cookie = cookie;
            }
            exchange
        })
    }
}

fn classify(envelope: Envelope, operation: Operation) -> Result<Exchange> {
    if envelope.is_not_logged_in() {
        return Ok(Exchange::NotLoggedIn);
    }
    if envelope.is_success() {
        return Ok(Exchange::Success(envelope.body));
    }
    Err(AppError::Protocol(format!(
        "{} returned ResponseCode {}: {}",
        operation.soap_action(),
        envelope.response_code,
        String::from_utf8_lossy(&envelope.body).trim()
    )))
}

/// Strips a trailing slash, defaults the scheme to https and appends the SOAP path
fn normalize_base_url(raw: &str) -> Result<(Url, Url)> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let invalid =
        |e: url::ParseError| AppError::Config(format!("Error parsing router URL ({with_scheme}): {e}"));
    let base = Url::parse(&with_scheme).map_err(invalid)?;
    let endpoint = Url::parse(&format!("{with_scheme}{SOAP_PATH}")).map_err(invalid)?;
    Ok((base, endpoint))
}
