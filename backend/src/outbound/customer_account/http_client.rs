//! Reqwest-backed Customer Account adapter.
//!
//! Owns transport details only: request serialisation, timeout and status
//! mapping, and JSON decoding. Session checks compare token expiry against
//! an injected clock.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mockable::Clock;
use pagination::PaginationVariables;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use tracing::debug;

use super::dto::{GraphQlRequestDto, decode_customer_orders};
use crate::domain::ports::{
    CustomerAccount, CustomerAccountError, CustomerOrdersData, GraphQlResponse,
};
use crate::domain::{CustomerAccessToken, SessionState};

const DEFAULT_USER_AGENT: &str = "storefront-account/0.1";
const PREVIEW_CHAR_LIMIT: usize = 160;

/// Customer Account adapter posting GraphQL queries to one endpoint.
pub struct CustomerAccountHttpClient {
    client: Client,
    endpoint: Url,
    user_agent: String,
    clock: Arc<dyn Clock>,
}

impl CustomerAccountHttpClient {
    /// Build an adapter whose requests give up after `timeout`.
    ///
    /// # Errors
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        timeout: Duration,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            clock,
        })
    }

    /// Override the `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

#[async_trait]
impl CustomerAccount for CustomerAccountHttpClient {
    async fn session_state(&self, token: Option<CustomerAccessToken>) -> SessionState {
        classify_token(token, self.clock.as_ref())
    }

    async fn customer_orders(
        &self,
        token: &CustomerAccessToken,
        variables: &PaginationVariables,
    ) -> Result<GraphQlResponse<CustomerOrdersData>, CustomerAccountError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(reqwest::header::USER_AGENT, self.user_agent.as_str())
            .header(reqwest::header::ACCEPT, "application/json")
            .header(reqwest::header::AUTHORIZATION, token.access_token())
            .json(&GraphQlRequestDto::customer_orders(variables))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        debug!(bytes = body.len(), "customer orders response received");
        decode_customer_orders(body.as_ref()).map_err(CustomerAccountError::decode)
    }
}

fn classify_token(token: Option<CustomerAccessToken>, clock: &dyn Clock) -> SessionState {
    match token {
        Some(token) if !token.is_expired(clock.utc()) => SessionState::LoggedIn(token),
        Some(token) => {
            debug!(expires_at = %token.expires_at(), "customer token expired");
            SessionState::LoggedOut
        }
        None => SessionState::LoggedOut,
    }
}

fn map_transport_error(error: reqwest::Error) -> CustomerAccountError {
    if error.is_timeout() {
        CustomerAccountError::timeout(error.to_string())
    } else {
        CustomerAccountError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> CustomerAccountError {
    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            CustomerAccountError::timeout(format!("status {}", status.as_u16()))
        }
        _ => CustomerAccountError::rejected(status.as_u16(), rejection_body(body)),
    }
}

/// Error body as JSON when it parses, otherwise a compact text preview.
fn rejection_body(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap_or_else(|_| Value::String(body_preview(body)))
}

fn body_preview(body: &[u8]) -> String {
    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
