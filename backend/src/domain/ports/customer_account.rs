//! Driven port for the Customer Account API.
//!
//! The account guard and the order history loader depend only on this trait,
//! so handler tests can substitute a mock or a recording fake instead of
//! talking to the hosted API.

use async_trait::async_trait;
use chrono::Utc;
use pagination::{Connection, PageInfo, PaginationVariables};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{Customer, CustomerAccessToken, SessionState};

use super::define_port_error;

define_port_error! {
    /// Errors raised while talking to the Customer Account API.
    pub enum CustomerAccountError {
        /// The request never produced an HTTP response.
        Transport { message: String } =>
            "customer account request failed: {message}",
        /// The request exceeded the configured timeout.
        Timeout { message: String } =>
            "customer account request timed out: {message}",
        /// The response body did not match the expected shape.
        Decode { message: String } =>
            "customer account response could not be decoded: {message}",
        /// The API answered with a non-success status.
        Rejected { status: u16, body: Value } =>
            "customer account rejected the request with status {status}",
    }
}

/// Location of a GraphQL error within the query document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphQlLocation {
    /// One-based line.
    pub line: u32,
    /// One-based column.
    pub column: u32,
}

/// One entry of a GraphQL `errors` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphQlError {
    /// Human-readable description from the API.
    pub message: String,
    /// Query positions the error refers to.
    #[serde(default)]
    pub locations: Option<Vec<GraphQlLocation>>,
    /// Response path of the failing field, as names and list indices.
    #[serde(default)]
    pub path: Option<Vec<Value>>,
}

/// GraphQL response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphQlResponse<T> {
    /// Selected data; absent when execution failed outright.
    pub data: Option<T>,
    /// Errors raised while executing the query.
    #[serde(default)]
    pub errors: Option<Vec<GraphQlError>>,
}

impl<T> GraphQlResponse<T> {
    /// Successful response carrying `data`.
    pub fn from_data(data: T) -> Self {
        Self {
            data: Some(data),
            errors: None,
        }
    }

    /// Whether the API reported at least one error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.errors.as_ref().is_some_and(|errors| !errors.is_empty())
    }
}

/// `data` selection of the customer orders query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerOrdersData {
    /// Customer owning the access token; `null` when the API cannot resolve one.
    #[serde(default)]
    pub customer: Option<Customer>,
}

/// Port for customer session checks and account queries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerAccount: Send + Sync {
    /// Classify the session holding `token`.
    ///
    /// `None` means the session carried no token.
    async fn session_state(&self, token: Option<CustomerAccessToken>) -> SessionState;

    /// Fetch one page of the customer's orders, newest first.
    async fn customer_orders(
        &self,
        token: &CustomerAccessToken,
        variables: &PaginationVariables,
    ) -> Result<GraphQlResponse<CustomerOrdersData>, CustomerAccountError>;
}

/// Fixture used when no Customer Account endpoint is configured.
///
/// Unexpired tokens are accepted and every customer has an empty order
/// history.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCustomerAccount;

#[async_trait]
impl CustomerAccount for FixtureCustomerAccount {
    async fn session_state(&self, token: Option<CustomerAccessToken>) -> SessionState {
        match token {
            Some(token) if !token.is_expired(Utc::now()) => SessionState::LoggedIn(token),
            _ => SessionState::LoggedOut,
        }
    }

    async fn customer_orders(
        &self,
        _token: &CustomerAccessToken,
        _variables: &PaginationVariables,
    ) -> Result<GraphQlResponse<CustomerOrdersData>, CustomerAccountError> {
        Ok(GraphQlResponse::from_data(CustomerOrdersData {
            customer: Some(Customer {
                orders: Connection {
                    nodes: Vec::new(),
                    page_info: PageInfo::default(),
                },
            }),
        }))
    }
}
