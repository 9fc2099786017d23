//! Order history loader.
//!
//! One request walks `CheckingAuth -> (Redirecting | Querying) -> (Rendered |
//! ErrorRendered)`. The session check always happens first and the orders
//! query is only issued for a signed-in customer.

use pagination::{DEFAULT_PAGE_SIZE, PaginationVariables};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::ports::{CustomerAccount, CustomerAccountError};
use super::{Customer, LOGIN_PATH, SessionState};

const CUSTOMER_NOT_FOUND: &str = "Customer not found";

/// Error payload of a failed load.
///
/// Serialises as a bare string when the failure carries a message and as the
/// upstream JSON body otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LoaderFailure {
    /// Human-readable failure message.
    Message(String),
    /// Structured upstream body without a recognisable message.
    Raw(Value),
}

impl LoaderFailure {
    /// Failure carrying `message`.
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}

impl From<CustomerAccountError> for LoaderFailure {
    fn from(value: CustomerAccountError) -> Self {
        match value {
            CustomerAccountError::Rejected { body, .. } => match message_in(&body) {
                Some(message) => Self::Message(message),
                None => Self::Raw(body),
            },
            other => Self::Message(other.to_string()),
        }
    }
}

/// Outcome of [`load_order_history`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderHistoryLoad {
    /// Send the client elsewhere without rendering.
    Redirect(&'static str),
    /// Render the customer's orders.
    Loaded {
        /// Customer payload returned by the API.
        customer: Customer,
        /// Page size of this request, carried into the neighbouring page links.
        page_size: u32,
    },
    /// Render the error payload.
    Failed(LoaderFailure),
}

/// Load one page of order history.
///
/// `query` is the raw request query string holding `cursor`, `direction`
/// and `pageBy`.
pub async fn load_order_history(
    account: &dyn CustomerAccount,
    session: &SessionState,
    query: &str,
) -> OrderHistoryLoad {
    let token = match session {
        SessionState::LoggedIn(token) => token,
        SessionState::LoggedOut => {
            debug!("order history requested without a session");
            return OrderHistoryLoad::Redirect(LOGIN_PATH);
        }
        SessionState::Indeterminate { reason } => {
            warn!(%reason, "order history requested with an indeterminate session");
            return OrderHistoryLoad::Redirect(LOGIN_PATH);
        }
    };

    let variables = match PaginationVariables::from_query(query, DEFAULT_PAGE_SIZE) {
        Ok(variables) => variables,
        Err(err) => {
            debug!(error = %err, "rejecting order history pagination parameters");
            return OrderHistoryLoad::Failed(LoaderFailure::message(err.to_string()));
        }
    };

    let response = match account.customer_orders(token, &variables).await {
        Ok(response) => response,
        Err(err) => {
            warn!(error = %err, "customer orders query failed");
            return OrderHistoryLoad::Failed(err.into());
        }
    };

    if response.has_errors() {
        let messages: Vec<&str> = response
            .errors
            .iter()
            .flatten()
            .map(|error| error.message.as_str())
            .collect();
        warn!(?messages, "customer orders query returned errors");
        return OrderHistoryLoad::Failed(LoaderFailure::message(CUSTOMER_NOT_FOUND));
    }

    match response.data.and_then(|data| data.customer) {
        Some(customer) => {
            info!(
                orders = customer.orders.nodes.len(),
                direction = variables.direction().as_str(),
                "loaded order history"
            );
            OrderHistoryLoad::Loaded {
                customer,
                page_size: variables.page_size(),
            }
        }
        None => {
            warn!("customer orders query returned no customer");
            OrderHistoryLoad::Failed(LoaderFailure::message(CUSTOMER_NOT_FOUND))
        }
    }
}

/// First message found in a JSON error body.
///
/// Looks at `message`, `error` and `errors[0].message` in that order.
fn message_in(body: &Value) -> Option<String> {
    let candidates = [
        body.get("message"),
        body.get("error"),
        body.get("errors")
            .and_then(|errors| errors.get(0))
            .and_then(|error| error.get("message")),
    ];
    candidates
        .into_iter()
        .flatten()
        .find_map(|value| value.as_str())
        .filter(|message| !message.trim().is_empty())
        .map(str::to_owned)
}
