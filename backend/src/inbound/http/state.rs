//! Shared HTTP adapter state.
//!
//! Handlers receive this via `web::Data` so they depend only on domain ports
//! and stay testable without I/O.

use std::sync::Arc;

use url::Url;

use crate::domain::ports::{CustomerAccount, FixtureCustomerAccount};

/// Dependency bundle for the account handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Session checks and order queries.
    pub customer_account: Arc<dyn CustomerAccount>,
    /// Hosted login page; `None` leaves `/account/login` unavailable.
    pub login_url: Option<Url>,
}

impl HttpState {
    /// Construct state from a port implementation.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use storefront::domain::ports::FixtureCustomerAccount;
    /// use storefront::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(Arc::new(FixtureCustomerAccount), None);
    /// assert!(state.login_url.is_none());
    /// ```
    pub fn new(customer_account: Arc<dyn CustomerAccount>, login_url: Option<Url>) -> Self {
        Self {
            customer_account,
            login_url,
        }
    }
}

impl Default for HttpState {
    fn default() -> Self {
        Self::new(Arc::new(FixtureCustomerAccount), None)
    }
}
