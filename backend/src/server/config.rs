//! HTTP server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::cookie::{Key, SameSite};
use storefront::domain::ports::{CustomerAccount, FixtureCustomerAccount};
use url::Url;

/// Everything `create_server` needs besides the health flags.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) customer_account: Arc<dyn CustomerAccount>,
    pub(crate) login_url: Option<Url>,
}

impl ServerConfig {
    /// Configuration backed by the fixture Customer Account adapter.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            customer_account: Arc::new(FixtureCustomerAccount),
            login_url: None,
        }
    }

    /// Use `customer_account` for session checks and order queries.
    #[must_use]
    pub fn with_customer_account(mut self, customer_account: Arc<dyn CustomerAccount>) -> Self {
        self.customer_account = customer_account;
        self
    }

    /// Send `/account/login` to the hosted login page at `login_url`.
    #[must_use]
    pub fn with_login_url(mut self, login_url: Option<Url>) -> Self {
        self.login_url = login_url;
        self
    }
}
