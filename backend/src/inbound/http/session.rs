//! Session helpers so handlers never touch the cookie store directly.
//!
//! The customer access token is placed in the encrypted session cookie by the
//! hosted login flow and read back here.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{CustomerAccessToken, Error};

pub(crate) const CUSTOMER_TOKEN_KEY: &str = "customer_token";

/// Newtype over the Actix session exposing customer token operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Wrap the request's Actix session.
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Store the customer access token in the session cookie.
    pub fn persist_customer_token(&self, token: &CustomerAccessToken) -> Result<(), Error> {
        self.0
            .insert(CUSTOMER_TOKEN_KEY, token)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Customer access token held by the session, if any.
    ///
    /// # Errors
    /// Returns an internal error when the stored value cannot be decoded.
    /// Callers treat that as an indeterminate session.
    pub fn customer_token(&self) -> Result<Option<CustomerAccessToken>, Error> {
        self.0
            .get::<CustomerAccessToken>(CUSTOMER_TOKEN_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
