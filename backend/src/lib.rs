//! Storefront customer account service.
//!
//! Server-rendered account pages (order history, login hand-off and the
//! account-area redirect guard) backed by the Customer Account API, plus the
//! product video renderer shared with the storefront pages.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod render;
pub mod settings;

pub use middleware::Trace;
