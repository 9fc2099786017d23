//! Customer Account API adapter.
//!
//! HTTP implementation of the `CustomerAccount` port.

mod dto;
mod http_client;

pub use http_client::CustomerAccountHttpClient;
