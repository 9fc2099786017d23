//! HTTP inbound adapter for the storefront account area.

pub mod account;
pub mod error;
pub mod health;
pub mod orders;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use crate::domain::ApiResult;
