//! Outbound adapters implementing domain ports against external services.
//!
//! Adapters translate between domain types and wire formats and hold no
//! business logic.

pub mod customer_account;
