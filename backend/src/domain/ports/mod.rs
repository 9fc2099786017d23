//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod customer_account;

#[cfg(test)]
pub use customer_account::MockCustomerAccount;
pub use customer_account::{
    CustomerAccount, CustomerAccountError, CustomerOrdersData, FixtureCustomerAccount,
    GraphQlError, GraphQlLocation, GraphQlResponse,
};
