//! Cursor pagination primitives for storefront loaders.
//!
//! The upstream commerce APIs own cursor arithmetic: they hand out opaque
//! `startCursor`/`endCursor` values together with `hasPreviousPage` and
//! `hasNextPage` flags. This crate only translates between those values and
//! the HTTP layer:
//!
//! - [`PaginationVariables`] reads `cursor`, `direction` and `pageBy` from a
//!   request query string and produces the `first`/`last`/`startCursor`/
//!   `endCursor` arguments for a connection field.
//! - [`Connection`] and [`PageInfo`] mirror the connection shape returned by
//!   the API, and [`PageRequest`] builds the query string for the
//!   neighbouring pages.
//!
//! # Examples
//! ```
//! use pagination::{Direction, PaginationVariables, DEFAULT_PAGE_SIZE};
//!
//! let variables = PaginationVariables::from_query("direction=previous&cursor=abc", DEFAULT_PAGE_SIZE)
//!     .expect("valid query");
//! assert_eq!(variables.direction(), Direction::Previous);
//! assert_eq!(variables.last(), Some(20));
//! assert_eq!(variables.start_cursor(), Some("abc"));
//! ```

mod connection;
mod variables;

pub use connection::{Connection, PageInfo, PageRequest};
pub use variables::{
    DEFAULT_PAGE_SIZE, Direction, MAX_PAGE_SIZE, PaginationError, PaginationVariables,
};
