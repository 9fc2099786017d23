//! Domain primitives and the account-area state machines.
//!
//! Purpose: define transport-agnostic types for the storefront account pages
//! and product media. Types are read-only projections of upstream payloads;
//! invariants and serde contracts are documented on each type.
//!
//! Public surface:
//! - Error / ErrorCode: error envelope shared by every adapter.
//! - TraceId: request correlation identifier.
//! - VideoData / VideoError: product video payload and renderer validation.
//! - OrderId / OrderSummary / Customer: order history projections.
//! - SessionState / CustomerAccessToken: customer session view.
//! - account_guard / order_history: request state machines driven by ports.

pub mod account_guard;
pub mod error;
pub mod image;
pub mod order;
pub mod order_history;
pub mod ports;
pub mod session;
pub mod trace_id;
pub mod video;

pub use self::account_guard::{ACCOUNT_PATH, LOGIN_PATH, guard_account_area, resolve_session};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::image::{Crop, ImageLoaderOptions, image_url};
pub use self::order::{Customer, FinancialStatus, MoneyV2, ORDERS_PATH, OrderId, OrderSummary};
pub use self::order_history::{LoaderFailure, OrderHistoryLoad, load_order_history};
pub use self::session::{CustomerAccessToken, SessionState};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::video::{PreviewImage, ValidatedSource, VideoData, VideoError, VideoSource};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use storefront::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::service_unavailable("login is not configured"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
