//! Order history projections of the Customer Account API.

use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use pagination::Connection;
use serde::{Deserialize, Serialize};

/// Path of the order history page; order detail links live beneath it.
pub const ORDERS_PATH: &str = "/account/orders";

/// Global id of an order, for example `gid://shopify/Order/42`.
///
/// Order detail URLs carry the id in exactly one encoding produced by
/// [`OrderId::path_segment`].
///
/// # Examples
/// ```
/// use storefront::domain::OrderId;
///
/// let id = OrderId::new("gid://shopify/Order/42");
/// assert_eq!(id.path_segment(), "Z2lkOi8vc2hvcGlmeS9PcmRlci80Mg");
/// assert_eq!(id.detail_path(), "/account/orders/Z2lkOi8vc2hvcGlmeS9PcmRlci80Mg");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Wrap an upstream global id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Canonical URL path encoding: unpadded URL-safe base64.
    #[must_use]
    pub fn path_segment(&self) -> String {
        URL_SAFE_NO_PAD.encode(self.0.as_bytes())
    }

    /// Link to the order detail view.
    #[must_use]
    pub fn detail_path(&self) -> String {
        format!("{ORDERS_PATH}/{}", self.path_segment())
    }
}

impl AsRef<str> for OrderId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Payment state reported for an order.
///
/// Values introduced upstream after this build are kept verbatim in
/// [`FinancialStatus::Other`] so they render and serialise unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FinancialStatus {
    /// Payment has not been captured yet.
    Pending,
    /// Payment is authorised but not captured.
    Authorized,
    /// Part of the total has been paid.
    PartiallyPaid,
    /// The total has been paid.
    Paid,
    /// Part of the payment has been refunded.
    PartiallyRefunded,
    /// The payment has been refunded in full.
    Refunded,
    /// The authorisation was voided.
    Voided,
    /// The authorisation expired before capture.
    Expired,
    /// Upstream spelling of a status this build does not know.
    Other(String),
}

impl FinancialStatus {
    /// Upstream enum spelling.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "PENDING",
            Self::Authorized => "AUTHORIZED",
            Self::PartiallyPaid => "PARTIALLY_PAID",
            Self::Paid => "PAID",
            Self::PartiallyRefunded => "PARTIALLY_REFUNDED",
            Self::Refunded => "REFUNDED",
            Self::Voided => "VOIDED",
            Self::Expired => "EXPIRED",
            Self::Other(raw) => raw.as_str(),
        }
    }
}

impl From<String> for FinancialStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "PENDING" => Self::Pending,
            "AUTHORIZED" => Self::Authorized,
            "PARTIALLY_PAID" => Self::PartiallyPaid,
            "PAID" => Self::Paid,
            "PARTIALLY_REFUNDED" => Self::PartiallyRefunded,
            "REFUNDED" => Self::Refunded,
            "VOIDED" => Self::Voided,
            "EXPIRED" => Self::Expired,
            _ => Self::Other(value),
        }
    }
}

impl From<FinancialStatus> for String {
    fn from(value: FinancialStatus) -> Self {
        match value {
            FinancialStatus::Other(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for FinancialStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Monetary amount as a decimal string plus ISO 4217 code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyV2 {
    /// Decimal amount, for example `"12.50"`.
    pub amount: String,
    /// Currency code, for example `"USD"`.
    pub currency_code: String,
}

impl MoneyV2 {
    /// Build an amount in `currency_code`.
    pub fn new(amount: impl Into<String>, currency_code: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            currency_code: currency_code.into(),
        }
    }
}

/// One row of the order history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    /// Upstream global id.
    pub id: OrderId,
    /// Customer-facing order number.
    pub number: u64,
    /// When the order was processed.
    pub processed_at: DateTime<Utc>,
    /// Payment state, when the API reports one.
    #[serde(default)]
    pub financial_status: Option<FinancialStatus>,
    /// Order total including taxes and shipping.
    pub total_price: MoneyV2,
}

/// Customer fields selected by the orders query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Orders, newest first.
    pub orders: Connection<OrderSummary>,
}
