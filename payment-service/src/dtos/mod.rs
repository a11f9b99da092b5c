//! Request and response bodies for the payment endpoints.
//!
//! Request types only describe shape. Type mismatches are caught by serde,
//! ranges by `validator`, and string lengths and finiteness by
//! [`PaymentRequest`]. Lengths count UTF-16 code units, so `"😀A"` is a
//! three-character currency.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;
use validator::Validate;

use crate::models::PaymentStatus;

/// Common contract of the three inbound bodies.
pub trait PaymentRequest: Validate {
    /// Metric label of the endpoint accepting this body.
    const OPERATION: &'static str;
    /// Static message returned with a 400 when the body is rejected.
    const REJECTION: &'static str;

    fn amount(&self) -> f64;

    /// Length rules `validator` cannot express in UTF-16 units.
    fn lengths_ok(&self) -> bool {
        true
    }
}

/// String length as counted by JSON clients written for the browser.
pub fn utf16_len(value: &str) -> usize {
    value.encode_utf16().count()
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PaymentAuthorizationRequest {
    pub order_id: String,
    pub amount: f64,
    pub currency: String,
    pub payment_method_id: String,
}

impl PaymentRequest for PaymentAuthorizationRequest {
    const OPERATION: &'static str = "authorize";
    const REJECTION: &'static str = "Invalid payment authorization request";

    fn amount(&self) -> f64 {
        self.amount
    }

    fn lengths_ok(&self) -> bool {
        utf16_len(&self.currency) == 3
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PaymentCaptureRequest {
    #[validate(range(min = 0.0))]
    pub amount: f64,
}

impl PaymentRequest for PaymentCaptureRequest {
    const OPERATION: &'static str = "capture";
    const REJECTION: &'static str = "Invalid capture request";

    fn amount(&self) -> f64 {
        self.amount
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PaymentRefundRequest {
    #[validate(range(min = 0.01))]
    pub amount: f64,
    pub reason: String,
}

impl PaymentRequest for PaymentRefundRequest {
    const OPERATION: &'static str = "refund";
    const REJECTION: &'static str = "Invalid refund request";

    fn amount(&self) -> f64 {
        self.amount
    }

    fn lengths_ok(&self) -> bool {
        utf16_len(&self.reason) <= 256
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationResponse {
    pub payment_id: Uuid,
    pub order_id: String,
    pub status: PaymentStatus,
    #[serde(serialize_with = "js_number")]
    pub authorized_amount: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureResponse {
    pub payment_id: String,
    pub status: PaymentStatus,
    #[serde(serialize_with = "js_number")]
    pub captured_amount: f64,
    #[serde(serialize_with = "iso8601")]
    pub captured_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundResponse {
    pub payment_id: String,
    pub refund_id: Uuid,
    pub status: PaymentStatus,
    #[serde(serialize_with = "js_number")]
    pub refunded_amount: f64,
    #[serde(serialize_with = "iso8601")]
    pub refunded_at: DateTime<Utc>,
}

/// Integral amounts render without a fractional part: `50`, not `50.0`.
fn js_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

    if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

/// `2026-01-31T12:00:00.000Z`
fn iso8601<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
}
