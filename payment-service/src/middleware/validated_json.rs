//! Body extractor for the payment endpoints.
//!
//! Every way a body can be wrong (missing content type, malformed JSON, wrong
//! field types, out-of-range values) collapses into the endpoint's static
//! 400 message. Only an oversized body keeps its own status.

use axum::async_trait;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::Json;
use serde::de::DeserializeOwned;
use service_core::error::AppError;

use crate::dtos::PaymentRequest;
use crate::services::metrics;

/// A JSON body that has passed type, range, length and finiteness checks.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + PaymentRequest,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                metrics::record_operation(T::OPERATION, "rejected");
                if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                    return AppError::PayloadTooLarge;
                }
                tracing::debug!(
                    operation = T::OPERATION,
                    reason = %rejection.body_text(),
                    "Rejected request body"
                );
                AppError::validation(T::REJECTION)
            })?;

        if let Some(problem) = problem(&body) {
            metrics::record_operation(T::OPERATION, "rejected");
            tracing::debug!(operation = T::OPERATION, %problem, "Request body failed validation");
            return Err(AppError::validation(T::REJECTION));
        }

        Ok(ValidatedJson(body))
    }
}

/// First rule the body breaks, if any.
///
/// serde_json already refuses literals like `1e400`, so the finiteness check
/// only matters for bodies built some other way.
fn problem<T: PaymentRequest>(body: &T) -> Option<String> {
    if let Err(errors) = body.validate() {
        return Some(errors.to_string());
    }
    if !body.lengths_ok() {
        return Some("string length out of bounds".to_string());
    }
    if !body.amount().is_finite() {
        return Some("amount is not finite".to_string());
    }
    None
}
