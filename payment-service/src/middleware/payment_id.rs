use axum::async_trait;
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use service_core::error::AppError;

/// The `:payment_id` path segment, rejected as JSON when it cannot be decoded.
#[derive(Debug, Clone)]
pub struct PaymentId(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for PaymentId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(payment_id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(reason = %rejection.body_text(), "Rejected payment id");
                AppError::validation("Invalid payment id")
            })?;

        Ok(PaymentId(payment_id))
    }
}
