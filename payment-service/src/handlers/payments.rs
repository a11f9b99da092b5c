//! Authorize, capture and refund handlers.
//!
//! None of these touch storage or check earlier calls: a capture or refund
//! accepts whatever payment id the path carries. Each successful request
//! hands one analytics event to the notifier and responds without waiting
//! for it.

use axum::{extract::State, Json};
use chrono::Utc;
use service_core::middleware::RequestId;
use uuid::Uuid;

use crate::{
    dtos::{
        AuthorizationResponse, CaptureResponse, PaymentAuthorizationRequest,
        PaymentCaptureRequest, PaymentRefundRequest, RefundResponse,
    },
    middleware::{PaymentId, ValidatedJson},
    models::{AnalyticsNotificationEvent, PaymentStatus},
    services::metrics,
    AppState,
};

pub async fn authorize(
    State(state): State<AppState>,
    request_id: RequestId,
    ValidatedJson(payload): ValidatedJson<PaymentAuthorizationRequest>,
) -> Json<AuthorizationResponse> {
    let payment_id = Uuid::new_v4();

    tracing::info!(
        payment_id = %payment_id,
        order_id = %payload.order_id,
        amount = payload.amount,
        currency = %payload.currency,
        "Payment authorized"
    );

    state
        .notifier
        .notify(AnalyticsNotificationEvent::payment_authorized(
            request_id.as_str(),
            payment_id,
            &payload.order_id,
            payload.amount,
            &payload.currency,
        ));
    metrics::record_operation("authorize", "accepted");

    Json(AuthorizationResponse {
        payment_id,
        order_id: payload.order_id,
        status: PaymentStatus::Authorized,
        authorized_amount: payload.amount,
    })
}

pub async fn capture(
    State(state): State<AppState>,
    PaymentId(payment_id): PaymentId,
    request_id: RequestId,
    ValidatedJson(payload): ValidatedJson<PaymentCaptureRequest>,
) -> Json<CaptureResponse> {
    let captured_at = Utc::now();

    tracing::info!(
        payment_id = %payment_id,
        amount = payload.amount,
        "Payment captured"
    );

    state
        .notifier
        .notify(AnalyticsNotificationEvent::payment_captured(
            request_id.as_str(),
            &payment_id,
            payload.amount,
        ));
    metrics::record_operation("capture", "accepted");

    Json(CaptureResponse {
        payment_id,
        status: PaymentStatus::Captured,
        captured_amount: payload.amount,
        captured_at,
    })
}

pub async fn refund(
    State(state): State<AppState>,
    PaymentId(payment_id): PaymentId,
    request_id: RequestId,
    ValidatedJson(payload): ValidatedJson<PaymentRefundRequest>,
) -> Json<RefundResponse> {
    let refund_id = Uuid::new_v4();
    let refunded_at = Utc::now();

    tracing::info!(
        payment_id = %payment_id,
        refund_id = %refund_id,
        amount = payload.amount,
        reason = %payload.reason,
        "Payment refunded"
    );

    state
        .notifier
        .notify(AnalyticsNotificationEvent::payment_refunded(
            request_id.as_str(),
            &payment_id,
            refund_id,
            payload.amount,
        ));
    metrics::record_operation("refund", "accepted");

    Json(RefundResponse {
        payment_id,
        refund_id,
        status: PaymentStatus::Refunded,
        refunded_amount: payload.amount,
        refunded_at,
    })
}
