use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status label reported back to the caller. Nothing tracks it across requests.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Authorized,
    Captured,
    Refunded,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationPriority {
    Low,
    Normal,
    High,
}

/// Event published to the analytics topic, one per successful payment action.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsNotificationEvent {
    pub notification_id: Uuid,
    pub request_id: String,
    pub title: String,
    pub body: String,
    pub priority: NotificationPriority,
}

impl AnalyticsNotificationEvent {
    fn new(
        request_id: &str,
        title: &str,
        body: String,
        priority: NotificationPriority,
    ) -> Self {
        Self {
            notification_id: Uuid::new_v4(),
            request_id: request_id.to_string(),
            title: title.to_string(),
            body,
            priority,
        }
    }

    pub fn payment_authorized(
        request_id: &str,
        payment_id: Uuid,
        order_id: &str,
        amount: f64,
        currency: &str,
    ) -> Self {
        Self::new(
            request_id,
            "PaymentAuthorized",
            format!(
                "Payment {} authorized for order {}: {} {}",
                payment_id, order_id, amount, currency
            ),
            NotificationPriority::High,
        )
    }

    pub fn payment_captured(request_id: &str, payment_id: &str, amount: f64) -> Self {
        Self::new(
            request_id,
            "PaymentCaptured",
            format!("Payment {} captured: {}", payment_id, amount),
            NotificationPriority::Normal,
        )
    }

    pub fn payment_refunded(
        request_id: &str,
        payment_id: &str,
        refund_id: Uuid,
        amount: f64,
    ) -> Self {
        Self::new(
            request_id,
            "PaymentRefunded",
            format!(
                "Refund {} issued for payment {}: {}",
                refund_id, payment_id, amount
            ),
            NotificationPriority::Normal,
        )
    }
}
