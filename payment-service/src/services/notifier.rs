//! Fire-and-forget analytics notifications.
//!
//! Each event gets exactly one delivery attempt: connect, publish through
//! JetStream, wait for the broker's ack. The attempt is bounded by a single
//! deadline and its outcome is only logged and counted. Callers never wait on
//! it and never see its errors.

use std::sync::Arc;
use std::time::Duration;

use async_nats::jetstream::{self, context::PublishError, publish::PublishAck};
use async_nats::{ConnectError, ConnectOptions, HeaderMap};
use secrecy::ExposeSecret;
use thiserror::Error;
use tracing::Instrument;

use crate::config::BrokerConfig;
use crate::models::AnalyticsNotificationEvent;
use crate::services::metrics;

/// Header the broker uses to recognise duplicate publishes of one event.
const MSG_ID_HEADER: &str = "Nats-Msg-Id";

/// Background reconnects allowed after the connection drops.
const MAX_RECONNECTS: usize = 1;

/// Sink for analytics events. `notify` must return without waiting on delivery.
pub trait Notifier: Send + Sync {
    fn notify(&self, event: AnalyticsNotificationEvent);
}

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("failed to serialize event: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to connect to broker: {0}")]
    Connect(#[from] ConnectError),

    #[error("broker did not accept publish: {0}")]
    Publish(#[from] PublishError),

    #[error("publish did not settle within {0:?}")]
    Timeout(Duration),
}

impl NotificationError {
    /// Metric label for this failure.
    pub fn outcome(&self) -> &'static str {
        match self {
            NotificationError::Serialize(_) => "serialize_error",
            NotificationError::Connect(_) => "connect_error",
            NotificationError::Publish(_) => "publish_error",
            NotificationError::Timeout(_) => "timeout",
        }
    }
}

/// Publishes events to a NATS broker, one short-lived connection per event.
#[derive(Clone)]
pub struct BrokerNotifier {
    config: Arc<BrokerConfig>,
}

impl BrokerNotifier {
    pub fn new(config: BrokerConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn topic(&self) -> &str {
        &self.config.topic
    }

    /// Run one delivery attempt to completion.
    ///
    /// Resolves with the first of: broker ack, connect error, publish error,
    /// or the deadline. The attempt future owns the connection, so it is
    /// closed exactly once when this returns, whichever way it settled.
    pub async fn publish(
        &self,
        event: &AnalyticsNotificationEvent,
    ) -> Result<PublishAck, NotificationError> {
        let payload = serde_json::to_vec(event)?;
        let deadline = self.config.deadline;

        match tokio::time::timeout(deadline, self.attempt(event, payload)).await {
            Ok(settled) => settled,
            Err(_) => Err(NotificationError::Timeout(deadline)),
        }
    }

    async fn attempt(
        &self,
        event: &AnalyticsNotificationEvent,
        payload: Vec<u8>,
    ) -> Result<PublishAck, NotificationError> {
        // A connection lost mid-publish gets one reconnect try, not a loop.
        let client = ConnectOptions::new()
            .name("payment-service")
            .connection_timeout(self.config.connect_timeout)
            .max_reconnects(Some(MAX_RECONNECTS))
            .connect(self.config.url.expose_secret().as_str())
            .await?;

        let context = jetstream::new(client);

        let mut headers = HeaderMap::new();
        headers.insert(MSG_ID_HEADER, event.notification_id.to_string().as_str());

        let ack = context
            .publish_with_headers(self.config.topic.clone(), headers, payload.into())
            .await?
            .await?;

        Ok(ack)
    }
}

impl Notifier for BrokerNotifier {
    fn notify(&self, event: AnalyticsNotificationEvent) {
        let notifier = self.clone();
        let span = tracing::info_span!(
            "notification",
            notification_id = %event.notification_id,
            request_id = %event.request_id,
            title = %event.title,
        );

        tokio::spawn(
            async move {
                let outcome = match notifier.publish(&event).await {
                    Ok(ack) => {
                        tracing::debug!(
                            stream = %ack.stream,
                            sequence = ack.sequence,
                            topic = %notifier.topic(),
                            "Notification published"
                        );
                        "published"
                    }
                    Err(e) => {
                        tracing::warn!(
                            error = %e,
                            topic = %notifier.topic(),
                            "Notification delivery failed"
                        );
                        e.outcome()
                    }
                };

                metrics::record_notification(&event.title, outcome);
            }
            .instrument(span),
        );
    }
}
