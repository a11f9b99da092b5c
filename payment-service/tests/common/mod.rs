#![allow(dead_code)]

use payment_service::config::Config;
use payment_service::models::AnalyticsNotificationEvent;
use payment_service::services::{BrokerNotifier, Notifier};
use payment_service::startup::Application;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Captures events instead of publishing them.
#[derive(Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<AnalyticsNotificationEvent>>,
}

impl RecordingNotifier {
    pub fn events(&self) -> Vec<AnalyticsNotificationEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, event: AnalyticsNotificationEvent) {
        self.events.lock().unwrap().push(event);
    }
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub client: reqwest::Client,
    pub notifications: Arc<RecordingNotifier>,
}

pub fn test_config(overrides: &[(&str, &str)]) -> Config {
    let mut vars: HashMap<String, String> = HashMap::from([
        ("PAYMENT_HOST".to_string(), "127.0.0.1".to_string()),
        ("PAYMENT_PORT".to_string(), "0".to_string()),
    ]);
    for (key, value) in overrides {
        vars.insert(key.to_string(), value.to_string());
    }

    Config::from_lookup(|key| vars.get(key).cloned()).expect("Failed to build test config")
}

impl TestApp {
    /// Spawn the service with a recording notifier.
    pub async fn spawn() -> Self {
        let notifications = Arc::new(RecordingNotifier::default());
        let app = Application::build_with_notifier(test_config(&[]), notifications.clone())
            .await
            .expect("Failed to build test application");

        Self::start(app, notifications).await
    }

    /// Spawn the service with the real broker notifier pointed at `broker_url`.
    pub async fn spawn_with_broker(broker_url: &str) -> Self {
        let config = test_config(&[("NOTIFICATION_BROKER_URL", broker_url)]);
        let notifier = BrokerNotifier::new(config.broker.clone());
        let app = Application::build_with_notifier(config, Arc::new(notifier))
            .await
            .expect("Failed to build test application");

        Self::start(app, Arc::new(RecordingNotifier::default())).await
    }

    async fn start(app: Application, notifications: Arc<RecordingNotifier>) -> Self {
        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            client,
            notifications,
        }
    }

    pub async fn post_json(&self, path: &str, body: serde_json::Value) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.address, path))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_raw(&self, path: &str, body: &str) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.address, path))
            .header("content-type", "application/json")
            .body(body.to_string())
            .send()
            .await
            .expect("Failed to execute request")
    }
}
