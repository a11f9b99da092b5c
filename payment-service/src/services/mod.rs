pub mod metrics;
pub mod notifier;

pub use metrics::{get_metrics, init_metrics};
pub use notifier::{BrokerNotifier, NotificationError, Notifier};
