pub mod payment_id;
pub mod validated_json;

pub use payment_id::PaymentId;
pub use validated_json::ValidatedJson;
