pub mod event_type;
pub mod payload;
pub mod timestamp;

pub use event_type::{EventType, UnknownEventType};
pub use payload::{WebhookEvent, WebhookPayload};
pub use timestamp::Timestamp;
