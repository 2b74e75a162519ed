use serde::{Deserialize, Deserializer, Serialize};

use super::{event_type::EventType, timestamp::Timestamp};

/// Body of a webhook notification.
///
/// Which fields are present depends on the event type: `account_id` is absent
/// for [`EventType::MentionToMe`], while `from_account_id` and `to_account_id`
/// are only sent with it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub send_time: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_account_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_account_id: Option<i64>,
}

/// Top-level webhook document.
///
/// Missing fields decode to their zero values instead of failing. An explicit
/// `null` setting id or event does the same.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookPayload {
    #[serde(rename = "webhook_setting_id", deserialize_with = "null_as_default")]
    pub setting_id: String,
    #[serde(rename = "webhook_event_type")]
    pub event_type: EventType,
    #[serde(rename = "webhook_event_time")]
    pub event_time: Timestamp,
    #[serde(rename = "webhook_event", deserialize_with = "null_as_default")]
    pub event: WebhookEvent,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
