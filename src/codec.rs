//! JSON encoding and decoding of webhook payloads.

use serde::de::Error as _;
use serde_json::{Value, error::Category};
use tracing::debug;

use crate::{
    errors::{HookError, Result},
    models::{WebhookPayload, event_type, timestamp},
};

/// Decode a raw request body into a [`WebhookPayload`].
///
/// The body must be a JSON object. Fields the document leaves out decode to
/// their zero values.
pub fn decode(raw: &[u8]) -> Result<WebhookPayload> {
    decode_object(raw).inspect_err(|err| debug!(error = %err, "failed to decode webhook payload"))
}

fn decode_object(raw: &[u8]) -> Result<WebhookPayload> {
    let document: Value = serde_json::from_slice(raw).map_err(HookError::MalformedPayload)?;
    if !document.is_object() {
        return Err(HookError::MalformedPayload(serde_json::Error::custom(
            format!("expected a JSON object, got {}", kind_of(&document)),
        )));
    }
    serde_json::from_value(document).map_err(classify)
}

/// Encode a payload the way ChatWork sends it, omitting absent optional fields.
pub fn encode(payload: &WebhookPayload) -> Result<Vec<u8>> {
    serde_json::to_vec(payload).map_err(HookError::Encode)
}

/// Split serde_json data errors into the event type and timestamp cases;
/// everything else is a malformed document.
///
/// serde_json only exposes the message text, so the match relies on the
/// visitors' `EXPECTING` strings and on serde's `unknown variant` wording.
/// The decode tests for each error kind pin that contract.
fn classify(err: serde_json::Error) -> HookError {
    if err.classify() != Category::Data {
        return HookError::MalformedPayload(err);
    }

    let message = err.to_string();
    if message.starts_with("unknown variant") || expects(&message, event_type::EXPECTING) {
        HookError::InvalidEventType(message)
    } else if expects(&message, timestamp::EXPECTING) {
        HookError::InvalidTimestamp(message)
    } else {
        HookError::MalformedPayload(err)
    }
}

fn expects(message: &str, expecting: &str) -> bool {
    message
        .strip_suffix(expecting)
        .is_some_and(|rest| rest.ends_with("expected "))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
