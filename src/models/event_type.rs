use std::{fmt, str::FromStr};

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, Visitor},
};

/// Kind of notification ChatWork delivered.
///
/// The wire form is always one of the three snake-case literals; anything else
/// is rejected on decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EventType {
    /// A missing `webhook_event_type` decodes to this variant.
    #[default]
    MessageCreated = 0,
    MessageUpdated = 1,
    MentionToMe = 2,
}

/// Wire literals, indexed by the variant discriminant.
const WIRE_NAMES: &[&str] = &["message_created", "message_updated", "mention_to_me"];

impl EventType {
    pub const ALL: [EventType; 3] = [
        Self::MessageCreated,
        Self::MessageUpdated,
        Self::MentionToMe,
    ];

    pub fn as_str(self) -> &'static str {
        WIRE_NAMES[self as usize]
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown event type `{0}`")]
pub struct UnknownEventType(pub String);

impl FromStr for EventType {
    type Err = UnknownEventType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|event_type| event_type.as_str() == s)
            .ok_or_else(|| UnknownEventType(s.to_string()))
    }
}

impl Serialize for EventType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

pub(crate) const EXPECTING: &str = "a webhook event type string";

struct EventTypeVisitor;

impl Visitor<'_> for EventTypeVisitor {
    type Value = EventType;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(EXPECTING)
    }

    fn visit_str<E>(self, value: &str) -> Result<EventType, E>
    where
        E: de::Error,
    {
        value
            .parse()
            .map_err(|_| E::unknown_variant(value, WIRE_NAMES))
    }
}

impl<'de> Deserialize<'de> for EventType {
    fn deserialize<D>(deserializer: D) -> Result<EventType, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(EventTypeVisitor)
    }
}
