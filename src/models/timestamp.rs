use std::fmt;

use chrono::{DateTime, Utc};
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, Unexpected, Visitor},
};

pub(crate) const EXPECTING: &str = "integer seconds since the Unix epoch";

/// A point in time carried on the wire as whole seconds since the Unix epoch.
///
/// Decoding `N` yields the instant `N` seconds after 1970-01-01T00:00:00Z and
/// encoding gives `N` back. Sub-second parts of instants built from a
/// [`DateTime`] are dropped on encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// `None` when `seconds` is outside the range chrono can represent.
    pub fn from_unix(seconds: i64) -> Option<Self> {
        DateTime::from_timestamp(seconds, 0).map(Self)
    }

    pub fn unix_seconds(&self) -> i64 {
        self.0.timestamp()
    }

    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    pub fn into_datetime(self) -> DateTime<Utc> {
        self.0
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self(DateTime::UNIX_EPOCH)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value)
    }
}

impl From<Timestamp> for DateTime<Utc> {
    fn from(value: Timestamp) -> Self {
        value.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(self.unix_seconds())
    }
}

struct TimestampVisitor;

impl Visitor<'_> for TimestampVisitor {
    type Value = Timestamp;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(EXPECTING)
    }

    fn visit_i64<E>(self, value: i64) -> Result<Timestamp, E>
    where
        E: de::Error,
    {
        Timestamp::from_unix(value)
            .ok_or_else(|| E::invalid_value(Unexpected::Signed(value), &self))
    }

    fn visit_u64<E>(self, value: u64) -> Result<Timestamp, E>
    where
        E: de::Error,
    {
        i64::try_from(value)
            .ok()
            .and_then(Timestamp::from_unix)
            .ok_or_else(|| E::invalid_value(Unexpected::Unsigned(value), &self))
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Timestamp, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_i64(TimestampVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn decodes_reference_instant() {
        let ts: Timestamp = serde_json::from_str("1511238729").unwrap();
        assert_eq!(ts.unix_seconds(), 1511238729);
        assert_eq!(ts.to_string(), "2017-11-21T04:32:09+00:00");
    }

    #[test]
    fn zero_is_the_epoch() {
        let ts: Timestamp = serde_json::from_str("0").unwrap();
        assert_eq!(ts, Timestamp::default());
        assert_eq!(*ts.as_datetime(), DateTime::UNIX_EPOCH);
    }

    #[test]
    fn negative_seconds_are_before_the_epoch() {
        let ts: Timestamp = serde_json::from_str("-86400").unwrap();
        assert_eq!(ts.to_string(), "1969-12-31T00:00:00+00:00");
        assert_eq!(serde_json::to_string(&ts).unwrap(), "-86400");
    }

    #[test]
    fn encode_drops_sub_second_precision() {
        let instant = DateTime::from_timestamp(1511238729, 999_000_000).unwrap();
        let ts = Timestamp::from(instant);
        assert_eq!(serde_json::to_string(&ts).unwrap(), "1511238729");
    }

    #[test]
    fn rejects_non_integer_representations() {
        for raw in ["1511238729.5", "\"1511238729\"", "true", "null", "[]"] {
            let err = serde_json::from_str::<Timestamp>(raw).unwrap_err();
            assert!(err.to_string().contains(EXPECTING), "{raw}: {err}");
        }
    }

    #[test]
    fn rejects_out_of_range_seconds() {
        assert!(Timestamp::from_unix(i64::MAX).is_none());
        let err = serde_json::from_str::<Timestamp>(&u64::MAX.to_string()).unwrap_err();
        assert!(err.to_string().contains(EXPECTING));
    }

    proptest! {
        #[test]
        fn round_trips_every_representable_second(seconds in -6_000_000_000_000i64..=6_000_000_000_000i64) {
            let ts: Timestamp = serde_json::from_str(&seconds.to_string()).unwrap();
            prop_assert_eq!(ts.unix_seconds(), seconds);
            prop_assert_eq!(serde_json::to_string(&ts).unwrap(), seconds.to_string());
        }
    }
}
