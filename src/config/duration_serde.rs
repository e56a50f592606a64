//! Serde helpers for human-readable durations in configuration.

use serde::de::{self, Visitor};
use serde::{Deserializer, Serializer};
use std::{fmt, time::Duration};

/// Serialize a Duration as a humantime string ("10m", "15s") and accept
/// either that form or a plain number of seconds when deserializing.
pub mod duration {
    use super::*;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let duration_str = humantime::format_duration(*duration).to_string();
        serializer.serialize_str(&duration_str)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DurationVisitor;

        impl Visitor<'_> for DurationVisitor {
            type Value = Duration;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a duration as seconds (number) or human-readable string (e.g., '30s', '10m')")
            }

            fn visit_u64<E>(self, seconds: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Duration::from_secs(seconds))
            }

            fn visit_i64<E>(self, seconds: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                u64::try_from(seconds)
                    .map(Duration::from_secs)
                    .map_err(|_| de::Error::custom(format!("Negative duration: {seconds}")))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                humantime::parse_duration(value)
                    .map_err(|e| de::Error::custom(format!("Invalid duration '{value}': {e}")))
            }
        }

        deserializer.deserialize_any(DurationVisitor)
    }
}

/// Parse a humantime default, used by the `default_*` functions
pub(crate) fn parse_default(value: &str) -> Duration {
    humantime::parse_duration(value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use std::time::Duration;

    #[derive(Debug, Serialize, Deserialize)]
    struct Holder {
        #[serde(with = "super::duration")]
        ttl: Duration,
    }

    #[test]
    fn accepts_human_strings_and_seconds() {
        let h: Holder = toml::from_str(r#"ttl = "10m""#).unwrap();
        assert_eq!(h.ttl, Duration::from_secs(600));

        let h: Holder = toml::from_str("ttl = 45").unwrap();
        assert_eq!(h.ttl, Duration::from_secs(45));
    }

    #[test]
    fn rejects_garbage() {
        assert!(toml::from_str::<Holder>(r#"ttl = "soon""#).is_err());
    }

    #[test]
    fn serializes_as_human_string() {
        let out = toml::to_string(&Holder {
            ttl: Duration::from_secs(30),
        })
        .unwrap();
        assert!(out.contains(r#"ttl = "30s""#));
    }
}
