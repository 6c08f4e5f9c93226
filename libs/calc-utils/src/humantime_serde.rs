//! Serde adapter reading and writing `Duration` config values as humantime strings.
//!
//! ```
//! use serde::{Deserialize, Serialize};
//! use std::time::Duration;
//!
//! #[derive(Serialize, Deserialize)]
//! struct Limits {
//!     #[serde(with = "calc_utils::humantime_serde")]
//!     window: Duration,
//! }
//!
//! let limits: Limits = serde_json::from_str(r#"{"window":"1m 30s"}"#).unwrap();
//! assert_eq!(limits.window, Duration::from_secs(90));
//! ```
//!
//! Bare integers are accepted as whole seconds, which is what environment
//! overrides such as `CALC__CALCULATOR__RATE_LIMIT__WINDOW=30` produce.

use std::fmt;
use std::time::Duration;

use serde::{Deserializer, Serializer, de};

/// Serializes a `Duration` as a humantime string (`"1m 30s"`).
///
/// # Errors
/// Returns the serializer's error if writing the string fails.
#[allow(clippy::trivially_copy_pass_by_ref)] // serde requires &T signature
pub fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&humantime::format_duration(*value))
}

/// Deserializes a `Duration` from a humantime string or a number of seconds.
///
/// # Errors
/// Returns a serde error when the input is neither.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(DurationVisitor)
}

struct DurationVisitor;

impl de::Visitor<'_> for DurationVisitor {
    type Value = Duration;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a duration such as \"30s\" or a number of seconds")
    }

    fn visit_str<E>(self, v: &str) -> Result<Duration, E>
    where
        E: de::Error,
    {
        humantime::parse_duration(v.trim())
            .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Duration, E>
    where
        E: de::Error,
    {
        Ok(Duration::from_secs(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Duration, E>
    where
        E: de::Error,
    {
        u64::try_from(v)
            .map(Duration::from_secs)
            .map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use std::time::Duration;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Cfg {
        #[serde(with = "super")]
        window: Duration,
    }

    #[test]
    fn parses_humantime_strings() {
        let cfg: Cfg = serde_json::from_str(r#"{"window":"2m"}"#).unwrap();
        assert_eq!(cfg.window, Duration::from_secs(120));

        let cfg: Cfg = serde_json::from_str(r#"{"window":"250ms"}"#).unwrap();
        assert_eq!(cfg.window, Duration::from_millis(250));
    }

    #[test]
    fn parses_plain_seconds() {
        let cfg: Cfg = serde_json::from_str(r#"{"window":45}"#).unwrap();
        assert_eq!(cfg.window, Duration::from_secs(45));
    }

    #[test]
    fn rejects_garbage_and_negative_values() {
        assert!(serde_json::from_str::<Cfg>(r#"{"window":"soon"}"#).is_err());
        assert!(serde_json::from_str::<Cfg>(r#"{"window":-3}"#).is_err());
    }

    #[test]
    fn serializes_back_to_humantime() {
        let json = serde_json::to_string(&Cfg {
            window: Duration::from_secs(90),
        })
        .unwrap();
        assert_eq!(json, r#"{"window":"1m 30s"}"#);
    }
}
