//! Cutover Date Value Object
//!
//! The "leak date": files touched after this instant are held to the strict
//! rules. Accepted spellings are unix seconds, RFC 3339 and `YYYY-MM-DD`
//! (midnight UTC).

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::RatchetError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CutoverDate(DateTime<Utc>);

impl CutoverDate {
    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self(at)
    }

    pub fn from_unix(seconds: i64) -> Option<Self> {
        Utc.timestamp_opt(seconds, 0).single().map(Self)
    }

    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// Value handed to `git log --since=`
    ///
    /// Unix seconds are unambiguous for git regardless of the local timezone.
    pub fn to_git_arg(&self) -> String {
        self.0.timestamp().to_string()
    }
}

impl FromStr for CutoverDate {
    type Err = RatchetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        let invalid = || RatchetError::InvalidLeakDate {
            value: s.to_string(),
        };

        if value.is_empty() {
            return Err(invalid());
        }

        if let Ok(seconds) = value.parse::<i64>() {
            return Self::from_unix(seconds).ok_or_else(invalid);
        }

        if let Ok(at) = DateTime::parse_from_rfc3339(value) {
            return Ok(Self(at.with_timezone(&Utc)));
        }

        if let Ok(day) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
            let midnight = day.and_hms_opt(0, 0, 0).ok_or_else(invalid)?;
            return Ok(Self(Utc.from_utc_datetime(&midnight)));
        }

        Err(invalid())
    }
}

impl fmt::Display for CutoverDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

impl Serialize for CutoverDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_rfc3339())
    }
}

/// Accepts a string in any supported spelling, or a bare TOML/JSON integer
impl<'de> Deserialize<'de> for CutoverDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Seconds(i64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Seconds(seconds) => Self::from_unix(seconds).ok_or_else(|| {
                serde::de::Error::custom(format!("leak date {} is out of range", seconds))
            }),
            Raw::Text(text) => text.parse().map_err(serde::de::Error::custom),
        }
    }
}
