//! Fractional Unix-epoch timestamps as used on the NinjaOne wire.
//!
//! The API encodes instants as JSON numbers holding seconds since the Unix
//! epoch with the sub-second part as a decimal fraction
//! (`1700666991.1700666`). `0` (or any non-positive number) means "no
//! timestamp". [`WireTime`] reads and writes exactly that form; the
//! fractional-epoch number is the only encoding this crate emits.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

const NANOS_PER_SEC: f64 = 1e9;

/// A timestamp that may be absent.
///
/// `WireTime::default()` is the zero value. It decodes from `0`, any
/// negative number, or `null`, and encodes as the integer `0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WireTime(Option<DateTime<Utc>>);

impl WireTime {
    /// The zero value ("no timestamp").
    pub const ZERO: WireTime = WireTime(None);

    /// Wraps an instant.
    pub fn new(at: DateTime<Utc>) -> Self {
        WireTime(Some(at))
    }

    /// Returns `true` for the zero value.
    pub fn is_zero(&self) -> bool {
        self.0.is_none()
    }

    /// The instant, or `None` for the zero value.
    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        self.0
    }

    /// Interprets a fractional epoch number. Non-positive input yields the
    /// zero value; so does input outside chrono's representable range.
    pub fn from_epoch_f64(value: f64) -> Self {
        if !value.is_finite() || value <= 0.0 {
            return WireTime::ZERO;
        }
        let secs = value.trunc();
        let nanos = ((value - secs) * NANOS_PER_SEC) as u32;
        WireTime(DateTime::from_timestamp(secs as i64, nanos.min(999_999_999)))
    }

    /// The fractional epoch number for this instant, `0.0` for zero.
    pub fn to_epoch_f64(&self) -> f64 {
        match self.0 {
            Some(at) => {
                at.timestamp() as f64 + f64::from(at.timestamp_subsec_nanos()) / NANOS_PER_SEC
            }
            None => 0.0,
        }
    }
}

impl From<DateTime<Utc>> for WireTime {
    fn from(at: DateTime<Utc>) -> Self {
        WireTime::new(at)
    }
}

impl From<Option<DateTime<Utc>>> for WireTime {
    fn from(at: Option<DateTime<Utc>>) -> Self {
        WireTime(at)
    }
}

impl fmt::Display for WireTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(at) => f.write_str(&at.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            None => f.write_str("-"),
        }
    }
}

impl Serialize for WireTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Some(_) => serializer.serialize_f64(self.to_epoch_f64()),
            None => serializer.serialize_i64(0),
        }
    }
}

struct WireTimeVisitor;

impl<'de> Visitor<'de> for WireTimeVisitor {
    type Value = WireTime;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a Unix epoch number or null")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<WireTime, E> {
        Ok(WireTime::from_epoch_f64(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<WireTime, E> {
        if v <= 0 {
            return Ok(WireTime::ZERO);
        }
        Ok(WireTime(DateTime::from_timestamp(v, 0)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<WireTime, E> {
        match i64::try_from(v) {
            Ok(v) => self.visit_i64(v),
            Err(_) => Ok(WireTime::ZERO),
        }
    }

    fn visit_unit<E: de::Error>(self) -> Result<WireTime, E> {
        Ok(WireTime::ZERO)
    }

    fn visit_none<E: de::Error>(self) -> Result<WireTime, E> {
        Ok(WireTime::ZERO)
    }
}

impl<'de> Deserialize<'de> for WireTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(WireTimeVisitor)
    }
}
