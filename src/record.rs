//! Synthetic telemetry event records.
//!
//! A record is built from an explicitly passed RNG and a creation timestamp,
//! serialized once and dropped. Field contents carry no meaning beyond
//! looking like a platform event log entry and filling bytes.

use std::ops::RangeInclusive;

use jiff::Timestamp;
use jiff::tz::TimeZone;
use rand::Rng;
use rand::distributions::Alphanumeric;
use serde::Deserialize;

/// Literal prefix of every `telemetryEventName`.
pub const EVENT_NAME_PREFIX: &str = "TestEvent-";

/// Number of random characters after [`EVENT_NAME_PREFIX`].
pub const EVENT_NAME_SUFFIX_LEN: usize = 10;

/// Alphabet of the event name suffix.
pub const EVENT_NAME_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length range of the `extra_data` filler, inclusive on both ends.
pub const EXTRA_DATA_LEN: RangeInclusive<usize> = 900..=1900;

/// One line of the generated log.
///
/// Deserialization accepts both the standard key spellings and the legacy
/// ones (`paltformUtcTime`, `SourcenodeId`, `TargetnodeId`), so either
/// dialect parses back into the same value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EventRecord {
    #[serde(rename = "Event")]
    pub event: Event,
    pub extra_data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Event {
    #[serde(rename = "platformUtcTime", alias = "paltformUtcTime")]
    pub platform_utc_time: String,
    #[serde(rename = "telemetryEventName")]
    pub telemetry_event_name: String,
    #[serde(rename = "sourceNodeId", alias = "SourcenodeId")]
    pub source_node_id: u64,
    #[serde(rename = "targetNodeId", alias = "TargetnodeId")]
    pub target_node_id: u64,
}

impl EventRecord {
    /// Build a record stamped with `now`.
    ///
    /// Entropy is consumed in field order: event name, source id, target id,
    /// filler length, filler bytes. Two RNGs in the same state therefore
    /// yield the same random fields.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, now: Timestamp) -> Self {
        let telemetry_event_name = event_name(rng);
        let source_node_id = rng.next_u64();
        let target_node_id = rng.next_u64();
        let len = rng.gen_range(EXTRA_DATA_LEN);
        let extra_data = (0..len)
            .map(|_| char::from(rng.sample(Alphanumeric)))
            .collect();

        Self {
            event: Event {
                platform_utc_time: format_utc(now),
                telemetry_event_name,
                source_node_id,
                target_node_id,
            },
            extra_data,
        }
    }

    /// Build a record stamped with the current wall-clock time.
    pub fn now<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::generate(rng, Timestamp::now())
    }
}

fn event_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut name = String::with_capacity(EVENT_NAME_PREFIX.len() + EVENT_NAME_SUFFIX_LEN);
    name.push_str(EVENT_NAME_PREFIX);
    for _ in 0..EVENT_NAME_SUFFIX_LEN {
        let idx = rng.gen_range(0..EVENT_NAME_CHARSET.len());
        name.push(char::from(EVENT_NAME_CHARSET[idx]));
    }
    name
}

/// Render `ts` as `YYYY-MM-DDTHH:MM:SS.ffffffZ` in UTC.
///
/// Microseconds are always printed, including `.000000`, so every
/// timestamp in a file has the same width.
pub fn format_utc(ts: Timestamp) -> String {
    ts.to_zoned(TimeZone::UTC)
        .strftime("%Y-%m-%dT%H:%M:%S%.6fZ")
        .to_string()
}
