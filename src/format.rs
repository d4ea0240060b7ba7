//! Line encoding for event records.
//!
//! Writes a record as one JSON object plus a trailing `\n` into a reusable
//! buffer. Two dialects exist: `standard` uses the documented key spellings
//! and compact separators; `legacy` reproduces the old generator's output
//! byte for byte, misspelled keys and `", "` / `": "` separators included,
//! and writes whole-second timestamps without a fraction.
use std::borrow::Cow;
use std::fmt;
use std::io;
use std::str::FromStr;

use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde_json::ser::Formatter;

use crate::record::{Event, EventRecord};

/// Output dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    /// `platformUtcTime` / `sourceNodeId` / `targetNodeId`, compact JSON.
    #[default]
    Standard,
    /// `paltformUtcTime` / `SourcenodeId` / `TargetnodeId`, spaced separators,
    /// no fraction on whole-second timestamps.
    Legacy,
}

impl Dialect {
    fn keys(self) -> &'static EventKeys {
        match self {
            Dialect::Standard => &STANDARD_KEYS,
            Dialect::Legacy => &LEGACY_KEYS,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Dialect::Standard => "standard",
            Dialect::Legacy => "legacy",
        })
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Dialect::Standard),
            "legacy" => Ok(Dialect::Legacy),
            other => Err(format!(
                "unknown dialect: {other} (expected `standard` or `legacy`)"
            )),
        }
    }
}

/// Per-dialect key spellings and timestamp form of the nested `Event` object.
struct EventKeys {
    platform_utc_time: &'static str,
    source_node_id: &'static str,
    target_node_id: &'static str,
    /// Write `...:20Z` instead of `...:20.000000Z`.
    trim_zero_fraction: bool,
}

static STANDARD_KEYS: EventKeys = EventKeys {
    platform_utc_time: "platformUtcTime",
    source_node_id: "sourceNodeId",
    target_node_id: "targetNodeId",
    trim_zero_fraction: false,
};

static LEGACY_KEYS: EventKeys = EventKeys {
    platform_utc_time: "paltformUtcTime",
    source_node_id: "SourcenodeId",
    target_node_id: "TargetnodeId",
    trim_zero_fraction: true,
};

struct KeyedRecord<'a> {
    record: &'a EventRecord,
    keys: &'static EventKeys,
}

struct KeyedEvent<'a> {
    event: &'a Event,
    keys: &'static EventKeys,
}

impl Serialize for KeyedRecord<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("EventRecord", 2)?;
        s.serialize_field(
            "Event",
            &KeyedEvent {
                event: &self.record.event,
                keys: self.keys,
            },
        )?;
        s.serialize_field("extra_data", &self.record.extra_data)?;
        s.end()
    }
}

impl Serialize for KeyedEvent<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Event", 4)?;
        let time = match self.event.platform_utc_time.strip_suffix(".000000Z") {
            Some(whole) if self.keys.trim_zero_fraction => Cow::Owned(format!("{whole}Z")),
            _ => Cow::Borrowed(self.event.platform_utc_time.as_str()),
        };
        s.serialize_field(self.keys.platform_utc_time, &*time)?;
        s.serialize_field("telemetryEventName", &self.event.telemetry_event_name)?;
        s.serialize_field(self.keys.source_node_id, &self.event.source_node_id)?;
        s.serialize_field(self.keys.target_node_id, &self.event.target_node_id)?;
        s.end()
    }
}

/// serde_json formatter emitting `", "` between members and `": "` after
/// keys, on a single line.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }
}

/// Encode `record` as one newline-terminated line, replacing the contents
/// of `buf`.
pub fn encode_line(
    record: &EventRecord,
    dialect: Dialect,
    buf: &mut Vec<u8>,
) -> serde_json::Result<()> {
    buf.clear();
    let keyed = KeyedRecord {
        record,
        keys: dialect.keys(),
    };
    match dialect {
        Dialect::Standard => serde_json::to_writer(&mut *buf, &keyed)?,
        Dialect::Legacy => {
            let mut ser = serde_json::Serializer::with_formatter(&mut *buf, SpacedFormatter);
            keyed.serialize(&mut ser)?;
        }
    }
    buf.push(b'\n');
    Ok(())
}
