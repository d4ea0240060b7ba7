#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use telegen::format::{Dialect, encode_line};
use telegen::record::{EVENT_NAME_PREFIX, EXTRA_DATA_LEN, EventRecord};

#[derive(Debug, Arbitrary)]
struct Input {
    seed: u64,
    secs: u32,
    nanos: u32,
    legacy: bool,
}

// Build a record from a fuzzer-chosen seed and time, encode it, and check
// that the line parses back to the same record with fields in range.
fuzz_target!(|input: Input| {
    let Ok(now) = jiff::Timestamp::new(i64::from(input.secs), (input.nanos % 1_000_000_000) as i32)
    else {
        return;
    };
    let record = EventRecord::generate(&mut ChaCha8Rng::seed_from_u64(input.seed), now);
    assert!(record.event.telemetry_event_name.starts_with(EVENT_NAME_PREFIX));
    assert!(EXTRA_DATA_LEN.contains(&record.extra_data.len()));

    let dialect = if input.legacy {
        Dialect::Legacy
    } else {
        Dialect::Standard
    };
    let mut buf = Vec::new();
    encode_line(&record, dialect, &mut buf).unwrap();
    let parsed: EventRecord = serde_json::from_slice(&buf).unwrap();
    let parsed_time: jiff::Timestamp = parsed.event.platform_utc_time.parse().unwrap();
    assert_eq!(parsed_time.as_microsecond(), now.as_microsecond());
    assert_eq!(parsed.event.source_node_id, record.event.source_node_id);
    assert_eq!(parsed.event.target_node_id, record.event.target_node_id);
    assert_eq!(parsed.extra_data, record.extra_data);
});
