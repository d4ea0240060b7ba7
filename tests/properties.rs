/// Property-based tests: for arbitrary seeds and timestamps, generated
/// records and encoded lines keep their documented shape.
use jiff::Timestamp;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use telegen::format::{Dialect, encode_line};
use telegen::record::{EVENT_NAME_PREFIX, EVENT_NAME_SUFFIX_LEN, EXTRA_DATA_LEN, EventRecord};
use telegen::write_records;

fn record_config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

fn arb_dialect() -> impl Strategy<Value = Dialect> {
    prop_oneof![Just(Dialect::Standard), Just(Dialect::Legacy)]
}

/// Seconds between 1970 and 2100.
fn arb_timestamp() -> impl Strategy<Value = Timestamp> {
    (0i64..4_102_444_800, 0i32..1_000_000_000)
        .prop_map(|(secs, nanos)| Timestamp::new(secs, nanos).unwrap())
}

proptest! {
    #![proptest_config(record_config())]

    #[test]
    fn legacy_whole_seconds_have_no_fraction(seed in any::<u64>(), secs in 0i64..4_102_444_800) {
        let now = Timestamp::from_second(secs).unwrap();
        let record = EventRecord::generate(&mut ChaCha8Rng::seed_from_u64(seed), now);
        let mut buf = Vec::new();
        encode_line(&record, Dialect::Legacy, &mut buf).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        let time = value["Event"]["paltformUtcTime"].as_str().unwrap();
        prop_assert_eq!(time.len(), "2000-01-01T00:00:00Z".len());
        prop_assert_eq!(time.parse::<Timestamp>().unwrap(), now);
    }

    #[test]
    fn record_fields_in_range(seed in any::<u64>(), now in arb_timestamp()) {
        let record = EventRecord::generate(&mut ChaCha8Rng::seed_from_u64(seed), now);

        let suffix = record.event.telemetry_event_name.strip_prefix(EVENT_NAME_PREFIX);
        prop_assert!(suffix.is_some());
        let suffix = suffix.unwrap();
        prop_assert_eq!(suffix.len(), EVENT_NAME_SUFFIX_LEN);
        prop_assert!(suffix.bytes().all(|b| b.is_ascii_uppercase() || b.is_ascii_digit()));

        prop_assert!(EXTRA_DATA_LEN.contains(&record.extra_data.len()));
        prop_assert!(record.extra_data.bytes().all(|b| b.is_ascii_alphanumeric()));

        let ts = &record.event.platform_utc_time;
        prop_assert_eq!(ts.len(), "2000-01-01T00:00:00.000000Z".len());
        prop_assert!(ts.ends_with('Z'));
        let reparsed: Timestamp = ts.parse().unwrap();
        prop_assert_eq!(reparsed.as_microsecond(), now.as_microsecond());
    }

    #[test]
    fn encoded_line_parses_back(
        seed in any::<u64>(),
        now in arb_timestamp(),
        dialect in arb_dialect(),
    ) {
        let record = EventRecord::generate(&mut ChaCha8Rng::seed_from_u64(seed), now);
        let mut buf = Vec::new();
        encode_line(&record, dialect, &mut buf).unwrap();

        prop_assert_eq!(buf.last(), Some(&b'\n'));
        prop_assert_eq!(buf.iter().filter(|&&b| b == b'\n').count(), 1);
        let parsed: EventRecord = serde_json::from_slice(&buf).unwrap();
        // The legacy dialect may shorten a whole-second timestamp; compare instants.
        let parsed_time: Timestamp = parsed.event.platform_utc_time.parse().unwrap();
        let record_time: Timestamp = record.event.platform_utc_time.parse().unwrap();
        prop_assert_eq!(parsed_time, record_time);
        prop_assert_eq!(&parsed.event.telemetry_event_name, &record.event.telemetry_event_name);
        prop_assert_eq!(parsed.event.source_node_id, record.event.source_node_id);
        prop_assert_eq!(parsed.event.target_node_id, record.event.target_node_id);
        prop_assert_eq!(&parsed.extra_data, &record.extra_data);
    }

    #[test]
    fn output_meets_target(
        seed in any::<u64>(),
        target in 0u64..20_000,
        dialect in arb_dialect(),
    ) {
        let mut buf = Vec::new();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let summary = write_records(&mut buf, target, dialect, &mut rng).unwrap();

        prop_assert_eq!(summary.bytes, buf.len() as u64);
        prop_assert!(summary.bytes >= target);
        prop_assert_eq!(summary.records == 0, target == 0);
    }
}
