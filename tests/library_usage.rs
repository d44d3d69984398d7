//! Integration tests for osuguide library usage.
//!
//! These tests verify that the library can be used as a dependency
//! from external projects.

use osuguide::{
    import_guidelines, parse_osu_data, parse_osu_file, serialize, Beatmap, ClickEvent,
    ClickEventType, GuideError, DEFAULT_BEAT_LENGTH,
};
use std::io::Read;

/// Test that all major types are accessible from the library.
#[test]
fn test_types_accessible() {
    // If any re-export is missing, this test will fail to compile.
    fn _assert_types() {
        let _: fn(&[u8]) -> Result<Beatmap, GuideError> = parse_osu_data;
        let _: fn(&[ClickEvent], f64) -> String = serialize;
        let _: f64 = DEFAULT_BEAT_LENGTH;
    }
}

/// Test parsing a beatmap read by the caller.
#[test]
fn test_parse_osu_bytes() {
    let mut file = std::fs::File::open("test-files/sample.osu").expect("Failed to open test file");
    let mut file_data: Vec<u8> = vec![];
    file.read_to_end(&mut file_data)
        .expect("Failed to read test file");

    let beatmap = parse_osu_data(&file_data).expect("Failed to parse beatmap");

    assert!(
        !beatmap.click_events.is_empty(),
        "Beatmap should have click events"
    );
    // sorted by time
    assert!(beatmap
        .click_events
        .windows(2)
        .all(|w| w[0].seconds <= w[1].seconds));
    let has_slider_repeat = beatmap
        .click_events
        .iter()
        .any(|e| e.kind == ClickEventType::SliderRepeat);
    assert!(has_slider_repeat, "Should have SliderRepeat events");
}

/// Test the guideline string format produced from a file.
#[test]
fn test_guideline_string() {
    let beatmap = parse_osu_file("test-files/sample.osu").expect("Failed to parse beatmap");
    let guidelines = beatmap.guideline_string(0.0);

    assert!(guidelines.ends_with('~'));
    assert!(!guidelines.contains("~~"));
    let entries: Vec<&str> = guidelines
        .trim_end_matches('~')
        .split('~')
        .collect::<Vec<_>>()
        .chunks(2)
        .map(|pair| {
            assert_eq!(pair[1], "0");
            pair[0]
        })
        .collect();
    assert_eq!(entries.len(), beatmap.click_events.len());
    for entry in entries {
        let (_, fraction) = entry.split_once('.').expect("decimal point");
        assert_eq!(fraction.len(), 6, "entry: {entry}");
    }
}

/// Shifting the offset shifts every timestamp, until clamping kicks in.
#[test]
fn test_offset_shift() {
    let events = [
        ClickEvent::new(0.2, ClickEventType::HitCircle),
        ClickEvent::new(1.0, ClickEventType::SliderStart),
    ];
    assert_eq!(serialize(&events, 0.0), "0.200000~0~1.000000~0~");
    assert_eq!(serialize(&events, 500.0), "0.700000~0~1.500000~0~");
    assert_eq!(serialize(&events, -500.0), "0.000000~0~0.500000~0~");
}

/// Test error handling for invalid data.
#[test]
fn test_parse_error() {
    let result = parse_osu_data(b"not a beatmap\n[HitObjects]\n0,0,0,1,0\n");
    assert!(
        matches!(result, Err(GuideError::InvalidFormat(_))),
        "Should be an InvalidFormat error"
    );

    let result = import_guidelines("test-files/does_not_exist.osu", 0.0);
    assert!(
        matches!(result, Err(GuideError::IoFailure(_))),
        "Should be an IoFailure"
    );
}
