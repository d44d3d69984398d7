//! osuguide - osu! beatmap to editor guideline converter
//!
//! This library provides:
//! - Parsing of `.osu` beatmaps into time-ordered click events
//! - Serialization of click events into a `~` delimited guideline string
//! - Import helpers for host applications, including background imports
//!
//! # Example
//!
//! ```no_run
//! use osuguide::parse_osu_file;
//!
//! let beatmap = parse_osu_file("song.osu").unwrap();
//! let guidelines = beatmap.guideline_string(0.0);
//! ```

pub mod error;
pub mod guideline;
pub mod import;
pub mod parser;

// Re-export main types for convenience
pub use error::GuideError;
pub use guideline::{
    click_event::{ClickEvent, ClickEventType},
    serializer::serialize,
};
pub use import::{
    import_guidelines, parse_offset_input, spawn_import, ImportStatus, PendingImport,
};
pub use parser::beatmap_parser::{
    beat_length_at, parse_osu_data, parse_osu_file, parse_osu_str, Beatmap, BeatmapParser,
    FieldDecodeWarning, HitObjectKind, TimingPoint, DEFAULT_BEAT_LENGTH, SLIDER_MULTIPLIER,
};
