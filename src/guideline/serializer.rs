//! Guideline string writer.
//!
//! Every event becomes `<seconds with 6 decimals>~0`, events are joined by `~`
//! and the whole string always ends with one extra `~`.
//! An empty track is therefore serialized as `~`.

use crate::guideline::click_event::ClickEvent;
use crate::guideline::MILLIS_PER_SECOND;

/// Suffix written after every timestamp
pub const EVENT_MARKER: &str = "~0";
pub const SEPARATOR: char = '~';

/// Serialize sorted click events, shifting each one by `offset_ms`.
///
/// Events pushed before the start of the track are clamped to zero.
pub fn serialize(events: &[ClickEvent], offset_ms: f64) -> String {
    let mut out = String::with_capacity(events.len() * 12 + 1);
    for (i, event) in events.iter().enumerate() {
        let millis = event.seconds * MILLIS_PER_SECOND + offset_ms;
        // also maps NaN and -0.0 to a plain zero
        let millis = if millis > 0.0 { millis } else { 0.0 };
        let seconds = millis / MILLIS_PER_SECOND;
        out.push_str(&format!("{seconds:.6}{EVENT_MARKER}"));
        if i + 1 < events.len() {
            out.push(SEPARATOR);
        }
    }
    out.push(SEPARATOR);
    out
}
