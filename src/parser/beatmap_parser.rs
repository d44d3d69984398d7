use crate::guideline::click_event::{ClickEvent, ClickEventType};
use crate::guideline::serializer::serialize;
use crate::guideline::MILLIS_PER_SECOND;
use crate::parser::primitive_parser::{
    decode_text, is_ignored_line, parse_float, parse_int, parse_section_header, strip_line,
};
use crate::GuideError;
use std::io::Read;
use std::path::Path;

// format reference at <https://osu.ppy.sh/wiki/en/Client/File_formats/osu_%28file_format%29>

pub const OSU_EXTENSION: &str = "osu";
pub const FORMAT_HEADER: &str = "osu file format";

/// Beat length used before the first uninherited timing point
pub const DEFAULT_BEAT_LENGTH: f64 = 500.0;
/// Slider velocity multiplier, the `[Difficulty]` section is not consulted
pub const SLIDER_MULTIPLIER: f64 = 1.4;

pub const TIMING_POINT_FIELDS: usize = 8;
pub const HIT_OBJECT_FIELDS: usize = 4;
const SLIDER_FIELDS: usize = 8;
const END_TIME_FIELDS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingPoint {
    pub time: i32,
    pub beat_length: f64,
    pub meter: i32,
    pub sample_set: i32,
    pub sample_index: i32,
    pub volume: i32,
    pub uninherited: bool,
    pub effects: i32,
}

impl TimingPoint {
    /// `time,beatLength,meter,sampleSet,sampleIndex,volume,uninherited,effects`
    fn from_fields(fields: &[&str]) -> Result<Self, &'static str> {
        Ok(Self {
            time: int_field(fields, 0, "timing point time")?,
            beat_length: float_field(fields, 1, "timing point beat length")?,
            meter: int_field(fields, 2, "timing point meter")?,
            sample_set: int_field(fields, 3, "timing point sample set")?,
            sample_index: int_field(fields, 4, "timing point sample index")?,
            volume: int_field(fields, 5, "timing point volume")?,
            uninherited: int_field(fields, 6, "timing point uninherited")? == 1,
            effects: int_field(fields, 7, "timing point effects")?,
        })
    }
}

/// Beat length in effect at `time`.
///
/// Timing points are expected in ascending time order, the scan stops at the first later point.
pub fn beat_length_at(timing_points: &[TimingPoint], time: i32) -> f64 {
    timing_points
        .iter()
        .take_while(|tp| tp.time <= time)
        .filter(|tp| tp.uninherited)
        .last()
        .map_or(DEFAULT_BEAT_LENGTH, |tp| tp.beat_length)
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum HitObjectKind {
    HitCircle,
    Slider,
    Spinner,
    Hold,
}

impl HitObjectKind {
    const HIT_CIRCLE_BIT: i32 = 1;
    const SLIDER_BIT: i32 = 1 << 1;
    const SPINNER_BIT: i32 = 1 << 3;
    const HOLD_BIT: i32 = 1 << 7;

    /// First matching bit wins, combined types are never produced.
    pub const fn from_type_bits(bits: i32) -> Option<Self> {
        if bits & Self::HIT_CIRCLE_BIT != 0 {
            Some(Self::HitCircle)
        } else if bits & Self::SLIDER_BIT != 0 {
            Some(Self::Slider)
        } else if bits & Self::SPINNER_BIT != 0 {
            Some(Self::Spinner)
        } else if bits & Self::HOLD_BIT != 0 {
            Some(Self::Hold)
        } else {
            None
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum BeatmapSection {
    /// Before the first section header
    #[default]
    Preamble,
    TimingPoints,
    HitObjects,
    /// Any section without a handler
    Other,
}

impl BeatmapSection {
    fn from_name(name: &str) -> Self {
        match name {
            "TimingPoints" => Self::TimingPoints,
            "HitObjects" => Self::HitObjects,
            _ => Self::Other,
        }
    }
}

/// A line skipped because one of its numeric fields could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line_number}: invalid {field} in {line:?}")]
pub struct FieldDecodeWarning {
    pub line_number: usize,
    pub field: &'static str,
    pub line: String,
}

#[derive(Debug, Default, PartialEq)]
pub struct Beatmap {
    pub timing_points: Vec<TimingPoint>,
    /// Sorted by time, ties keep their parsing order
    pub click_events: Vec<ClickEvent>,
    pub warnings: Vec<FieldDecodeWarning>,
}

impl Beatmap {
    pub fn click_times(&self) -> Vec<f64> {
        self.click_events.iter().map(|e| e.seconds).collect()
    }

    pub fn guideline_string(&self, offset_ms: f64) -> String {
        serialize(&self.click_events, offset_ms)
    }

    pub fn log_click_events(&self) {
        log::debug!("Click times (in seconds):");
        for event in &self.click_events {
            log::debug!("{event}");
        }
        log::debug!("Total events: {}", self.click_events.len());
    }
}

/// Single pass line parser, can be reused across files.
#[derive(Debug, Default)]
pub struct BeatmapParser {
    section: BeatmapSection,
    beatmap: Beatmap,
}

impl BeatmapParser {
    pub const fn new() -> Self {
        Self {
            section: BeatmapSection::Preamble,
            beatmap: Beatmap {
                timing_points: Vec::new(),
                click_events: Vec::new(),
                warnings: Vec::new(),
            },
        }
    }

    pub fn take_beatmap(&mut self) -> Beatmap {
        std::mem::take(&mut self.beatmap)
    }

    /// Clear everything left over from a previous file
    pub fn reset(&mut self) {
        self.section = BeatmapSection::Preamble;
        self.beatmap.timing_points.clear();
        self.beatmap.click_events.clear();
        self.beatmap.warnings.clear();
    }

    pub fn parse_text(&mut self, text: &str) -> Result<(), GuideError> {
        self.reset();
        let first_line = text.lines().next().map(strip_line).unwrap_or_default();
        if !first_line.contains(FORMAT_HEADER) {
            return Err(GuideError::InvalidFormat(format!(
                "missing '{FORMAT_HEADER}' header, found {first_line:?}"
            )));
        }

        for (index, raw_line) in text.lines().enumerate() {
            let line = strip_line(raw_line);
            if is_ignored_line(line) {
                continue;
            }
            if let Some(name) = parse_section_header(line) {
                self.section = BeatmapSection::from_name(name);
                log::debug!("Entering section [{name}] -> {:?}", self.section);
                continue;
            }
            let decoded = match self.section {
                BeatmapSection::TimingPoints => self.parse_timing_point(line),
                BeatmapSection::HitObjects => self.parse_hit_object(line),
                BeatmapSection::Preamble | BeatmapSection::Other => Ok(()),
            };
            if let Err(field) = decoded {
                let warning = FieldDecodeWarning {
                    line_number: index + 1,
                    field,
                    line: line.to_string(),
                };
                log::warn!("Skipping {warning}");
                self.beatmap.warnings.push(warning);
            }
        }

        // stable sort, simultaneous events keep their emission order
        self.beatmap
            .click_events
            .sort_by(|a, b| a.seconds.total_cmp(&b.seconds));
        log::debug!(
            "Parsed {} timing points and {} click events ({} lines skipped)",
            self.beatmap.timing_points.len(),
            self.beatmap.click_events.len(),
            self.beatmap.warnings.len()
        );
        Ok(())
    }

    fn parse_timing_point(&mut self, line: &str) -> Result<(), &'static str> {
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() < TIMING_POINT_FIELDS {
            return Ok(());
        }
        let timing_point = TimingPoint::from_fields(&fields)?;
        self.beatmap.timing_points.push(timing_point);
        Ok(())
    }

    /// `x,y,time,type,hitSound,objectParams...`
    ///
    /// The start event is kept even when the extra fields fail to decode.
    fn parse_hit_object(&mut self, line: &str) -> Result<(), &'static str> {
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() < HIT_OBJECT_FIELDS {
            return Ok(());
        }
        let _x = int_field(&fields, 0, "hit object x coordinate")?;
        let _y = int_field(&fields, 1, "hit object y coordinate")?;
        let time = int_field(&fields, 2, "hit object time")?;
        let type_bits = int_field(&fields, 3, "hit object type")?;

        let Some(kind) = HitObjectKind::from_type_bits(type_bits) else {
            log::debug!("Ignoring hit object with type {type_bits} at {time}ms");
            return Ok(());
        };
        match kind {
            HitObjectKind::HitCircle => self.push_event(time, ClickEventType::HitCircle),
            HitObjectKind::Slider => {
                self.push_event(time, ClickEventType::SliderStart);
                if fields.len() >= SLIDER_FIELDS {
                    let repeats = int_field(&fields, 6, "slider repeats")?;
                    let pixel_length = float_field(&fields, 7, "slider pixel length")?;
                    self.push_slider_events(time, repeats, pixel_length);
                }
            }
            HitObjectKind::Spinner => {
                self.push_event(time, ClickEventType::SpinnerStart);
                if fields.len() >= END_TIME_FIELDS {
                    let end_time = int_field(&fields, 5, "spinner end time")?;
                    self.push_event(end_time, ClickEventType::SpinnerEnd);
                }
            }
            HitObjectKind::Hold => {
                self.push_event(time, ClickEventType::HoldStart);
                // `endTime:hitSample`, no separator means no end event
                if let Some((end_time, _)) = fields.get(5).and_then(|f| f.split_once(':')) {
                    let end_time = parse_int(end_time)
                        .map(|(_, v)| v)
                        .map_err(|_| "hold note end time")?;
                    self.push_event(end_time, ClickEventType::HoldEnd);
                }
            }
        }
        Ok(())
    }

    fn push_slider_events(&mut self, time: i32, repeats: i32, pixel_length: f64) {
        let start = f64::from(time) / MILLIS_PER_SECOND;
        let beat_length = beat_length_at(&self.beatmap.timing_points, time);
        let slider_duration = (pixel_length / (100.0 * SLIDER_MULTIPLIER)) * beat_length;
        let total_duration = slider_duration * f64::from(repeats);

        let events = &mut self.beatmap.click_events;
        events.push(ClickEvent::new(
            start + total_duration / MILLIS_PER_SECOND,
            ClickEventType::SliderEnd,
        ));
        // one repeat less than the number of traversals
        for i in 1..repeats {
            events.push(ClickEvent::new(
                start + slider_duration * f64::from(i) / MILLIS_PER_SECOND,
                ClickEventType::SliderRepeat,
            ));
        }
    }

    fn push_event(&mut self, time: i32, kind: ClickEventType) {
        self.beatmap
            .click_events
            .push(ClickEvent::at_millis(time, kind));
    }
}

fn int_field(fields: &[&str], index: usize, name: &'static str) -> Result<i32, &'static str> {
    parse_int(fields[index]).map(|(_, v)| v).map_err(|_| name)
}

fn float_field(fields: &[&str], index: usize, name: &'static str) -> Result<f64, &'static str> {
    parse_float(fields[index]).map(|(_, v)| v).map_err(|_| name)
}

/// Parse beatmap text that was already decoded.
pub fn parse_osu_str(text: &str) -> Result<Beatmap, GuideError> {
    let mut parser = BeatmapParser::new();
    parser.parse_text(text)?;
    Ok(parser.take_beatmap())
}

/// Parse raw beatmap bytes, only the header is sniffed.
pub fn parse_osu_data(file_data: &[u8]) -> Result<Beatmap, GuideError> {
    let text = decode_text(file_data);
    parse_osu_str(&text)
}

/// Parse a `.osu` file, the extension is checked before anything is read.
pub fn parse_osu_file(path: impl AsRef<Path>) -> Result<Beatmap, GuideError> {
    let path = path.as_ref();
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
    if extension != OSU_EXTENSION {
        return Err(GuideError::InvalidFormat(format!(
            "unsupported file extension {extension:?} for {path:?}"
        )));
    }
    log::info!("Loading beatmap {path:?}");
    let mut file = std::fs::File::open(path)?;
    let mut file_data: Vec<u8> = vec![];
    file.read_to_end(&mut file_data)?;
    parse_osu_data(&file_data)
}

#[cfg(test)]
mod tests {
    use crate::parser::beatmap_parser::{
        beat_length_at, HitObjectKind, TimingPoint, DEFAULT_BEAT_LENGTH,
    };

    fn timing_point(time: i32, beat_length: f64, uninherited: bool) -> TimingPoint {
        TimingPoint {
            time,
            beat_length,
            meter: 4,
            sample_set: 0,
            sample_index: 0,
            volume: 100,
            uninherited,
            effects: 0,
        }
    }

    #[test]
    fn test_hit_object_kind_precedence() {
        assert_eq!(HitObjectKind::from_type_bits(1), Some(HitObjectKind::HitCircle));
        assert_eq!(HitObjectKind::from_type_bits(5), Some(HitObjectKind::HitCircle));
        assert_eq!(HitObjectKind::from_type_bits(2), Some(HitObjectKind::Slider));
        assert_eq!(HitObjectKind::from_type_bits(6), Some(HitObjectKind::Slider));
        assert_eq!(HitObjectKind::from_type_bits(12), Some(HitObjectKind::Spinner));
        assert_eq!(HitObjectKind::from_type_bits(128), Some(HitObjectKind::Hold));
        assert_eq!(HitObjectKind::from_type_bits(3), Some(HitObjectKind::HitCircle));
        assert_eq!(HitObjectKind::from_type_bits(10), Some(HitObjectKind::Slider));
        assert_eq!(HitObjectKind::from_type_bits(4), None);
        assert_eq!(HitObjectKind::from_type_bits(0), None);
    }

    #[test]
    fn test_beat_length_default() {
        assert_eq!(beat_length_at(&[], 1000), DEFAULT_BEAT_LENGTH);
        let points = [timing_point(2000, 300.0, true)];
        assert_eq!(beat_length_at(&points, 1000), DEFAULT_BEAT_LENGTH);
    }

    #[test]
    fn test_beat_length_latest_uninherited() {
        let points = [
            timing_point(0, 400.0, true),
            timing_point(500, -50.0, false),
            timing_point(1000, 250.0, true),
            timing_point(3000, 600.0, true),
        ];
        assert_eq!(beat_length_at(&points, 0), 400.0);
        assert_eq!(beat_length_at(&points, 800), 400.0);
        assert_eq!(beat_length_at(&points, 1000), 250.0);
        assert_eq!(beat_length_at(&points, 2999), 250.0);
        assert_eq!(beat_length_at(&points, 10_000), 600.0);
    }

    #[test]
    fn test_beat_length_stops_at_first_later_point() {
        // out of order input: the scan stops before the 200.0 point
        let points = [
            timing_point(0, 400.0, true),
            timing_point(5000, 600.0, true),
            timing_point(1000, 200.0, true),
        ];
        assert_eq!(beat_length_at(&points, 2000), 400.0);
    }
}
