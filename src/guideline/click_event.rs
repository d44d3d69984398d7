use crate::guideline::MILLIS_PER_SECOND;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickEvent {
    /// Time of the event in seconds from track start, offset not applied.
    pub seconds: f64,
    /// The type of the event.
    pub kind: ClickEventType,
}

impl ClickEvent {
    pub const fn new(seconds: f64, kind: ClickEventType) -> Self {
        Self { seconds, kind }
    }

    /// Build an event from a beatmap timestamp in milliseconds.
    pub fn at_millis(time: i32, kind: ClickEventType) -> Self {
        Self::new(f64::from(time) / MILLIS_PER_SECOND, kind)
    }

    pub const fn is_start(&self) -> bool {
        matches!(
            self.kind,
            ClickEventType::HitCircle
                | ClickEventType::SliderStart
                | ClickEventType::SpinnerStart
                | ClickEventType::HoldStart
        )
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ClickEventType {
    HitCircle,
    SliderStart,
    SliderEnd,
    SliderRepeat,
    SpinnerStart,
    SpinnerEnd,
    HoldStart,
    HoldEnd,
}

impl ClickEventType {
    pub const fn name(self) -> &'static str {
        match self {
            Self::HitCircle => "HitCircle",
            Self::SliderStart => "Slider_Start",
            Self::SliderEnd => "Slider_End",
            Self::SliderRepeat => "Slider_Repeat",
            Self::SpinnerStart => "Spinner_Start",
            Self::SpinnerEnd => "Spinner_End",
            Self::HoldStart => "Hold_Start",
            Self::HoldEnd => "Hold_End",
        }
    }
}

impl Display for ClickEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Display for ClickEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3}s - {}", self.seconds, self.kind)
    }
}
