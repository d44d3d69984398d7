pub mod click_event;
pub mod serializer;

/// Milliseconds per second
pub const MILLIS_PER_SECOND: f64 = 1000.0;
