//! Human-friendly durations such as `30s`, `250ms` or `2 hours`.

use std::time::Duration;

use super::CoercionFailure;

const UNITS: &[(&[&str], u64)] = &[
    (&["ns", "nanos", "nanoseconds"], 1),
    (&["us", "micros", "microseconds"], 1_000),
    (&["ms", "millis", "milliseconds"], 1_000_000),
    (&["", "s", "sec", "secs", "second", "seconds"], 1_000_000_000),
    (&["m", "min", "mins", "minute", "minutes"], 60_000_000_000),
    (&["h", "hr", "hrs", "hour", "hours"], 3_600_000_000_000),
    (&["d", "day", "days"], 86_400_000_000_000),
];

/// Parse an integer count followed by an optional unit; bare numbers are
/// seconds.
pub(super) fn parse(raw: &str) -> Result<Duration, CoercionFailure> {
    let text = raw.trim();
    let split = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    let (digits, suffix) = text.split_at(split);
    if digits.is_empty() {
        return Err(CoercionFailure::new("expected a number followed by a unit"));
    }
    let count: u64 = digits.parse().map_err(CoercionFailure::new)?;
    let unit = suffix.trim_start().to_ascii_lowercase();
    let scale = UNITS
        .iter()
        .find(|(names, _)| names.contains(&unit.as_str()))
        .map(|(_, nanos)| *nanos)
        .ok_or_else(|| CoercionFailure::new(format!("unknown duration unit `{unit}`")))?;
    count
        .checked_mul(scale)
        .map(Duration::from_nanos)
        .ok_or_else(|| CoercionFailure::new("duration is too large"))
}
