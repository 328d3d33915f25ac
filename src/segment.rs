use std::fmt;

use chrono::{DateTime, Duration, SecondsFormat, Utc};

use crate::error::{GeoError, Result};

/// Closed interval `[start, end]`. Windows built with `new` are never empty;
/// the leading window produced by `segment` may be (`start == end`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start >= end {
            return Err(GeoError::range(
                "time window",
                (end - start).num_milliseconds() as f64 / 1000.0,
                "end must come after start",
            ));
        }
        Ok(Self { start, end })
    }

    pub(crate) fn spanning(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn contains(&self, time: DateTime<Utc>) -> bool {
        time >= self.start && time <= self.end
    }
}

/// ISO 8601 interval, e.g. `2025-01-01T00:00:00Z/2025-01-02T00:00:00Z`.
impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}",
            self.start.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            self.end.to_rfc3339_opts(SecondsFormat::AutoSi, true)
        )
    }
}

/// Two-point linear ramp over segment-local elapsed seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ramp {
    pub points: [(f64, f64); 2],
}

impl Ramp {
    /// Lead time: the whole revolution ahead at the segment epoch, nothing at its end.
    pub fn lead(period_seconds: f64) -> Self {
        Ramp {
            points: [(0.0, period_seconds), (period_seconds, 0.0)],
        }
    }

    /// Trail time: nothing behind at the segment epoch, the whole revolution at its end.
    pub fn trail(period_seconds: f64) -> Self {
        Ramp {
            points: [(0.0, 0.0), (period_seconds, period_seconds)],
        }
    }

    /// Linear interpolation, clamped to the end points.
    pub fn value_at(&self, elapsed_seconds: f64) -> f64 {
        let [(t0, v0), (t1, v1)] = self.points;
        if elapsed_seconds <= t0 || t1 <= t0 {
            v0
        } else if elapsed_seconds >= t1 {
            v1
        } else {
            v0 + (v1 - v0) * (elapsed_seconds - t0) / (t1 - t0)
        }
    }

    /// Flattened `[t0, v0, t1, v1]`, the layout trajectory renderers take.
    pub fn to_samples(&self) -> [f64; 4] {
        let [(t0, v0), (t1, v1)] = self.points;
        [t0, v0, t1, v1]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RevolutionSegment {
    pub window: TimeWindow,
    /// Seconds from the start of the whole interval to this segment's start.
    pub epoch_offset_seconds: f64,
    pub orbital_period_seconds: f64,
    pub lead: Ramp,
    pub trail: Ramp,
}

/// Splits `[start, end]` into one partial revolution followed by whole ones.
///
/// The first window holds `(end - start) mod period`, every following window
/// exactly one period, so there are `floor((end - start) / period) + 1` windows
/// that tile the interval. When the interval is a whole number of periods the
/// first window is empty (`start == end`).
pub fn segment(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    period_minutes: f64,
) -> Result<Vec<RevolutionSegment>> {
    if start >= end {
        return Err(GeoError::range(
            "time window",
            (end - start).num_milliseconds() as f64 / 1000.0,
            "end must come after start",
        ));
    }
    if !period_minutes.is_finite() || period_minutes <= 0.0 {
        return Err(GeoError::range(
            "orbital period",
            period_minutes,
            "must be positive",
        ));
    }

    let total_ns = (end - start).num_nanoseconds().ok_or_else(|| {
        GeoError::range(
            "time window",
            (end - start).num_seconds() as f64,
            "interval too long to segment",
        )
    })?;
    let period_ns = (period_minutes * 60.0e9).round();
    if period_ns < 1.0 || period_ns > i64::MAX as f64 {
        return Err(GeoError::range(
            "orbital period",
            period_minutes,
            "not representable in nanoseconds",
        ));
    }
    let period_ns = period_ns as i64;

    let full_orbits = total_ns / period_ns;
    let remainder = total_ns % period_ns;
    let period_seconds = period_ns as f64 / 1e9;

    let mut segments = Vec::with_capacity(full_orbits as usize + 1);
    let mut t0 = start;
    let mut t1 = start + Duration::nanoseconds(remainder);
    for _ in 0..=full_orbits {
        segments.push(RevolutionSegment {
            window: TimeWindow::spanning(t0, t1),
            epoch_offset_seconds: (t0 - start).num_nanoseconds().unwrap_or(0) as f64 / 1e9,
            orbital_period_seconds: period_seconds,
            lead: Ramp::lead(period_seconds),
            trail: Ramp::trail(period_seconds),
        });
        t0 = t1;
        t1 = t0 + Duration::nanoseconds(period_ns);
    }

    Ok(segments)
}
