use chrono::Duration;
use log::debug;

use crate::error::{GeoError, Result};
use crate::geodetic::Cartesian;
use crate::satellite::OrbitPropagator;
use crate::segment::TimeWindow;

/// Extra samples past the window end so renderers can interpolate up to it.
const INTERPOLATION_PADDING: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionSample {
    pub offset_seconds: f64,
    pub position: Cartesian,
}

/// Samples `propagator` every `step_seconds` from the window start.
pub fn sample_positions<P: OrbitPropagator + ?Sized>(
    propagator: &P,
    window: &TimeWindow,
    step_seconds: i64,
) -> Result<Vec<PositionSample>> {
    if step_seconds <= 0 {
        return Err(GeoError::range(
            "sample step",
            step_seconds as f64,
            "must be positive",
        ));
    }

    let count = window.duration().num_seconds() / step_seconds + INTERPOLATION_PADDING;
    debug!("sampling {} positions over {}", count, window);

    (0..count)
        .map(|i| {
            let offset = i * step_seconds;
            let position = propagator.position_at(window.start + Duration::seconds(offset))?;
            Ok(PositionSample {
                offset_seconds: offset as f64,
                position,
            })
        })
        .collect()
}

/// Flattened `[t0, x0, y0, z0, t1, ...]` series.
pub fn flatten(samples: &[PositionSample]) -> Vec<f64> {
    samples
        .iter()
        .flat_map(|s| [s.offset_seconds, s.position.x, s.position.y, s.position.z])
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba(pub [u8; 4]);

/// Caller-supplied palette handed out in order, wrapping around.
#[derive(Debug, Clone)]
pub struct ColorCycle {
    palette: Vec<Rgba>,
    next: usize,
}

impl ColorCycle {
    pub fn new(palette: Vec<Rgba>) -> Result<Self> {
        if palette.is_empty() {
            return Err(GeoError::format("palette", "needs at least one colour"));
        }
        Ok(Self { palette, next: 0 })
    }
}

impl Iterator for ColorCycle {
    type Item = Rgba;

    fn next(&mut self) -> Option<Rgba> {
        let color = self.palette[self.next];
        self.next = (self.next + 1) % self.palette.len();
        Some(color)
    }
}
