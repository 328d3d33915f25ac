use crate::error::{GeoError, Result};

/// Reference ellipsoid used by every coordinate transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    /// Semi-major axis (meters)
    pub a: f64,
    /// Flattening
    pub f: f64,
    /// Semi-minor axis: a * (1 - f)
    pub b: f64,
    /// First eccentricity squared: 2f - f^2
    pub e2: f64,
    /// Second eccentricity squared: e^2 / (1 - e^2)
    pub ep2: f64,
}

pub const WGS84: Ellipsoid = Ellipsoid::from_parts(6_378_137.0, 1.0 / 298.257_223_563);

impl Ellipsoid {
    const fn from_parts(a: f64, f: f64) -> Self {
        let e2 = 2.0 * f - f * f;
        Self {
            a,
            f,
            b: a * (1.0 - f),
            e2,
            ep2: e2 / (1.0 - e2),
        }
    }

    pub fn new(a: f64, f: f64) -> Result<Self> {
        if !a.is_finite() || a <= 0.0 {
            return Err(GeoError::range("semi-major axis", a, "must be positive"));
        }
        if !f.is_finite() || f <= 0.0 || f >= 1.0 {
            return Err(GeoError::range("flattening", f, "must lie in (0, 1)"));
        }
        Ok(Self::from_parts(a, f))
    }

    /// Builds the ellipsoid from both axes, as older geodetic tables list them.
    pub fn from_axes(a: f64, b: f64) -> Result<Self> {
        if !b.is_finite() || b <= 0.0 || b >= a {
            return Err(GeoError::range(
                "semi-minor axis",
                b,
                "must be positive and shorter than the semi-major axis",
            ));
        }
        Self::new(a, (a - b) / a)
    }

    pub fn eccentricity(&self) -> f64 {
        self.e2.sqrt()
    }

    /// Polar radius of curvature a^2 / b.
    pub fn polar_curvature(&self) -> f64 {
        self.a * self.a / self.b
    }

    /// Prime-vertical radius of curvature at a geodetic latitude (radians).
    pub fn prime_vertical_radius(&self, lat_rad: f64) -> f64 {
        let sin_lat = lat_rad.sin();
        self.a / (1.0 - self.e2 * sin_lat * sin_lat).sqrt()
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        WGS84
    }
}
