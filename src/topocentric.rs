use log::debug;
use nalgebra::Vector3;

use crate::ellipsoid::Ellipsoid;
use crate::error::{GeoError, Result};
use crate::geodetic::{geodetic_to_cartesian, Cartesian, Geodetic};

/// Vector in an observer's local tangent plane, meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Enu {
    pub east: f64,
    pub north: f64,
    pub up: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityAngles {
    pub azimuth: f64,   // degrees, [0, 360)
    pub elevation: f64, // degrees, [-90, 90]
    pub zenith: f64,    // degrees, [0, 180]
    pub range: f64,     // meters
}

impl Enu {
    pub fn new(east: f64, north: f64, up: f64) -> Self {
        Self { east, north, up }
    }

    pub fn range(&self) -> f64 {
        (self.east * self.east + self.north * self.north + self.up * self.up).sqrt()
    }

    pub fn azimuth(&self) -> f64 {
        azimuth(self.east, self.north)
    }

    pub fn elevation(&self) -> f64 {
        elevation(self.east, self.north, self.up)
    }

    pub fn visibility(&self) -> VisibilityAngles {
        let elevation = self.elevation();
        VisibilityAngles {
            azimuth: self.azimuth(),
            elevation,
            zenith: zenith(elevation),
            range: self.range(),
        }
    }
}

impl From<Vector3<f64>> for Enu {
    fn from(v: Vector3<f64>) -> Self {
        Enu::new(v.x, v.y, v.z)
    }
}

impl VisibilityAngles {
    pub fn is_above(&self, min_elevation: f64) -> bool {
        self.elevation >= min_elevation
    }
}

/// Applies the ECEF -> ENU rotation of the tangent plane at `origin` to `delta`.
pub fn rotate_to_enu(origin: &Geodetic, delta: &Vector3<f64>) -> Vector3<f64> {
    let (sin_lat, cos_lat) = origin.latitude.to_radians().sin_cos();
    let (sin_lon, cos_lon) = origin.longitude.to_radians().sin_cos();

    let east = -sin_lon * delta.x + cos_lon * delta.y;
    let north = -sin_lat * cos_lon * delta.x - sin_lat * sin_lon * delta.y + cos_lat * delta.z;
    let up = cos_lat * cos_lon * delta.x + cos_lat * sin_lon * delta.y + sin_lat * delta.z;

    Vector3::new(east, north, up)
}

pub fn vector_to_enu(observer: &Geodetic, target: &Cartesian, ellipsoid: &Ellipsoid) -> Enu {
    let observer_ecef = geodetic_to_cartesian(observer, ellipsoid);
    let delta = target.to_vector() - observer_ecef.to_vector();
    rotate_to_enu(observer, &delta).into()
}

/// ENU vector between two geodetic points.
pub fn geodetic_to_enu(observer: &Geodetic, target: &Geodetic, ellipsoid: &Ellipsoid) -> Enu {
    vector_to_enu(observer, &geodetic_to_cartesian(target, ellipsoid), ellipsoid)
}

/// Azimuth clockwise from north in [0, 360).
///
/// A target straight above or below the observer has no horizontal component;
/// that case returns 0.0. Use [`try_azimuth`] to detect it.
pub fn azimuth(east: f64, north: f64) -> f64 {
    match try_azimuth(east, north) {
        Ok(az) => az,
        Err(_) => {
            debug!("degenerate horizontal vector, azimuth reported as 0");
            0.0
        }
    }
}

pub fn try_azimuth(east: f64, north: f64) -> Result<f64> {
    if east == 0.0 && north == 0.0 {
        return Err(GeoError::DegenerateGeometry);
    }

    let azimuth = east.atan2(north).to_degrees();
    let azimuth = if azimuth < 0.0 {
        azimuth + 360.0
    } else {
        azimuth
    };
    // -1e-17 + 360.0 rounds to 360.0
    Ok(if azimuth >= 360.0 { 0.0 } else { azimuth })
}

pub fn elevation(east: f64, north: f64, up: f64) -> f64 {
    up.atan2(east.hypot(north)).to_degrees()
}

pub fn zenith(elevation: f64) -> f64 {
    90.0 - elevation
}

pub fn look_angles(
    observer: &Geodetic,
    target: &Cartesian,
    ellipsoid: &Ellipsoid,
) -> VisibilityAngles {
    vector_to_enu(observer, target, ellipsoid).visibility()
}
