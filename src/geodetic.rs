use log::debug;
use nalgebra::Vector3;

use crate::ellipsoid::Ellipsoid;
use crate::error::{GeoError, Result};

/// Latitude tolerance of the inverse transform (radians).
pub const LATITUDE_TOLERANCE: f64 = 1e-13;
/// Upper bound on fixed-point iterations; convergence normally takes fewer than ten.
pub const MAX_ITERATIONS: usize = 50;
/// Below this distance from the rotation axis (meters) a point is treated as polar.
const POLAR_AXIS_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geodetic {
    pub latitude: f64,  // degrees
    pub longitude: f64, // degrees
    pub altitude: f64,  // meters
}

/// Earth-centered, Earth-fixed position in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cartesian {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Geodetic {
    pub fn new(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
        }
    }

    /// Same as `new`, but rejects latitudes outside [-90, 90] and non-finite values.
    pub fn checked(latitude: f64, longitude: f64, altitude: f64) -> Result<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(GeoError::range("latitude", latitude, "must lie in [-90, 90]"));
        }
        if !longitude.is_finite() {
            return Err(GeoError::range("longitude", longitude, "must be finite"));
        }
        if !altitude.is_finite() {
            return Err(GeoError::range("altitude", altitude, "must be finite"));
        }
        Ok(Self::new(latitude, longitude, altitude))
    }

    pub fn to_cartesian(&self, ellipsoid: &Ellipsoid) -> Cartesian {
        geodetic_to_cartesian(self, ellipsoid)
    }
}

impl Cartesian {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn to_geodetic(&self, ellipsoid: &Ellipsoid) -> Result<Geodetic> {
        cartesian_to_geodetic(self, ellipsoid)
    }

    pub fn norm(&self) -> f64 {
        self.to_vector().norm()
    }

    pub fn to_vector(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }
}

impl From<Vector3<f64>> for Cartesian {
    fn from(v: Vector3<f64>) -> Self {
        Cartesian::new(v.x, v.y, v.z)
    }
}

impl From<Cartesian> for Vector3<f64> {
    fn from(c: Cartesian) -> Self {
        c.to_vector()
    }
}

/// Wraps a longitude into [-180, 180).
pub fn normalize_longitude(lon: f64) -> f64 {
    let wrapped = (lon + 180.0).rem_euclid(360.0) - 180.0;
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

pub fn geodetic_to_cartesian(geo: &Geodetic, ellipsoid: &Ellipsoid) -> Cartesian {
    let lat_rad = geo.latitude.to_radians();
    let lon_rad = geo.longitude.to_radians();
    let (sin_lat, cos_lat) = lat_rad.sin_cos();
    let (sin_lon, cos_lon) = lon_rad.sin_cos();

    let n = ellipsoid.prime_vertical_radius(lat_rad);

    Cartesian {
        x: (n + geo.altitude) * cos_lat * cos_lon,
        y: (n + geo.altitude) * cos_lat * sin_lon,
        z: (n * (1.0 - ellipsoid.e2) + geo.altitude) * sin_lat,
    }
}

pub fn cartesian_to_geodetic(pos: &Cartesian, ellipsoid: &Ellipsoid) -> Result<Geodetic> {
    if !(pos.x.is_finite() && pos.y.is_finite() && pos.z.is_finite()) {
        return Err(GeoError::range(
            "cartesian position",
            f64::NAN,
            "components must be finite",
        ));
    }

    let s = pos.x.hypot(pos.y);

    if s < POLAR_AXIS_EPSILON {
        let latitude = if pos.z < 0.0 { -90.0 } else { 90.0 };
        return Ok(Geodetic::new(latitude, 0.0, pos.z.abs() - ellipsoid.b));
    }

    let longitude = normalize_longitude(pos.y.atan2(pos.x).to_degrees());
    let c = ellipsoid.polar_curvature();

    let mut lat = (pos.z / s).atan();
    let mut iterations = 0;
    loop {
        let cos_lat = lat.cos();
        let n = c / (1.0 + ellipsoid.ep2 * cos_lat * cos_lat).sqrt();
        let next = ((pos.z + n * ellipsoid.e2 * lat.sin()) / s).atan();
        let residual = (next - lat).abs();
        lat = next;
        iterations += 1;

        if residual < LATITUDE_TOLERANCE {
            break;
        }
        if iterations >= MAX_ITERATIONS {
            return Err(GeoError::Convergence {
                iterations,
                residual,
            });
        }
    }
    debug!("geodetic latitude converged in {} iterations", iterations);

    let n = ellipsoid.prime_vertical_radius(lat);
    let (sin_lat, cos_lat) = lat.sin_cos();
    // S / cos B loses precision towards the poles, z / sin B towards the equator
    let altitude = if cos_lat.abs() > sin_lat.abs() {
        s / cos_lat - n
    } else {
        pos.z / sin_lat - n * (1.0 - ellipsoid.e2)
    };

    Ok(Geodetic::new(lat.to_degrees(), longitude, altitude))
}

/// Rotates an ECEF velocity into the East-North-Up frame at `position`.
/// Returns `[east, north, up]` in the velocity's units.
pub fn ecef_velocity_to_enu(
    position: &Cartesian,
    velocity: &Vector3<f64>,
    ellipsoid: &Ellipsoid,
) -> Result<Vector3<f64>> {
    let geo = cartesian_to_geodetic(position, ellipsoid)?;
    Ok(crate::topocentric::rotate_to_enu(&geo, velocity))
}
