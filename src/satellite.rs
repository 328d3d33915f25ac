use chrono::{DateTime, NaiveDate, Utc};
use nalgebra::Vector3;
use sgp4::{Constants, Elements, MinutesSinceEpoch};

use crate::ellipsoid::Ellipsoid;
use crate::error::{GeoError, Result};
use crate::geodetic::{Cartesian, Geodetic};
use crate::observer::Observer;
use crate::tle::EncodedRecord;
use crate::topocentric::VisibilityAngles;

/// Position source for a single orbiting object.
///
/// The geometry in this crate only ever asks for these two quantities;
/// everything about how an orbit is advanced stays behind this trait.
pub trait OrbitPropagator {
    /// Earth-fixed position in meters.
    fn position_at(&self, time: DateTime<Utc>) -> Result<Cartesian>;

    fn period_minutes(&self) -> f64;
}

/// SGP4-backed propagator built from a two-line record.
#[derive(Clone)]
pub struct Satellite {
    pub name: String,
    pub elements: Elements,
    pub epoch: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct SatelliteView {
    pub name: String,
    pub time: DateTime<Utc>,
    pub ground_point: Geodetic,
    pub angles: VisibilityAngles,
    pub is_visible: bool,
}

impl Satellite {
    pub fn new(name: String, elements: Elements) -> Result<Self> {
        // reject elements SGP4 cannot initialise up front
        constants_for(&elements)?;
        let epoch = elements.datetime.and_utc();
        Ok(Self {
            name,
            elements,
            epoch,
        })
    }

    pub fn from_tle(name: &str, line1: &str, line2: &str) -> Result<Self> {
        let elements = Elements::from_tle(
            Some(name.to_string()),
            line1.as_bytes(),
            line2.as_bytes(),
        )
        .map_err(|e| GeoError::Propagation(format!("{:?}", e)))?;
        Self::new(name.to_string(), elements)
    }

    pub fn from_record(name: &str, record: &EncodedRecord) -> Result<Self> {
        record.verify()?;
        Self::from_tle(name, &record.line1, &record.line2)
    }

    pub fn age_days(&self, time: DateTime<Utc>) -> f64 {
        (time - self.epoch).num_seconds() as f64 / 86_400.0
    }

    /// True when the elements are more than `max_age_days` from `time`.
    pub fn is_stale(&self, time: DateTime<Utc>, max_age_days: f64) -> bool {
        self.age_days(time).abs() > max_age_days
    }

    /// Position in the TEME frame (km), as produced by SGP4.
    fn teme_position_km(&self, time: DateTime<Utc>) -> Result<Vector3<f64>> {
        let minutes_since_epoch = (time - self.epoch).num_milliseconds() as f64 / 60_000.0;
        let prediction = constants_for(&self.elements)?
            .propagate(MinutesSinceEpoch(minutes_since_epoch))
            .map_err(|e| GeoError::Propagation(format!("{:?}", e)))?;

        Ok(Vector3::new(
            prediction.position[0],
            prediction.position[1],
            prediction.position[2],
        ))
    }

    pub fn ground_point(&self, time: DateTime<Utc>, ellipsoid: &Ellipsoid) -> Result<Geodetic> {
        self.position_at(time)?.to_geodetic(ellipsoid)
    }

    /// Height above the equatorial radius at the element epoch, meters.
    pub fn orbital_altitude(&self, ellipsoid: &Ellipsoid) -> Result<f64> {
        Ok(self.teme_position_km(self.epoch)?.norm() * 1000.0 - ellipsoid.a)
    }

    pub fn observe(&self, time: DateTime<Utc>, observer: &Observer) -> Result<SatelliteView> {
        let position = self.position_at(time)?;
        let angles = observer.look_angles(&position);

        Ok(SatelliteView {
            name: self.name.clone(),
            time,
            ground_point: position.to_geodetic(&observer.ellipsoid)?,
            angles,
            is_visible: angles.elevation > 0.0,
        })
    }
}

impl OrbitPropagator for Satellite {
    fn position_at(&self, time: DateTime<Utc>) -> Result<Cartesian> {
        let teme_km = self.teme_position_km(time)?;
        Ok(teme_to_ecef(&(teme_km * 1000.0), calculate_gmst(time)).into())
    }

    fn period_minutes(&self) -> f64 {
        24.0 * 60.0 / self.elements.mean_motion
    }
}

fn constants_for(elements: &Elements) -> Result<Constants> {
    Constants::from_elements(elements).map_err(|e| GeoError::Propagation(format!("{:?}", e)))
}

fn teme_to_ecef(teme: &Vector3<f64>, gmst: f64) -> Vector3<f64> {
    let (sin_gmst, cos_gmst) = gmst.sin_cos();

    Vector3::new(
        teme.x * cos_gmst + teme.y * sin_gmst,
        -teme.x * sin_gmst + teme.y * cos_gmst,
        teme.z,
    )
}

/// Greenwich mean sidereal time (radians).
pub fn calculate_gmst(time: DateTime<Utc>) -> f64 {
    let j2000 = NaiveDate::from_ymd_opt(2000, 1, 1)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or_default();

    let days = time.signed_duration_since(j2000).num_milliseconds() as f64 / 86_400_000.0;

    let gmst_hours = (18.697374558 + 24.06570982441908 * days).rem_euclid(24.0);
    (gmst_hours * 15.0).to_radians()
}
