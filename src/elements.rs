use std::f64::consts::PI;

use chrono::{DateTime, Datelike, TimeZone, Utc};

use crate::error::{GeoError, Result};
use crate::tle::OrbitalElementSet;

/// Earth gravitational parameter (km^3/s^2)
pub const MU_EARTH: f64 = 398_600.4418;
const SECONDS_PER_DAY: f64 = 86_400.0;

/// Classical Keplerian elements, angles in degrees, semi-major axis in km.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerianElements {
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    pub inclination: f64,
    pub arg_perigee: f64,
    pub raan: f64,
    pub true_anomaly: f64,
}

/// n = sqrt(mu / a^3), expressed in revolutions per day.
pub fn mean_motion_from_semi_major_axis(semi_major_axis_km: f64) -> Result<f64> {
    if !semi_major_axis_km.is_finite() || semi_major_axis_km <= 0.0 {
        return Err(GeoError::range(
            "semi-major axis",
            semi_major_axis_km,
            "must be positive",
        ));
    }
    let rad_per_second = (MU_EARTH / semi_major_axis_km.powi(3)).sqrt();
    Ok(rad_per_second / (2.0 * PI) * SECONDS_PER_DAY)
}

pub fn period_minutes_from_mean_motion(revs_per_day: f64) -> Result<f64> {
    if !revs_per_day.is_finite() || revs_per_day <= 0.0 {
        return Err(GeoError::range("mean motion", revs_per_day, "must be positive"));
    }
    Ok(24.0 * 60.0 / revs_per_day)
}

/// Converts a true anomaly to a mean anomaly through the eccentric anomaly.
/// Both angles in degrees, result in [0, 360).
pub fn true_to_mean_anomaly(true_anomaly: f64, eccentricity: f64) -> Result<f64> {
    if !(0.0..1.0).contains(&eccentricity) {
        return Err(GeoError::range(
            "eccentricity",
            eccentricity,
            "elliptic orbits only, must lie in [0, 1)",
        ));
    }
    let nu = true_anomaly.to_radians().rem_euclid(2.0 * PI);
    let cos_nu = nu.cos();
    let cos_e = ((eccentricity + cos_nu) / (1.0 + eccentricity * cos_nu)).clamp(-1.0, 1.0);

    let mut eccentric = cos_e.acos();
    if nu > PI {
        eccentric = 2.0 * PI - eccentric;
    }

    let mean = eccentric - eccentricity * eccentric.sin();
    let degrees = mean.to_degrees().rem_euclid(360.0);
    Ok(if degrees >= 360.0 { 0.0 } else { degrees })
}

/// Two-digit year and fractional day of year, with 1.0 at Jan 1 00:00 UTC.
pub fn epoch_from_datetime(time: DateTime<Utc>) -> (u8, f64) {
    let year = time.year();
    let year_start = Utc
        .with_ymd_and_hms(year, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or(time);
    let elapsed = time.signed_duration_since(year_start);
    let day = 1.0 + elapsed.num_milliseconds() as f64 / (SECONDS_PER_DAY * 1000.0);
    (year.rem_euclid(100) as u8, day)
}

impl KeplerianElements {
    /// Builds a record from Keplerian elements; drag terms stay zero.
    pub fn to_element_set(
        &self,
        catalog_id: &str,
        epoch: DateTime<Utc>,
        revolution_number: u32,
    ) -> Result<OrbitalElementSet> {
        let mean_motion = mean_motion_from_semi_major_axis(self.semi_major_axis)?;
        let mean_anomaly = true_to_mean_anomaly(self.true_anomaly, self.eccentricity)?;
        let (epoch_year, epoch_day) = epoch_from_datetime(epoch);

        let mut set = OrbitalElementSet::new(
            catalog_id,
            epoch_year,
            epoch_day,
            mean_motion,
            self.eccentricity,
            self.inclination,
            self.arg_perigee,
            self.raan,
            revolution_number,
        );
        set.mean_anomaly = mean_anomaly;
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tle::encode;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_mean_motion_of_low_orbit() {
        let n = mean_motion_from_semi_major_axis(6778.137).unwrap();
        assert_abs_diff_eq!(n, 15.5574, epsilon = 1e-3);
        let period = period_minutes_from_mean_motion(n).unwrap();
        assert_abs_diff_eq!(period, 92.5604, epsilon = 1e-3);
    }

    #[test]
    fn test_geostationary_period() {
        let n = mean_motion_from_semi_major_axis(42_164.0).unwrap();
        assert_abs_diff_eq!(n, 1.0027, epsilon = 1e-3);
    }

    #[test]
    fn test_rejects_non_positive_axis() {
        assert!(mean_motion_from_semi_major_axis(0.0).is_err());
        assert!(period_minutes_from_mean_motion(-1.0).is_err());
    }

    #[test]
    fn test_circular_orbit_anomalies_agree() {
        for &nu in &[0.0, 45.0, 180.0, 278.668] {
            assert_abs_diff_eq!(true_to_mean_anomaly(nu, 0.0).unwrap(), nu, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_eccentric_orbit_anomaly() {
        // at nu = 90 deg with e = 0.1: E = acos(0.1), M = E - e sin E
        let expected = (0.1f64.acos() - 0.1 * 0.1f64.acos().sin()).to_degrees();
        assert_abs_diff_eq!(true_to_mean_anomaly(90.0, 0.1).unwrap(), expected, epsilon = 1e-9);
        // mean anomaly lags the true anomaly on the way out from perigee
        assert!(true_to_mean_anomaly(90.0, 0.1).unwrap() < 90.0);
        assert!(true_to_mean_anomaly(270.0, 0.1).unwrap() > 270.0);
        assert!(true_to_mean_anomaly(10.0, 1.0).is_err());
    }

    #[test]
    fn test_epoch_day_of_year() {
        let t = Utc.with_ymd_and_hms(2023, 4, 15, 12, 30, 45).unwrap();
        let (year, day) = epoch_from_datetime(t);
        assert_eq!(year, 23);
        // Jan 1 is day 1, Apr 15 is day 105
        assert_abs_diff_eq!(day, 105.0 + (12.0 * 3600.0 + 30.0 * 60.0 + 45.0) / 86_400.0, epsilon = 1e-9);

        let (year, day) = epoch_from_datetime(Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(year, 0);
        assert_eq!(day, 1.0);
    }

    #[test]
    fn test_keplerian_to_record() {
        let kepler = KeplerianElements {
            semi_major_axis: 6939.3777,
            eccentricity: 0.00145295,
            inclination: 97.41997,
            arg_perigee: 125.1906,
            raan: 271.2763,
            true_anomaly: 278.668,
        };
        let epoch = Utc.with_ymd_and_hms(2025, 3, 25, 0, 40, 57).unwrap();
        let set = kepler.to_element_set("6005", epoch, 45678).unwrap();
        let record = encode(&set).unwrap();

        assert!(record.is_valid());
        assert!(record.line1.starts_with("1 06005U"));
        assert_eq!(&record.line1[18..20], "25");
        assert_eq!(&record.line2[8..16], "097.4199");
        assert_eq!(&record.line2[17..25], "271.2763");
        assert_eq!(&record.line2[26..33], "0014529");
        assert_eq!(&record.line2[34..42], "125.1906");
        assert_eq!(&record.line2[63..68], "45678");
    }
}
