use crate::ellipsoid::Ellipsoid;
use crate::error::Result;
use crate::geodetic::{Cartesian, Geodetic};
use crate::topocentric::{self, Enu, VisibilityAngles};

/// A named ground site with its ECEF position resolved once.
#[derive(Debug, Clone)]
pub struct Observer {
    pub name: String,
    pub location: Geodetic,
    pub ellipsoid: Ellipsoid,
    ecef: Cartesian,
}

impl Observer {
    pub fn new(name: String, lat: f64, lon: f64, alt: f64, ellipsoid: Ellipsoid) -> Result<Self> {
        let location = Geodetic::checked(lat, lon, alt)?;
        Ok(Self {
            name,
            ecef: location.to_cartesian(&ellipsoid),
            location,
            ellipsoid,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.location.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.location.longitude
    }

    pub fn altitude(&self) -> f64 {
        self.location.altitude
    }

    pub fn to_ecef(&self) -> Cartesian {
        self.ecef
    }

    pub fn enu(&self, target: &Cartesian) -> Enu {
        let delta = target.to_vector() - self.ecef.to_vector();
        topocentric::rotate_to_enu(&self.location, &delta).into()
    }

    pub fn look_angles(&self, target: &Cartesian) -> VisibilityAngles {
        self.enu(target).visibility()
    }

    pub fn look_angles_geodetic(&self, target: &Geodetic) -> VisibilityAngles {
        self.look_angles(&target.to_cartesian(&self.ellipsoid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ellipsoid::WGS84;
    use crate::error::GeoError;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_matches_free_functions() {
        let observer = Observer::new("Beijing".to_string(), 40.0, 116.0, 100.0, WGS84).unwrap();
        let target = Geodetic::new(40.5, 116.5, 10_000.0);

        let from_observer = observer.look_angles_geodetic(&target);
        let direct = topocentric::look_angles(
            &observer.location,
            &target.to_cartesian(&WGS84),
            &WGS84,
        );

        assert_abs_diff_eq!(from_observer.azimuth, direct.azimuth, epsilon = 1e-12);
        assert_abs_diff_eq!(from_observer.elevation, direct.elevation, epsilon = 1e-12);
        assert_abs_diff_eq!(from_observer.range, direct.range, epsilon = 1e-6);
    }

    #[test]
    fn test_rejects_bad_latitude() {
        let err = Observer::new("nowhere".to_string(), 91.0, 0.0, 0.0, WGS84).unwrap_err();
        assert!(matches!(err, GeoError::InputRange { field: "latitude", .. }));
    }

    #[test]
    fn test_geostationary_seen_from_equator() {
        let observer = Observer::new("Quito".to_string(), 0.0, -78.5, 2850.0, WGS84).unwrap();
        let geo_sat = Geodetic::new(0.0, -78.5, 35_786_000.0).to_cartesian(&WGS84);
        let angles = observer.look_angles(&geo_sat);
        assert_abs_diff_eq!(angles.elevation, 90.0, epsilon = 1e-6);
        assert_abs_diff_eq!(angles.range, 35_786_000.0 - 2850.0, epsilon = 1e-3);
    }
}
