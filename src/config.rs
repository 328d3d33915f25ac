use anyhow::Result;
use serde::Deserialize;

use crate::ellipsoid::{Ellipsoid, WGS84};
use crate::observer::Observer;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub observer: ObserverConfig,
    pub ellipsoid: Option<EllipsoidConfig>,
    #[serde(default)]
    pub trajectory: TrajectoryConfig,
    #[serde(default)]
    pub record: RecordConfig,
}

#[derive(Debug, Deserialize)]
pub struct ObserverConfig {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64, // meters
}

/// Reference ellipsoid override; either field may be omitted to keep WGS84's.
#[derive(Debug, Deserialize)]
pub struct EllipsoidConfig {
    pub semi_major_axis: Option<f64>,
    pub inverse_flattening: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct TrajectoryConfig {
    pub step_seconds: i64,
    pub stale_after_days: f64,
}

impl Default for TrajectoryConfig {
    fn default() -> Self {
        Self {
            step_seconds: 300,
            stale_after_days: 30.0,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RecordConfig {
    pub classification: char,
    pub element_set_number: u16,
}

impl Default for RecordConfig {
    fn default() -> Self {
        Self {
            classification: 'U',
            element_set_number: 999,
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        Ok(config)
    }

    pub fn ellipsoid(&self) -> Result<Ellipsoid> {
        let Some(overrides) = &self.ellipsoid else {
            return Ok(WGS84);
        };
        let a = overrides.semi_major_axis.unwrap_or(WGS84.a);
        let f = match overrides.inverse_flattening {
            Some(inverse) => 1.0 / inverse,
            None => WGS84.f,
        };
        Ok(Ellipsoid::new(a, f)?)
    }

    pub fn observer(&self) -> Result<Observer> {
        let observer = Observer::new(
            self.observer.name.clone(),
            self.observer.latitude,
            self.observer.longitude,
            self.observer.altitude,
            self.ellipsoid()?,
        )?;
        Ok(observer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const MINIMAL: &str = r#"
[observer]
name = "Beijing"
latitude = 40.0
longitude = 116.0
altitude = 100.0
"#;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = Config::parse(MINIMAL).unwrap();
        assert_eq!(config.observer.name, "Beijing");
        assert_eq!(config.trajectory.step_seconds, 300);
        assert_eq!(config.record.classification, 'U');
        assert_eq!(config.ellipsoid().unwrap(), WGS84);

        let observer = config.observer().unwrap();
        assert_eq!(observer.latitude(), 40.0);
        assert_eq!(observer.altitude(), 100.0);
    }

    #[test]
    fn test_ellipsoid_override() {
        let text = format!(
            "{}\n[ellipsoid]\ninverse_flattening = 298.257222101\n\n[trajectory]\nstep_seconds = 60\nstale_after_days = 14.0\n",
            MINIMAL
        );
        let config = Config::parse(&text).unwrap();
        let ellipsoid = config.ellipsoid().unwrap();
        assert_eq!(ellipsoid.a, WGS84.a);
        assert_abs_diff_eq!(ellipsoid.f, 1.0 / 298.257222101, epsilon = 1e-15);
        assert_eq!(config.trajectory.step_seconds, 60);
    }

    #[test]
    fn test_rejects_invalid_observer() {
        let text = MINIMAL.replace("40.0", "95.0");
        let config = Config::parse(&text).unwrap();
        assert!(config.observer().is_err());

        let text = format!("{}\n[ellipsoid]\nsemi_major_axis = -1.0\n", MINIMAL);
        assert!(Config::parse(&text).unwrap().ellipsoid().is_err());
        assert!(Config::parse("[observer]\nname = \"x\"\n").is_err());
    }
}
