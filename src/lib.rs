//! Geodetic and topocentric geometry for satellite ground stations, two-line
//! element record encoding, and per-revolution time segmentation.

pub mod config;
pub mod elements;
pub mod ellipsoid;
pub mod error;
pub mod geodetic;
pub mod observer;
pub mod satellite;
pub mod segment;
pub mod tle;
pub mod topocentric;
pub mod trajectory;

pub use ellipsoid::{Ellipsoid, WGS84};
pub use error::{GeoError, Result};
pub use geodetic::{Cartesian, Geodetic};
pub use observer::Observer;
pub use satellite::{OrbitPropagator, Satellite};
pub use segment::{segment, RevolutionSegment, TimeWindow};
pub use tle::{encode, EncodedRecord, OrbitalElementSet};
pub use topocentric::{Enu, VisibilityAngles};
