use thiserror::Error;

/// Errors reported by the geometry, record and segmentation routines.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    #[error("{field} out of range ({value}): {reason}")]
    InputRange {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("geodetic latitude did not converge after {iterations} iterations (residual {residual:e} rad)")]
    Convergence { iterations: usize, residual: f64 },

    #[error("target lies on the observer's vertical, azimuth is undefined")]
    DegenerateGeometry,

    #[error("cannot format {field}: {reason}")]
    Format { field: &'static str, reason: String },

    #[error("checksum mismatch on line {line}: expected {expected}, found {found}")]
    Checksum { line: u8, expected: u8, found: char },

    #[error("propagation failed: {0}")]
    Propagation(String),
}

pub type Result<T> = std::result::Result<T, GeoError>;

impl GeoError {
    pub(crate) fn range(field: &'static str, value: f64, reason: &'static str) -> Self {
        GeoError::InputRange {
            field,
            value,
            reason,
        }
    }

    pub(crate) fn format(field: &'static str, reason: impl Into<String>) -> Self {
        GeoError::Format {
            field,
            reason: reason.into(),
        }
    }
}
