//! Error types for parametric geometry and STL export
//!
//! Every error message carries a bracketed error code so that hosts can
//! categorize failures without matching on message text.
//!
//! # Error Codes
//!
//! Error codes follow the pattern: `E<category><number>`
//!
//! Categories:
//! - **E1xxx**: Parameter and input errors
//! - **E2xxx**: Geometry construction errors
//! - **E3xxx**: Export and STL format errors
//! - **E4xxx**: I/O errors
//!
//! ## Common Error Codes
//!
//! - `E1001`: Invalid parameter value (negative, non-finite, too few points)
//! - `E1002`: Missing parameter in a settings map
//! - `E1003`: Parameter has the wrong value type
//! - `E1004`: Parameter not declared by the project
//! - `E1005`: Unparseable color string
//! - `E1006`: Unknown part name
//! - `E2001`: Polygon triangulation failure
//! - `E2002`: Degenerate geometry
//! - `E3001`: Export requested with no mesh group
//! - `E3002`: Triangle count does not fit the STL count field
//! - `E3003`: Malformed binary STL buffer
//! - `E4001`: I/O error while writing

use std::io;
use thiserror::Error;

use crate::polygon_triangulation::TriangulationError;

/// Result type for studio3d operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building, checking or exporting geometry
#[derive(Error, Debug)]
pub enum Error {
    /// A dimension or input value was rejected before construction
    ///
    /// **Error Code**: E1001
    ///
    /// **Common Causes**:
    /// - Negative or NaN radius, length or thickness
    /// - Curve or outline with fewer points than required
    /// - Model scale that is not strictly positive
    #[error("[E1001] Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter or argument name
        name: String,
        /// Why the value was rejected
        reason: String,
    },

    /// A settings map does not contain a key the project needs
    ///
    /// **Error Code**: E1002
    #[error("[E1002] Missing parameter: {0}")]
    MissingParameter(String),

    /// A settings entry holds the wrong kind of value
    ///
    /// **Error Code**: E1003
    ///
    /// **Suggestions**:
    /// - Range controls take numbers, toggles take booleans, selects take one of their options
    #[error("[E1003] Parameter '{key}' has the wrong type: expected {expected}")]
    ParameterType {
        /// Parameter key
        key: String,
        /// Description of the expected value
        expected: String,
    },

    /// A settings key that the project does not declare
    ///
    /// **Error Code**: E1004
    #[error("[E1004] Unknown parameter: {0}")]
    UnknownParameter(String),

    /// Color string could not be parsed
    ///
    /// **Error Code**: E1005
    ///
    /// **Suggestions**:
    /// - Use `#rrggbb` hex notation
    #[error("[E1005] Invalid color: {0}")]
    InvalidColor(String),

    /// Color override for a part the project does not produce
    ///
    /// **Error Code**: E1006
    #[error("[E1006] Unknown part: {0}")]
    UnknownPart(String),

    /// Outline triangulation failed
    ///
    /// **Error Code**: E2001
    #[error("[E2001] Triangulation error: {0}")]
    Triangulation(#[from] TriangulationError),

    /// Geometry that cannot form a solid
    ///
    /// **Error Code**: E2002
    ///
    /// **Common Causes**:
    /// - Outline with zero area
    /// - Sweep curve whose control points all coincide
    #[error("[E2002] Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// Export requested before any mesh group was built
    ///
    /// **Error Code**: E3001
    #[error("[E3001] Nothing to export: no mesh group has been built")]
    NothingToExport,

    /// The mesh group has more triangles than the 32-bit count field can hold
    ///
    /// **Error Code**: E3002
    #[error("[E3002] Too many triangles for binary STL: {0}")]
    TooManyTriangles(usize),

    /// Binary STL buffer is malformed
    ///
    /// **Error Code**: E3003
    ///
    /// **Common Causes**:
    /// - Buffer shorter than the 84-byte header
    /// - Triangle count disagrees with the buffer length
    #[error("[E3003] Invalid STL data: {0}")]
    InvalidStl(String),

    /// I/O error while writing an export
    ///
    /// **Error Code**: E4001
    #[error("[E4001] I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Create an invalid parameter error
    ///
    /// # Example
    /// ```
    /// use studio3d::Error;
    /// let err = Error::invalid_parameter("radius", "must be finite and non-negative, got -1");
    /// assert!(err.to_string().contains("[E1001]"));
    /// ```
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a parameter type error
    pub fn parameter_type(key: impl Into<String>, expected: impl Into<String>) -> Self {
        Error::ParameterType {
            key: key.into(),
            expected: expected.into(),
        }
    }

    /// Reject a dimension unless it is finite and non-negative
    pub fn check_dimension(name: &str, value: f64) -> Result<f64> {
        if value.is_finite() && value >= 0.0 {
            Ok(value)
        } else {
            Err(Self::invalid_parameter(
                name,
                format!("must be finite and non-negative, got {}", value),
            ))
        }
    }

    /// Reject a value unless it is finite and strictly positive
    pub fn check_positive(name: &str, value: f64) -> Result<f64> {
        if value.is_finite() && value > 0.0 {
            Ok(value)
        } else {
            Err(Self::invalid_parameter(
                name,
                format!("must be finite and positive, got {}", value),
            ))
        }
    }

    /// Reject a segment count below the given minimum
    pub fn check_segments(name: &str, value: usize, min: usize) -> Result<usize> {
        if value >= min {
            Ok(value)
        } else {
            Err(Self::invalid_parameter(
                name,
                format!("needs at least {} segments, got {}", min, value),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_in_messages() {
        let err = Error::invalid_parameter("radius", "negative");
        assert!(err.to_string().contains("[E1001]"));

        let err = Error::MissingParameter("height".to_string());
        assert!(err.to_string().contains("[E1002]"));

        let err = Error::parameter_type("printLayout", "boolean");
        assert!(err.to_string().contains("[E1003]"));
        assert!(err.to_string().contains("expected boolean"));

        let err = Error::UnknownParameter("wingspan".to_string());
        assert!(err.to_string().contains("[E1004]"));

        let err = Error::InvalidColor("#zzz".to_string());
        assert!(err.to_string().contains("[E1005]"));

        let err = Error::UnknownPart("antenna".to_string());
        assert!(err.to_string().contains("[E1006]"));

        let err = Error::DegenerateGeometry("zero area".to_string());
        assert!(err.to_string().contains("[E2002]"));

        assert!(Error::NothingToExport.to_string().contains("[E3001]"));

        let err = Error::TooManyTriangles(usize::MAX);
        assert!(err.to_string().contains("[E3002]"));

        let err = Error::InvalidStl("truncated".to_string());
        assert!(err.to_string().contains("[E3003]"));

        let err = Error::Io(io::Error::new(io::ErrorKind::WriteZero, "test"));
        assert!(err.to_string().contains("[E4001]"));
    }

    #[test]
    fn test_triangulation_error_conversion() {
        let err: Error = TriangulationError::TooFewVertices(2).into();
        assert!(err.to_string().contains("[E2001]"));
        assert!(err.to_string().contains("too few vertices"));
    }

    #[test]
    fn test_check_dimension() {
        assert_eq!(Error::check_dimension("r", 0.0).unwrap(), 0.0);
        assert_eq!(Error::check_dimension("r", 2.5).unwrap(), 2.5);
        assert!(Error::check_dimension("r", -0.1).is_err());
        assert!(Error::check_dimension("r", f64::NAN).is_err());
        assert!(Error::check_dimension("r", f64::INFINITY).is_err());

        let err = Error::check_dimension("radius", -1.0).unwrap_err();
        assert!(err.to_string().contains("'radius'"));
    }

    #[test]
    fn test_check_positive_and_segments() {
        assert!(Error::check_positive("scale", 0.0).is_err());
        assert!(Error::check_positive("scale", 1.5).is_ok());
        assert!(Error::check_segments("radial", 2, 3).is_err());
        assert_eq!(Error::check_segments("radial", 8, 3).unwrap(), 8);
    }
}
