use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoordinateError {
    #[error("Latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("Longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),

    #[error("Accuracy {0} must be a non-negative number of meters")]
    InvalidAccuracy(f64),
}

/// A point on the globe in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinateError::LatitudeOutOfRange(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateError::LongitudeOutOfRange(longitude));
        }
        Ok(Self { latitude, longitude })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

#[derive(Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = CoordinateError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Coordinate::new(raw.latitude, raw.longitude)
    }
}

/// A single fix: where the user is, how precise it is, and when it was taken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub coordinate: Coordinate,
    pub accuracy_m: f64,
    pub captured_at: DateTime<Utc>,
}

impl Position {
    pub fn new(coordinate: Coordinate, accuracy_m: f64) -> Result<Self, CoordinateError> {
        if !accuracy_m.is_finite() || accuracy_m < 0.0 {
            return Err(CoordinateError::InvalidAccuracy(accuracy_m));
        }
        Ok(Self {
            coordinate,
            accuracy_m,
            captured_at: Utc::now(),
        })
    }

    /// Position with no accuracy information, e.g. from a geocoded address.
    pub fn exact(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            accuracy_m: 0.0,
            captured_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_accepts_bounds() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn test_coordinate_rejects_out_of_range() {
        assert_eq!(
            Coordinate::new(91.0, 0.0),
            Err(CoordinateError::LatitudeOutOfRange(91.0))
        );
        assert_eq!(
            Coordinate::new(0.0, -180.5),
            Err(CoordinateError::LongitudeOutOfRange(-180.5))
        );
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_coordinate_deserialization_is_validated() {
        let ok: Coordinate = serde_json::from_str(r#"{"latitude":33.5,"longitude":-7.6}"#).unwrap();
        assert_eq!(ok.latitude(), 33.5);
        assert!(serde_json::from_str::<Coordinate>(r#"{"latitude":120.0,"longitude":0.0}"#).is_err());
    }

    #[test]
    fn test_position_rejects_negative_accuracy() {
        let coordinate = Coordinate::new(33.5731, -7.5898).unwrap();
        assert!(Position::new(coordinate, -1.0).is_err());
        assert_eq!(Position::new(coordinate, 12.5).unwrap().accuracy_m, 12.5);
    }
}
