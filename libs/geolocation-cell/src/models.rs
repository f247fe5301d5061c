use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_models::geo::Position;

/// Hard ceiling on a single positioning request.
pub const GEOLOCATION_TIMEOUT_MS: u64 = 10_000;

/// Options handed to the platform on every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionOptions {
    pub high_accuracy: bool,
    pub timeout_ms: u64,
    pub max_cached_age_ms: u64,
}

impl Default for PositionOptions {
    /// Highest accuracy, 10 s timeout, never reuse a cached fix.
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout_ms: GEOLOCATION_TIMEOUT_MS,
            max_cached_age_ms: 0,
        }
    }
}

/// Failure codes reported by the platform positioning capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionErrorCode {
    PermissionDenied,
    PositionUnavailable,
    Timeout,
    Unsupported,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeolocationError {
    #[error("Geolocation is not supported on this platform")]
    Unsupported,

    #[error("Location permission was denied")]
    PermissionDenied,

    #[error("Position is unavailable")]
    Unavailable,

    #[error("Timed out waiting for a position")]
    Timeout,
}

impl From<PositionErrorCode> for GeolocationError {
    fn from(code: PositionErrorCode) -> Self {
        match code {
            PositionErrorCode::PermissionDenied => GeolocationError::PermissionDenied,
            PositionErrorCode::PositionUnavailable => GeolocationError::Unavailable,
            PositionErrorCode::Timeout => GeolocationError::Timeout,
            PositionErrorCode::Unsupported => GeolocationError::Unsupported,
        }
    }
}

/// What consumers read from the provider at any moment.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GeolocationState {
    pub position: Option<Position>,
    pub error: Option<GeolocationError>,
    pub loading: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_request_a_fresh_fix() {
        let options = PositionOptions::default();

        assert!(options.high_accuracy);
        assert_eq!(options.timeout_ms, 10_000);
        assert_eq!(options.max_cached_age_ms, 0);
    }

    #[test]
    fn test_platform_codes_map_to_errors() {
        assert_eq!(GeolocationError::from(PositionErrorCode::PositionUnavailable), GeolocationError::Unavailable);
        assert_eq!(GeolocationError::from(PositionErrorCode::PermissionDenied), GeolocationError::PermissionDenied);
        assert_eq!(GeolocationError::from(PositionErrorCode::Timeout), GeolocationError::Timeout);
        assert_eq!(GeolocationError::from(PositionErrorCode::Unsupported), GeolocationError::Unsupported);
    }

    #[test]
    fn test_error_serializes_as_snake_case() {
        let json = serde_json::to_value(GeolocationError::PermissionDenied).unwrap();
        assert_eq!(json, "permission_denied");
    }
}
