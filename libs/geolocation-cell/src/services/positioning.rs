use async_trait::async_trait;
use tracing::debug;

use shared_models::geo::{Coordinate, Position};

use crate::models::{PositionErrorCode, PositionOptions};

/// The device's positioning capability (GPS, browser geolocation, ...).
#[async_trait]
pub trait PositioningCapability: Send + Sync {
    async fn request_position(&self, options: PositionOptions) -> Result<Position, PositionErrorCode>;
}

/// Always reports the same place. Used for kiosks and demo deployments that
/// pin the patient to a clinic location.
pub struct FixedPositioning {
    coordinate: Coordinate,
    accuracy_m: f64,
}

impl FixedPositioning {
    pub fn new(coordinate: Coordinate, accuracy_m: f64) -> Self {
        Self { coordinate, accuracy_m }
    }
}

#[async_trait]
impl PositioningCapability for FixedPositioning {
    async fn request_position(&self, options: PositionOptions) -> Result<Position, PositionErrorCode> {
        debug!("Fixed positioning answering request {:?}", options);
        Position::new(self.coordinate, self.accuracy_m).map_err(|_| PositionErrorCode::PositionUnavailable)
    }
}
