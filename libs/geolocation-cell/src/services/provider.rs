use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use tokio::time::{timeout, Duration};
use tracing::{debug, info, instrument, warn};

use shared_models::geo::Position;

use crate::models::{GeolocationError, GeolocationState, PositionOptions};
use crate::services::positioning::PositioningCapability;

#[derive(Debug, Default)]
struct LastKnown {
    position: Option<Position>,
    error: Option<GeolocationError>,
}

/// Owns the user's last known position and the outcome of the latest request.
///
/// Cloning is cheap and every clone observes the same state. Only `acquire()`
/// writes to it.
#[derive(Clone)]
pub struct GeolocationProvider {
    platform: Option<Arc<dyn PositioningCapability>>,
    last_known: Arc<RwLock<LastKnown>>,
    in_flight: Arc<AtomicUsize>,
}

/// Keeps `is_loading()` accurate even if an `acquire()` future is dropped.
struct InFlightGuard(Arc<AtomicUsize>);

impl InFlightGuard {
    fn enter(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter.clone())
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl GeolocationProvider {
    /// Builds a provider without touching the platform. `None` means the
    /// platform has no positioning capability at all.
    pub fn new(platform: Option<Arc<dyn PositioningCapability>>) -> Self {
        Self {
            platform,
            last_known: Arc::new(RwLock::new(LastKnown::default())),
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Builds a provider and requests an initial fix. A failed initial
    /// request is logged and recorded in the error state, never returned.
    pub async fn start(platform: Option<Arc<dyn PositioningCapability>>) -> Self {
        let provider = Self::new(platform);

        if let Err(e) = provider.acquire().await {
            warn!("Initial location request failed: {}", e);
        }

        provider
    }

    /// Requests a fresh fix, bounded by a 10 second timeout.
    ///
    /// A late platform answer after the timeout is discarded: the pending
    /// request is dropped together with the timeout future.
    #[instrument(skip(self))]
    pub async fn acquire(&self) -> Result<Position, GeolocationError> {
        let Some(platform) = self.platform.clone() else {
            warn!("No positioning capability available");
            self.record(Err(GeolocationError::Unsupported)).await;
            return Err(GeolocationError::Unsupported);
        };

        let _guard = InFlightGuard::enter(&self.in_flight);
        let options = PositionOptions::default();

        debug!("Requesting position with {:?}", options);

        let outcome = match timeout(
            Duration::from_millis(options.timeout_ms),
            platform.request_position(options),
        )
        .await
        {
            Ok(Ok(position)) => Ok(position),
            Ok(Err(code)) => Err(GeolocationError::from(code)),
            Err(_) => Err(GeolocationError::Timeout),
        };

        self.record(outcome.clone()).await;

        match &outcome {
            Ok(position) => info!(
                "Acquired position ({:.4}, {:.4}) +/- {} m",
                position.coordinate.latitude(),
                position.coordinate.longitude(),
                position.accuracy_m
            ),
            Err(e) => warn!("Location request failed: {}", e),
        }

        outcome
    }

    async fn record(&self, outcome: Result<Position, GeolocationError>) {
        let mut last_known = self.last_known.write().await;

        match outcome {
            Ok(position) => {
                last_known.position = Some(position);
                last_known.error = None;
            }
            Err(e) => {
                last_known.error = Some(e);
            }
        }
    }

    pub async fn position(&self) -> Option<Position> {
        self.last_known.read().await.position.clone()
    }

    pub async fn error(&self) -> Option<GeolocationError> {
        self.last_known.read().await.error
    }

    /// True while at least one request is outstanding.
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    pub fn is_supported(&self) -> bool {
        self.platform.is_some()
    }

    pub async fn snapshot(&self) -> GeolocationState {
        let last_known = self.last_known.read().await;

        GeolocationState {
            position: last_known.position.clone(),
            error: last_known.error,
            loading: self.is_loading(),
        }
    }
}
