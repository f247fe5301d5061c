use tracing::{debug, info, instrument};

use geolocation_cell::{Geocoder, GeolocationError, GeolocationProvider};
use shared_models::geo::{Coordinate, Position};

use crate::models::{Doctor, DoctorError, RankedDoctor};
use crate::services::filter::DoctorFilterEngine;
use crate::services::repository::DoctorRepository;
use crate::services::selection::DoctorSelectionState;

/// One patient's doctor search: the roster, their position, their filters and
/// the doctor they have open.
pub struct DiscoverySession {
    repository: DoctorRepository,
    geolocation: GeolocationProvider,
    engine: DoctorFilterEngine,
    selection: DoctorSelectionState,
}

impl DiscoverySession {
    /// Loads the roster once and adopts whatever position the provider already
    /// holds.
    #[instrument(skip_all)]
    pub async fn start(repository: DoctorRepository, geolocation: GeolocationProvider) -> Self {
        let mut engine = DoctorFilterEngine::new();
        engine.set_roster(repository.fetch_all().await);

        if let Some(position) = geolocation.position().await {
            engine.set_position(position);
        }

        info!(
            "Discovery session started with {} doctors, position known: {}",
            engine.roster().len(),
            engine.position().is_some()
        );

        Self {
            repository,
            geolocation,
            engine,
            selection: DoctorSelectionState::new(),
        }
    }

    /// "Use my location": asks for a fresh fix. On failure the engine keeps
    /// its current position and the error is handed back for the UI to show.
    pub async fn use_my_location(&mut self) -> Result<Position, GeolocationError> {
        let position = self.geolocation.acquire().await?;
        self.engine.set_position(position.clone());
        Ok(position)
    }

    /// Position picked by hand, e.g. a pin on the map.
    pub fn set_manual_position(&mut self, coordinate: Coordinate) {
        self.engine.set_position(Position::exact(coordinate));
    }

    /// Looks up a typed address. `None` when nothing was found, in which case
    /// the current position is kept.
    pub async fn use_address(&mut self, geocoder: &dyn Geocoder, address: &str) -> Option<Position> {
        let coordinate = geocoder.geocode(address).await?;
        let position = Position::exact(coordinate);
        self.engine.set_position(position.clone());
        Some(position)
    }

    /// Re-reads the roster from the store.
    pub async fn reload_roster(&mut self) {
        self.engine.set_roster(self.repository.fetch_all().await);
    }

    /// Opens the detail view for a doctor from the roster, whether or not the
    /// current filters show them.
    pub fn open_doctor(&mut self, doctor_id: &str) -> Result<&Doctor, DoctorError> {
        let doctor = self
            .engine
            .roster()
            .iter()
            .find(|d| d.id == doctor_id)
            .cloned()
            .ok_or_else(|| DoctorError::NotFound(doctor_id.to_string()))?;

        debug!("Opening doctor {}", doctor.id);
        Ok(self.selection.select(doctor))
    }

    pub fn close_doctor(&mut self) {
        self.selection.clear();
    }

    pub fn results(&self) -> &[RankedDoctor] {
        self.engine.results()
    }

    pub fn engine(&self) -> &DoctorFilterEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut DoctorFilterEngine {
        &mut self.engine
    }

    pub fn selection(&self) -> &DoctorSelectionState {
        &self.selection
    }

    pub fn geolocation(&self) -> &GeolocationProvider {
        &self.geolocation
    }
}
