use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use geolocation_cell::{Geocoder, NominatimGeocoder};
use shared_config::AppConfig;
use shared_models::error::AppError;
use shared_models::geo::{Coordinate, Position};

use crate::models::{FilterState, Selection, SortBy};
use crate::services::filter::{available_languages, available_specialties, derive};
use crate::services::repository::DoctorRepository;

#[derive(Debug, Default, Deserialize)]
pub struct DiscoverQuery {
    pub q: Option<String>,
    pub specialty: Option<String>,
    pub language: Option<String>,
    pub online_only: Option<bool>,
    pub available_today: Option<bool>,
    pub radius_km: Option<f64>,
    pub sort_by: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub address: Option<String>,
}

impl DiscoverQuery {
    fn filters(&self) -> Result<FilterState, AppError> {
        let mut filters = FilterState::default();

        if let Some(q) = &self.q {
            filters.set_search_query(q.as_str());
        }
        if let Some(specialty) = &self.specialty {
            filters.set_specialty(Selection::from(specialty.as_str()));
        }
        if let Some(language) = &self.language {
            filters.set_language(Selection::from(language.as_str()));
        }
        filters.set_online_only(self.online_only.unwrap_or(false));
        filters.set_available_today_only(self.available_today.unwrap_or(false));

        if let Some(radius_km) = self.radius_km {
            filters
                .set_radius_km(radius_km)
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
        }
        if let Some(sort_by) = &self.sort_by {
            let sort_by = sort_by
                .parse::<SortBy>()
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            filters.set_sort_by(sort_by);
        }

        Ok(filters)
    }

    /// Explicit coordinates win over an address; neither means no position.
    /// The geocoder is only built when an address has to be looked up.
    async fn position(&self, config: &AppConfig) -> Result<Option<Position>, AppError> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Ok(Some(Position::exact(Coordinate::new(lat, lng)?))),
            (Some(_), None) | (None, Some(_)) => Err(AppError::BadRequest(
                "lat and lng must be provided together".to_string(),
            )),
            (None, None) => match self.address.as_deref() {
                Some(address) => {
                    let geocoder = NominatimGeocoder::new(config);
                    Ok(geocoder.geocode(address).await.map(Position::exact))
                }
                None => Ok(None),
            },
        }
    }
}

#[axum::debug_handler]
pub async fn discover_doctors(
    State(state): State<Arc<AppConfig>>,
    Query(query): Query<DiscoverQuery>,
) -> Result<Json<Value>, AppError> {
    let filters = query.filters()?;
    let position = query.position(&state).await?;

    let repository = DoctorRepository::from_config(&state);
    let roster = repository.fetch_all().await;

    let doctors = derive(&roster, position.as_ref(), &filters);
    debug!("Discover returned {} of {} doctors", doctors.len(), roster.len());

    Ok(Json(json!({
        "doctors": doctors,
        "total": doctors.len(),
        "position_known": position.is_some(),
        "sort_by": filters.sort_by(),
        "radius_km": filters.radius_km()
    })))
}

#[axum::debug_handler]
pub async fn get_filter_options(
    State(state): State<Arc<AppConfig>>,
) -> Result<Json<Value>, AppError> {
    let repository = DoctorRepository::from_config(&state);
    let roster = repository.fetch_all().await;

    Ok(Json(json!({
        "specialties": available_specialties(&roster),
        "languages": available_languages(&roster)
    })))
}

#[axum::debug_handler]
pub async fn get_doctor(
    State(state): State<Arc<AppConfig>>,
    Path(doctor_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let repository = DoctorRepository::from_config(&state);

    let doctor = repository
        .fetch_by_id(&doctor_id)
        .await
        .ok_or_else(|| AppError::NotFound("Doctor not found".to_string()))?;

    Ok(Json(json!(doctor)))
}
