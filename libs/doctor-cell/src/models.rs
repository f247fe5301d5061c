use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use shared_models::geo::Coordinate;

pub const DEFAULT_RADIUS_KM: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub specialty: String,
    pub languages: Vec<String>,
    pub address: String,
    pub coordinate: Option<Coordinate>,
    pub rating: f64,
    pub consultation_fee: f64,
    pub available_today: bool,
    pub online: bool,
    pub review_count: u32,
    pub image_url: Option<String>,
    pub experience_years: Option<u32>,
    pub bio: Option<String>,
}

impl Doctor {
    pub fn speaks(&self, language: &str) -> bool {
        self.languages.iter().any(|l| l == language)
    }
}

/// Primary keys arrive as text or as bigint depending on the table.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RowId {
    Text(String),
    Number(i64),
}

impl RowId {
    fn into_string(self) -> String {
        match self {
            RowId::Text(id) => id,
            RowId::Number(id) => id.to_string(),
        }
    }
}

/// A `doctors` row exactly as the store returns it. Everything but the id is
/// nullable; `lat` and `lng` may be null independently.
#[derive(Debug, Clone, Deserialize)]
pub struct DoctorRow {
    pub id: RowId,
    pub name: Option<String>,
    pub specialty: Option<String>,
    #[serde(default)]
    pub languages: Option<Vec<String>>,
    #[serde(alias = "address")]
    pub location: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub rating: Option<f64>,
    pub consultation_fee: Option<f64>,
    pub available_today: Option<bool>,
    pub online: Option<bool>,
    pub review_count: Option<i64>,
    pub image_url: Option<String>,
    pub experience_years: Option<i64>,
    pub bio: Option<String>,
}

impl DoctorRow {
    /// Decodes one raw store row. A mistyped column rejects only this row.
    pub fn from_value(value: Value) -> Result<Self, DoctorError> {
        let id = match value.get("id") {
            Some(Value::String(id)) => id.clone(),
            Some(Value::Number(id)) => id.to_string(),
            _ => "<unknown>".to_string(),
        };

        serde_json::from_value(value).map_err(|e| DoctorError::invalid_record(&id, e.to_string()))
    }
}

fn required(value: Option<String>, field: &str, id: &str) -> Result<String, DoctorError> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(DoctorError::invalid_record(id, format!("missing {}", field))),
    }
}

impl TryFrom<DoctorRow> for Doctor {
    type Error = DoctorError;

    fn try_from(row: DoctorRow) -> Result<Self, Self::Error> {
        let id = row.id.into_string();
        if id.trim().is_empty() {
            return Err(DoctorError::invalid_record(&id, "empty id"));
        }

        let name = required(row.name, "name", &id)?;
        let specialty = required(row.specialty, "specialty", &id)?;

        let mut languages: Vec<String> = Vec::new();
        for language in row.languages.unwrap_or_default() {
            let language = language.trim().to_string();
            if !language.is_empty() && !languages.contains(&language) {
                languages.push(language);
            }
        }

        // half a coordinate is no coordinate
        let coordinate = match (row.lat, row.lng) {
            (Some(lat), Some(lng)) => Some(
                Coordinate::new(lat, lng).map_err(|e| DoctorError::invalid_record(&id, e.to_string()))?,
            ),
            _ => None,
        };

        let rating = row.rating.unwrap_or(0.0);
        if !rating.is_finite() || !(0.0..=5.0).contains(&rating) {
            return Err(DoctorError::invalid_record(&id, format!("rating {} outside 0-5", rating)));
        }

        let consultation_fee = row.consultation_fee.unwrap_or(0.0);
        if !consultation_fee.is_finite() || consultation_fee < 0.0 {
            return Err(DoctorError::invalid_record(&id, format!("negative consultation fee {}", consultation_fee)));
        }

        let review_count = u32::try_from(row.review_count.unwrap_or(0))
            .map_err(|_| DoctorError::invalid_record(&id, "review count out of range"))?;

        Ok(Doctor {
            id,
            name,
            specialty,
            languages,
            address: row.location.unwrap_or_default(),
            coordinate,
            rating,
            consultation_fee,
            available_today: row.available_today.unwrap_or(false),
            online: row.online.unwrap_or(false),
            review_count,
            image_url: row.image_url,
            experience_years: row.experience_years.and_then(|y| u32::try_from(y).ok()),
            bio: row.bio,
        })
    }
}

/// A doctor as shown in the result list, with the distance from the user when
/// it can be computed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedDoctor {
    #[serde(flatten)]
    pub doctor: Doctor,
    pub distance_km: Option<f64>,
}

/// Either every value, or exactly one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    pub fn admits(&self, value: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(expected) => expected == value,
        }
    }
}

impl From<&str> for Selection {
    fn from(raw: &str) -> Self {
        match raw {
            "" | "all" => Selection::All,
            other => Selection::Only(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Distance,
    Rating,
    Price,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Distance => "distance",
            SortBy::Rating => "rating",
            SortBy::Price => "price",
        }
    }
}

impl FromStr for SortBy {
    type Err = DoctorError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "distance" => Ok(SortBy::Distance),
            "rating" => Ok(SortBy::Rating),
            "price" => Ok(SortBy::Price),
            other => Err(DoctorError::InvalidSortKey(other.to_string())),
        }
    }
}

/// Everything the patient can tune in the doctor list. The radius can only be
/// set through `set_radius_km`, which rejects non-positive values.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    search_query: String,
    specialty: Selection,
    language: Selection,
    online_only: bool,
    available_today_only: bool,
    radius_km: f64,
    sort_by: SortBy,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search_query: String::new(),
            specialty: Selection::All,
            language: Selection::All,
            online_only: false,
            available_today_only: false,
            radius_km: DEFAULT_RADIUS_KM,
            sort_by: SortBy::Distance,
        }
    }
}

impl FilterState {
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn specialty(&self) -> &Selection {
        &self.specialty
    }

    pub fn language(&self) -> &Selection {
        &self.language
    }

    pub fn online_only(&self) -> bool {
        self.online_only
    }

    pub fn available_today_only(&self) -> bool {
        self.available_today_only
    }

    pub fn radius_km(&self) -> f64 {
        self.radius_km
    }

    pub fn sort_by(&self) -> SortBy {
        self.sort_by
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn set_specialty(&mut self, specialty: Selection) {
        self.specialty = specialty;
    }

    pub fn set_language(&mut self, language: Selection) {
        self.language = language;
    }

    pub fn set_online_only(&mut self, online_only: bool) {
        self.online_only = online_only;
    }

    pub fn set_available_today_only(&mut self, available_today_only: bool) {
        self.available_today_only = available_today_only;
    }

    pub fn set_radius_km(&mut self, radius_km: f64) -> Result<(), DoctorError> {
        if !radius_km.is_finite() || radius_km <= 0.0 {
            return Err(DoctorError::InvalidRadius(radius_km));
        }
        self.radius_km = radius_km;
        Ok(())
    }

    pub fn set_sort_by(&mut self, sort_by: SortBy) {
        self.sort_by = sort_by;
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DoctorError {
    #[error("Doctor not found: {0}")]
    NotFound(String),

    #[error("Invalid doctor record {id}: {reason}")]
    InvalidRecord { id: String, reason: String },

    #[error("Search radius must be a positive number of kilometres, got {0}")]
    InvalidRadius(f64),

    #[error("Unknown sort key '{0}', expected distance, rating or price")]
    InvalidSortKey(String),
}

impl DoctorError {
    fn invalid_record(id: &str, reason: impl Into<String>) -> Self {
        DoctorError::InvalidRecord {
            id: id.to_string(),
            reason: reason.into(),
        }
    }
}
