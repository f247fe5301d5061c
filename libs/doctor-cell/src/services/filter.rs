use std::cmp::Ordering;
use std::collections::BTreeSet;

use tracing::debug;

use shared_models::geo::Position;
use shared_utils::distance_km;

use crate::models::{Doctor, DoctorError, FilterState, RankedDoctor, Selection, SortBy};
use crate::services::search;

/// Runs the discovery pipeline over a roster.
///
/// The output depends only on the three inputs. Steps, in order: annotate
/// distance, text, specialty, language, online, available today, radius (only
/// with a known position), then a stable sort.
pub fn derive(roster: &[Doctor], position: Option<&Position>, filters: &FilterState) -> Vec<RankedDoctor> {
    let origin = position.map(|p| p.coordinate);

    let mut ranked: Vec<RankedDoctor> = roster
        .iter()
        .map(|doctor| {
            let distance = origin
                .zip(doctor.coordinate)
                .map(|(from, to)| distance_km(&from, &to));
            (doctor, distance)
        })
        .filter(|(doctor, _)| search::matches(doctor, filters.search_query()))
        .filter(|(doctor, _)| filters.specialty().admits(&doctor.specialty))
        .filter(|(doctor, _)| match filters.language() {
            Selection::All => true,
            Selection::Only(language) => doctor.speaks(language),
        })
        .filter(|(doctor, _)| !filters.online_only() || doctor.online)
        .filter(|(doctor, _)| !filters.available_today_only() || doctor.available_today)
        .filter(|(_, distance)| {
            origin.is_none() || distance.is_some_and(|km| km <= filters.radius_km())
        })
        .map(|(doctor, distance_km)| RankedDoctor {
            doctor: doctor.clone(),
            distance_km,
        })
        .collect();

    sort_ranked(&mut ranked, filters.sort_by());
    ranked
}

fn by_value(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Stable; unknown distances sort after every known one.
fn sort_ranked(ranked: &mut [RankedDoctor], sort_by: SortBy) {
    match sort_by {
        SortBy::Distance => ranked.sort_by(|a, b| match (a.distance_km, b.distance_km) {
            (Some(a), Some(b)) => by_value(a, b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }),
        SortBy::Rating => ranked.sort_by(|a, b| by_value(b.doctor.rating, a.doctor.rating)),
        SortBy::Price => {
            ranked.sort_by(|a, b| by_value(a.doctor.consultation_fee, b.doctor.consultation_fee))
        }
    }
}

/// Distinct specialties for the specialty picker, alphabetical.
pub fn available_specialties(roster: &[Doctor]) -> Vec<String> {
    roster
        .iter()
        .map(|d| d.specialty.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct spoken languages for the language picker, alphabetical.
pub fn available_languages(roster: &[Doctor]) -> Vec<String> {
    roster
        .iter()
        .flat_map(|d| d.languages.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Keeps the derived doctor list in step with its inputs.
///
/// Any input may arrive first: a missing roster reads as empty and a missing
/// position as "distance unknown". Every setter re-runs [`derive`].
#[derive(Debug, Default)]
pub struct DoctorFilterEngine {
    roster: Option<Vec<Doctor>>,
    position: Option<Position>,
    filters: FilterState,
    results: Vec<RankedDoctor>,
}

impl DoctorFilterEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn rederive(&mut self) {
        let roster = self.roster.as_deref().unwrap_or(&[]);
        self.results = derive(roster, self.position.as_ref(), &self.filters);

        debug!(
            "Derived {} of {} doctors (position known: {})",
            self.results.len(),
            roster.len(),
            self.position.is_some()
        );
    }

    pub fn set_roster(&mut self, roster: Vec<Doctor>) {
        self.roster = Some(roster);
        self.rederive();
    }

    pub fn set_position(&mut self, position: Position) {
        self.position = Some(position);
        self.rederive();
    }

    pub fn clear_position(&mut self) {
        self.position = None;
        self.rederive();
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.filters.set_search_query(query);
        self.rederive();
    }

    pub fn set_specialty(&mut self, specialty: Selection) {
        self.filters.set_specialty(specialty);
        self.rederive();
    }

    pub fn set_language(&mut self, language: Selection) {
        self.filters.set_language(language);
        self.rederive();
    }

    pub fn set_online_only(&mut self, online_only: bool) {
        self.filters.set_online_only(online_only);
        self.rederive();
    }

    pub fn set_available_today_only(&mut self, available_today_only: bool) {
        self.filters.set_available_today_only(available_today_only);
        self.rederive();
    }

    /// Leaves the engine untouched when the radius is rejected.
    pub fn set_radius_km(&mut self, radius_km: f64) -> Result<(), DoctorError> {
        self.filters.set_radius_km(radius_km)?;
        self.rederive();
        Ok(())
    }

    pub fn set_sort_by(&mut self, sort_by: SortBy) {
        self.filters.set_sort_by(sort_by);
        self.rederive();
    }

    pub fn results(&self) -> &[RankedDoctor] {
        &self.results
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn position(&self) -> Option<&Position> {
        self.position.as_ref()
    }

    pub fn roster(&self) -> &[Doctor] {
        self.roster.as_deref().unwrap_or(&[])
    }

    pub fn is_roster_loaded(&self) -> bool {
        self.roster.is_some()
    }
}
