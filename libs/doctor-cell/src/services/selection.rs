use crate::models::Doctor;

/// The doctor whose detail view is open, if any. Unrelated to filtering:
/// selecting never changes the result list and filtering never clears the
/// selection.
#[derive(Debug, Clone, Default)]
pub struct DoctorSelectionState {
    selected: Option<Doctor>,
}

impl DoctorSelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any previous selection.
    pub fn select(&mut self, doctor: Doctor) -> &Doctor {
        self.selected.insert(doctor)
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&Doctor> {
        self.selected.as_ref()
    }

    pub fn is_selected(&self, doctor_id: &str) -> bool {
        self.selected.as_ref().is_some_and(|d| d.id == doctor_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fallback::fallback_roster;

    #[test]
    fn test_select_replaces_previous() {
        let roster = fallback_roster();
        let mut selection = DoctorSelectionState::new();
        assert!(selection.selected().is_none());

        selection.select(roster[0].clone());
        let current = selection.select(roster[1].clone());

        assert_eq!(current.id, "fallback-2");

        assert_eq!(selection.selected().map(|d| d.id.as_str()), Some("fallback-2"));
        assert!(selection.is_selected("fallback-2"));
        assert!(!selection.is_selected("fallback-1"));
    }

    #[test]
    fn test_clear() {
        let mut selection = DoctorSelectionState::new();
        selection.select(fallback_roster()[0].clone());

        selection.clear();

        assert!(selection.selected().is_none());
    }
}
