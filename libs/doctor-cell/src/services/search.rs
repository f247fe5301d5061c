use crate::models::Doctor;

/// Case-insensitive substring match against name, specialty and address.
/// A blank query matches everyone.
pub fn matches(doctor: &Doctor, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    [&doctor.name, &doctor.specialty, &doctor.address]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fallback::fallback_roster;

    fn amina() -> Doctor {
        fallback_roster()
            .into_iter()
            .find(|d| d.specialty == "Cardiology")
            .unwrap()
    }

    #[test]
    fn test_empty_query_matches() {
        assert!(matches(&amina(), ""));
        assert!(matches(&amina(), "   "));
    }

    #[test]
    fn test_specialty_substring_is_case_insensitive() {
        let mut doctor = amina();
        doctor.name = "Dr. Nobody".to_string();
        doctor.address = "Nowhere".to_string();

        assert!(matches(&doctor, "cardio"));
        assert!(matches(&doctor, "CARDIO"));
    }

    #[test]
    fn test_any_field_is_enough() {
        let doctor = amina();

        assert!(matches(&doctor, "benali"));
        assert!(matches(&doctor, "anfa"));
        assert!(!matches(&doctor, "pediatrics"));
    }

    #[test]
    fn test_query_must_be_contiguous() {
        assert!(!matches(&amina(), "cardio casablanca"));
    }
}
