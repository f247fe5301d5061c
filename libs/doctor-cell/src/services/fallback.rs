use shared_models::geo::Coordinate;

use crate::models::Doctor;

#[allow(clippy::too_many_arguments)]
fn doctor(
    id: &str,
    name: &str,
    specialty: &str,
    languages: &[&str],
    address: &str,
    coordinate: Option<(f64, f64)>,
    rating: f64,
    consultation_fee: f64,
    available_today: bool,
    online: bool,
    review_count: u32,
    experience_years: u32,
) -> Doctor {
    Doctor {
        id: id.to_string(),
        name: name.to_string(),
        specialty: specialty.to_string(),
        languages: languages.iter().map(|l| l.to_string()).collect(),
        address: address.to_string(),
        coordinate: coordinate.and_then(|(lat, lng)| Coordinate::new(lat, lng).ok()),
        rating,
        consultation_fee,
        available_today,
        online,
        review_count,
        image_url: None,
        experience_years: Some(experience_years),
        bio: None,
    }
}

/// Roster served when the doctor store is unreachable or empty.
pub fn fallback_roster() -> Vec<Doctor> {
    vec![
        doctor(
            "fallback-1",
            "Dr. Amina Benali",
            "Cardiology",
            &["French", "Arabic", "English"],
            "Boulevard d'Anfa, Casablanca",
            Some((33.5950, -7.6192)),
            4.8,
            400.0,
            true,
            true,
            127,
            15,
        ),
        doctor(
            "fallback-2",
            "Dr. Youssef El Idrissi",
            "Pediatrics",
            &["Arabic", "French"],
            "Rue Mohammed V, Casablanca",
            Some((33.5898, -7.6039)),
            4.9,
            300.0,
            true,
            false,
            98,
            12,
        ),
        doctor(
            "fallback-3",
            "Dr. Sarah Alaoui",
            "Dermatology",
            &["French", "English"],
            "Maarif, Casablanca",
            Some((33.5883, -7.6325)),
            4.6,
            350.0,
            false,
            true,
            76,
            9,
        ),
        doctor(
            "fallback-4",
            "Dr. Karim Tazi",
            "General Medicine",
            &["Arabic", "French", "Spanish"],
            "Hay Riad, Rabat",
            Some((33.9591, -6.8656)),
            4.5,
            200.0,
            true,
            true,
            210,
            20,
        ),
        doctor(
            "fallback-5",
            "Dr. Leila Chraibi",
            "Gynecology",
            &["Arabic", "French"],
            "Agdal, Rabat",
            Some((33.9981, -6.8495)),
            4.7,
            450.0,
            false,
            false,
            64,
            11,
        ),
        doctor(
            "fallback-6",
            "Dr. Omar Berrada",
            "Ophthalmology",
            &["French", "English", "Arabic"],
            "Gauthier, Casablanca",
            Some((33.5925, -7.6276)),
            4.4,
            380.0,
            true,
            false,
            51,
            7,
        ),
        doctor(
            "fallback-7",
            "Dr. Nadia Fassi",
            "Psychiatry",
            &["French", "English"],
            "Teleconsultation only",
            None,
            4.9,
            500.0,
            true,
            true,
            143,
            18,
        ),
        doctor(
            "fallback-8",
            "Dr. Hicham Bennani",
            "Orthopedics",
            &["Arabic", "French"],
            "Ain Diab, Casablanca",
            Some((33.5923, -7.6700)),
            4.3,
            420.0,
            false,
            true,
            39,
            6,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_fallback_roster_is_valid() {
        let roster = fallback_roster();
        assert!(!roster.is_empty());

        let ids: HashSet<_> = roster.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids.len(), roster.len());

        for doctor in &roster {
            assert!((0.0..=5.0).contains(&doctor.rating));
            assert!(doctor.consultation_fee >= 0.0);
        }
    }

    #[test]
    fn test_fallback_roster_keeps_teleconsultation_doctor_without_coordinate() {
        let roster = fallback_roster();
        let located = roster.iter().filter(|d| d.coordinate.is_some()).count();

        assert_eq!(located, roster.len() - 1);
    }
}
