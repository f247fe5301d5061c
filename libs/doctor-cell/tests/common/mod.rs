// libs/doctor-cell/tests/common/mod.rs

#![allow(dead_code)]

use doctor_cell::Doctor;
use shared_models::geo::{Coordinate, Position};

pub fn doctor(id: &str, specialty: &str) -> Doctor {
    Doctor {
        id: id.to_string(),
        name: format!("Dr. {}", id),
        specialty: specialty.to_string(),
        languages: vec!["French".to_string()],
        address: "Casablanca".to_string(),
        coordinate: None,
        rating: 4.0,
        consultation_fee: 300.0,
        available_today: false,
        online: false,
        review_count: 10,
        image_url: None,
        experience_years: None,
        bio: None,
    }
}

pub fn located(mut doctor: Doctor, lat: f64, lng: f64) -> Doctor {
    doctor.coordinate = Some(Coordinate::new(lat, lng).unwrap());
    doctor
}

pub fn casablanca_centre() -> Position {
    Position::new(Coordinate::new(33.5731, -7.5898).unwrap(), 20.0).unwrap()
}

pub fn ids(results: &[doctor_cell::RankedDoctor]) -> Vec<&str> {
    results.iter().map(|r| r.doctor.id.as_str()).collect()
}
