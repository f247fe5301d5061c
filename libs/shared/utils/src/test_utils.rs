use std::sync::Arc;
use serde_json::{json, Value};

use shared_config::AppConfig;

pub struct TestConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub doctors_table: String,
    pub geocoding_base_url: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            supabase_url: "http://localhost:54321".to_string(),
            supabase_anon_key: "test-anon-key".to_string(),
            doctors_table: "doctors".to_string(),
            geocoding_base_url: "http://localhost:54322".to_string(),
        }
    }
}

impl TestConfig {
    /// Points both the store and the geocoder at a mock server.
    pub fn with_mock_server(uri: &str) -> Self {
        Self {
            supabase_url: uri.to_string(),
            geocoding_base_url: uri.to_string(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            supabase_url: self.supabase_url.clone(),
            supabase_anon_key: self.supabase_anon_key.clone(),
            doctors_table: self.doctors_table.clone(),
            geocoding_base_url: self.geocoding_base_url.clone(),
            server_port: 0,
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

pub struct MockSupabaseResponses;

impl MockSupabaseResponses {
    /// A `doctors` table row as PostgREST returns it.
    pub fn doctor_row(
        id: &str,
        name: &str,
        specialty: &str,
        lat: Option<f64>,
        lng: Option<f64>,
    ) -> Value {
        json!({
            "id": id,
            "name": name,
            "specialty": specialty,
            "languages": ["French", "Arabic"],
            "location": "Boulevard d'Anfa, Casablanca",
            "lat": lat,
            "lng": lng,
            "rating": 4.5,
            "consultation_fee": 300.0,
            "available_today": true,
            "online": true,
            "review_count": 42,
            "image_url": null,
            "experience_years": 8,
            "bio": null
        })
    }

    pub fn nominatim_hit(lat: f64, lng: f64) -> Value {
        json!([{
            "lat": lat.to_string(),
            "lon": lng.to_string(),
            "display_name": "Casablanca, Morocco"
        }])
    }

    pub fn error_response(message: &str, code: &str) -> Value {
        json!({
            "message": message,
            "code": code
        })
    }
}
