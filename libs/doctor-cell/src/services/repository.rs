use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{Doctor, DoctorRow};
use crate::services::fallback::fallback_roster;

/// Where raw doctor rows come from. Rows are decoded one by one by the
/// repository.
#[async_trait]
pub trait DoctorStore: Send + Sync {
    async fn select_all(&self) -> Result<Vec<Value>>;
}

pub struct SupabaseDoctorStore {
    supabase: SupabaseClient,
    table: String,
}

impl SupabaseDoctorStore {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
            table: config.doctors_table.clone(),
        }
    }
}

#[async_trait]
impl DoctorStore for SupabaseDoctorStore {
    async fn select_all(&self) -> Result<Vec<Value>> {
        debug!("Selecting all rows from {}", self.table);
        self.supabase.select_all(&self.table).await
    }
}

/// Loads the doctor roster, degrading to the built-in roster instead of
/// failing.
#[derive(Clone)]
pub struct DoctorRepository {
    store: Arc<dyn DoctorStore>,
}

impl DoctorRepository {
    pub fn new(store: Arc<dyn DoctorStore>) -> Self {
        Self { store }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(Arc::new(SupabaseDoctorStore::new(config)))
    }

    /// Every valid doctor in the store, or the fallback roster when the store
    /// fails or has nothing usable. Never empty.
    #[instrument(skip(self))]
    pub async fn fetch_all(&self) -> Vec<Doctor> {
        let rows = match self.store.select_all().await {
            Ok(rows) => rows,
            Err(e) => {
                error!("Failed to load doctors, serving fallback roster: {}", e);
                return fallback_roster();
            }
        };

        if rows.is_empty() {
            warn!("Doctor store returned no rows, serving fallback roster");
            return fallback_roster();
        }

        let total = rows.len();
        let doctors: Vec<Doctor> = rows
            .into_iter()
            .filter_map(|row| match DoctorRow::from_value(row).and_then(Doctor::try_from) {
                Ok(doctor) => Some(doctor),
                Err(e) => {
                    warn!("Skipping doctor row: {}", e);
                    None
                }
            })
            .collect();

        if doctors.is_empty() {
            warn!("None of {} doctor rows were valid, serving fallback roster", total);
            return fallback_roster();
        }

        info!("Loaded {} doctors ({} rows)", doctors.len(), total);
        doctors
    }

    pub async fn fetch_by_id(&self, doctor_id: &str) -> Option<Doctor> {
        self.fetch_all().await.into_iter().find(|d| d.id == doctor_id)
    }
}
