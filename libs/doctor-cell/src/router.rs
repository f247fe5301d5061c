use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use shared_config::AppConfig;

use crate::handlers;

pub fn doctor_routes(state: Arc<AppConfig>) -> Router {
    // Discovery is public: no patient data is read or written
    Router::new()
        .route("/discover", get(handlers::discover_doctors))
        .route("/filters", get(handlers::get_filter_options))
        .route("/{doctor_id}", get(handlers::get_doctor))
        .with_state(state)
}
