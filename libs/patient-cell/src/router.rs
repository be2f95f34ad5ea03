use axum::{
    routing::{post, put},
    Router,
};

use shared_database::ClinicDb;

use crate::handlers::*;

pub fn create_patient_router(db: ClinicDb) -> Router {
    Router::new()
        .route("/", post(create_patient))
        .route("/lookup", post(lookup_patient))
        .route("/resolve", post(resolve_patient))
        .route("/{id}", put(update_patient))
        .with_state(db)
}
