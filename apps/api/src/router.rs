use std::sync::Arc;

use axum::{
    Json, Router,
    routing::get,
};
use serde_json::json;

use appointment_cell::router::create_appointment_router;
use insurance_cell::router::create_insurance_router;
use notification_cell::services::ConfirmationMailer;
use patient_cell::router::create_patient_router;
use shared_database::ClinicDb;

pub fn create_router(db: ClinicDb, mailer: Arc<ConfirmationMailer>) -> Router {
    Router::new()
        .route("/", get(|| async { "Stemmee Surgery Center API is running!" }))
        .route("/health", get(|| async { Json(json!({ "status": "ok" })) }))
        .nest("/api/patients", create_patient_router(db.clone()))
        .nest("/api/insurance", create_insurance_router(db.clone()))
        .nest("/api/appointments", create_appointment_router(db, mailer))
}
