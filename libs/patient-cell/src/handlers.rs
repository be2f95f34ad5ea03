use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use shared_database::ClinicDb;

use crate::models::{
    CreatePatientRequest, PatientLookupRequest, ResolvePatientRequest, UpdatePatientRequest,
};
use crate::services::PatientService;

#[axum::debug_handler]
pub async fn create_patient(
    State(db): State<ClinicDb>,
    Json(request): Json<CreatePatientRequest>,
) -> Json<Value> {
    let service = PatientService::new(db);

    let outcome = service.add_patient(request).await;

    Json(json!(outcome))
}

#[axum::debug_handler]
pub async fn lookup_patient(
    State(db): State<ClinicDb>,
    Json(request): Json<PatientLookupRequest>,
) -> Json<Value> {
    let service = PatientService::new(db);

    let outcome = service.get_patient_details(request).await;

    Json(json!(outcome))
}

#[axum::debug_handler]
pub async fn resolve_patient(
    State(db): State<ClinicDb>,
    Json(request): Json<ResolvePatientRequest>,
) -> Json<Value> {
    let service = PatientService::new(db);

    let outcome = service.resolve_patient(request).await;

    Json(json!(outcome))
}

#[axum::debug_handler]
pub async fn update_patient(
    State(db): State<ClinicDb>,
    Path(patient_id): Path<i64>,
    Json(request): Json<UpdatePatientRequest>,
) -> Json<Value> {
    let service = PatientService::new(db);

    let outcome = service.update_patient(patient_id, request).await;

    Json(json!(outcome))
}
