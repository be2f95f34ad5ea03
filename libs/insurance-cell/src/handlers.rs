use axum::{extract::State, Json};
use serde_json::{json, Value};

use shared_database::ClinicDb;

use crate::models::CoverageInquiry;
use crate::services::CoverageService;

#[axum::debug_handler]
pub async fn check_coverage(
    State(db): State<ClinicDb>,
    Json(request): Json<CoverageInquiry>,
) -> Json<Value> {
    let service = CoverageService::new(db);

    let outcome = service.check_coverage(&request.insurance_name).await;

    Json(json!(outcome))
}
