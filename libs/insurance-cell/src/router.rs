use axum::{routing::post, Router};

use shared_database::ClinicDb;

use crate::handlers::*;

pub fn create_insurance_router(db: ClinicDb) -> Router {
    Router::new()
        .route("/coverage", post(check_coverage))
        .with_state(db)
}
