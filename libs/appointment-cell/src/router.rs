use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use notification_cell::services::ConfirmationMailer;
use shared_database::ClinicDb;

use crate::handlers::*;

pub fn create_appointment_router(db: ClinicDb, mailer: Arc<ConfirmationMailer>) -> Router {
    let state = AppointmentCellState { db, mailer };

    Router::new()
        .route("/", post(book_appointment))
        .route("/cancel", post(cancel_appointment))
        .route("/reschedule", post(reschedule_appointment))
        .route("/availability", get(check_availability))
        .with_state(state)
}
