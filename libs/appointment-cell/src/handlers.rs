use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde_json::{json, Value};

use notification_cell::services::ConfirmationMailer;
use shared_database::ClinicDb;

use crate::models::{
    AvailabilityQuery, BookAppointmentRequest, CancelAppointmentRequest,
    RescheduleAppointmentRequest,
};
use crate::services::BookingService;

#[derive(Clone)]
pub struct AppointmentCellState {
    pub db: ClinicDb,
    pub mailer: Arc<ConfirmationMailer>,
}

#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<AppointmentCellState>,
    Json(request): Json<BookAppointmentRequest>,
) -> Json<Value> {
    let service = BookingService::new(state.db, state.mailer);

    let outcome = service.book(request).await;

    Json(json!(outcome))
}

#[axum::debug_handler]
pub async fn cancel_appointment(
    State(state): State<AppointmentCellState>,
    Json(request): Json<CancelAppointmentRequest>,
) -> Json<Value> {
    let service = BookingService::new(state.db, state.mailer);

    let outcome = service.cancel(request).await;

    Json(json!(outcome))
}

#[axum::debug_handler]
pub async fn reschedule_appointment(
    State(state): State<AppointmentCellState>,
    Json(request): Json<RescheduleAppointmentRequest>,
) -> Json<Value> {
    let service = BookingService::new(state.db, state.mailer);

    let outcome = service.reschedule(request).await;

    Json(json!(outcome))
}

#[axum::debug_handler]
pub async fn check_availability(
    State(state): State<AppointmentCellState>,
    Query(query): Query<AvailabilityQuery>,
) -> Json<Value> {
    let service = BookingService::new(state.db, state.mailer);

    let outcome = service.check_availability(query).await;

    Json(json!(outcome))
}
