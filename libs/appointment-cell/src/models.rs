use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a requested slot is not bookable. The `Display` text is read back to
/// the caller verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    #[error("Invalid time or date format. Please use HH:MM for time and YYYY-MM-DD for date.")]
    Format,
    #[error("Appointments cannot be booked in the past. Please provide a future date and time.")]
    InPast,
    #[error("The clinic is closed on Saturdays and Sundays. Please choose a weekday.")]
    Weekend,
    #[error("Appointments must be scheduled on the hour or half-hour (e.g., 9:00, 9:30).")]
    Misaligned,
    #[error("Appointments can only be booked between 8:00 AM and 4:30 PM EST.")]
    OutsideHours,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookAppointmentRequest {
    pub patient_id: i64,
    pub appointment_date: String,
    pub appointment_time: String,
    pub illness: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelAppointmentRequest {
    pub patient_id: i64,
    pub appointment_date: String,
    pub appointment_time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RescheduleAppointmentRequest {
    pub patient_id: i64,
    pub old_appointment_date: String,
    pub old_appointment_time: String,
    pub new_appointment_date: String,
    pub new_appointment_time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityQuery {
    pub appointment_date: String,
    pub appointment_time: String,
    pub illness: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BookingOutcome {
    ValidationError {
        message: String,
    },
    Conflict {
        message: String,
    },
    Success {
        appointment_id: i64,
        doctor_name: String,
        time: String,
        message: String,
    },
    Error {
        message: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CancelOutcome {
    NotFound { message: String },
    Success { message: String },
    Error { message: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RescheduleOutcome {
    NotFound { message: String },
    Conflict { message: String },
    Success { message: String },
    Error { message: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AvailabilityOutcome {
    Available { doctor_name: String, message: String },
    Unavailable { doctor_name: String, message: String },
    Error { message: String },
}
