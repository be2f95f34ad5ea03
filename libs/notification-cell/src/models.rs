use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Everything the confirmation template needs. Date and time arrive in the
/// caller's raw "YYYY-MM-DD" / "HH:MM" form and are prettified at send time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentConfirmation {
    pub patient_email: String,
    pub patient_name: String,
    pub doctor_name: String,
    pub appointment_date: String,
    pub appointment_time: String,
}

#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("email notifications are not configured")]
    NotConfigured,
    #[error("confirmation email request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("confirmation email rejected with status {0}")]
    Rejected(StatusCode),
}
