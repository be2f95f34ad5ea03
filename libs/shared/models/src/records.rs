use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Intake data for a patient row. The email is already corrected and
/// validated by the time it reaches the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPatient {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub illness: String,
    pub insurer_id: Option<i64>,
}

/// The identifying subset of a patient row returned by lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientSummary {
    pub patient_id: i64,
    pub patient_name: String,
}

/// Where a confirmation email goes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientContact {
    pub email: Option<String>,
    pub name: String,
}

/// Field subset for a patient update; `None` means leave the column alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatientUpdate {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub insurer_id: Option<i64>,
}

impl PatientUpdate {
    pub fn is_empty(&self) -> bool {
        self.phone.is_none() && self.email.is_none() && self.insurer_id.is_none()
    }
}

/// One row of the seeded insurer catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsurerRecord {
    pub insurer_id: i64,
    pub insurer_name: String,
    pub is_supported: bool,
    pub covered_conditions: Option<String>,
}

/// A 30-minute appointment slot ready for insertion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAppointment {
    pub patient_id: i64,
    pub doctor_name: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// An appointment joined with its patient, as rescheduling needs it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentContext {
    pub appointment_id: i64,
    pub doctor_name: String,
    pub illness: String,
    pub email: Option<String>,
    pub patient_name: String,
}
