use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePatientRequest {
    pub patient_name: String,
    pub phone_number: String,
    pub patient_email: String,
    pub illness: String,
    pub insurance_name: String,
}

/// Lookup by email. The name travels along for conversational context but
/// the search keys on the email alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientLookupRequest {
    pub patient_name: String,
    pub patient_email: String,
}

/// Lookup by phone number plus fuzzy name, for callers who cannot recall
/// the email they registered with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvePatientRequest {
    pub phone_number: String,
    pub patient_name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePatientRequest {
    #[serde(default)]
    pub new_phone_number: Option<String>,
    #[serde(default)]
    pub new_insurance_name: Option<String>,
    #[serde(default)]
    pub new_patient_email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AddPatientOutcome {
    Exists { patient_id: i64, message: String },
    Created { patient_id: i64, message: String },
    Error { message: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PatientDetailsOutcome {
    Found {
        patient_id: i64,
        patient_name: String,
        message: String,
    },
    NotFound {
        message: String,
    },
    Error {
        message: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResolveOutcome {
    Found {
        patient_id: i64,
        patient_name: String,
        message: String,
    },
    NotFound {
        message: String,
    },
    Error {
        message: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UpdatePatientOutcome {
    Success { message: String },
    ValidationError { message: String },
    NotFound { message: String },
    Error { message: String },
}
