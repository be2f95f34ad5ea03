use tracing::{error, info};

use insurance_cell::services::ProviderMatcher;
use shared_database::ClinicDb;
use shared_models::{NewPatient, PatientUpdate, StoreError};

use crate::models::{
    AddPatientOutcome, CreatePatientRequest, PatientDetailsOutcome, PatientLookupRequest,
    ResolveOutcome, ResolvePatientRequest, UpdatePatientOutcome, UpdatePatientRequest,
};
use crate::services::IdentityResolver;

pub struct PatientService {
    db: ClinicDb,
    identity: IdentityResolver,
    matcher: ProviderMatcher,
}

impl PatientService {
    pub fn new(db: ClinicDb) -> Self {
        Self {
            db,
            identity: IdentityResolver::new(),
            matcher: ProviderMatcher::new(),
        }
    }

    /// Register a caller as a patient unless their email is already on file.
    ///
    /// An unrecognized insurance name does not block registration; the
    /// patient is simply created without coverage. Coverage questions get
    /// their explicit answer from the insurance cell instead.
    pub async fn add_patient(&self, request: CreatePatientRequest) -> AddPatientOutcome {
        let email = match self.identity.normalize_email(&request.patient_email) {
            Ok(email) => email,
            Err(e) => {
                return AddPatientOutcome::Error {
                    message: e.to_string(),
                }
            }
        };

        match self.db.find_patient_by_email(&email).await {
            Ok(Some(existing)) => {
                info!(
                    "Patient with email '{}' already exists with ID {}.",
                    email, existing.patient_id
                );
                return AddPatientOutcome::Exists {
                    patient_id: existing.patient_id,
                    message: format!(
                        "Patient with email '{}' already exists with ID {}.",
                        email, existing.patient_id
                    ),
                };
            }
            Ok(None) => {}
            Err(e) => {
                error!("Patient lookup failed: {}", e);
                return AddPatientOutcome::Error {
                    message: "Failed to add new patient.".to_string(),
                };
            }
        }

        let insurer_id = match self.matcher.match_insurer(&self.db, &request.insurance_name).await
        {
            Ok(Some(insurer)) => Some(insurer.insurer_id),
            Ok(None) => {
                info!(
                    "No insurer matched '{}', registering without coverage",
                    request.insurance_name
                );
                None
            }
            Err(e) => {
                error!("Insurer lookup failed: {}", e);
                return AddPatientOutcome::Error {
                    message: "Failed to add new patient.".to_string(),
                };
            }
        };

        let new_patient = NewPatient {
            name: request.patient_name.clone(),
            phone: request.phone_number,
            email: email.clone(),
            illness: request.illness,
            insurer_id,
        };

        match self.db.insert_patient(&new_patient).await {
            Ok(patient_id) => {
                info!(
                    "Successfully added new patient '{}' with ID {}.",
                    request.patient_name, patient_id
                );
                AddPatientOutcome::Created {
                    patient_id,
                    message: format!(
                        "Successfully added new patient '{}' with ID {}.",
                        request.patient_name, patient_id
                    ),
                }
            }
            // The UNIQUE column catches an insert racing past the existence
            // check above.
            Err(StoreError::DuplicateEmail) => AddPatientOutcome::Error {
                message: format!("A patient with the email '{}' already exists.", email),
            },
            Err(e) => {
                error!("Patient insert failed: {}", e);
                AddPatientOutcome::Error {
                    message: "Failed to add new patient.".to_string(),
                }
            }
        }
    }

    /// Look a patient up by email. The supplied name is not used to
    /// disambiguate.
    pub async fn get_patient_details(
        &self,
        request: PatientLookupRequest,
    ) -> PatientDetailsOutcome {
        let email = match self.identity.normalize_email(&request.patient_email) {
            Ok(email) => email,
            Err(e) => {
                return PatientDetailsOutcome::Error {
                    message: e.to_string(),
                }
            }
        };

        match self.db.find_patient_by_email(&email).await {
            Ok(Some(patient)) => PatientDetailsOutcome::Found {
                patient_id: patient.patient_id,
                message: format!("Patient record found for {}.", patient.patient_name),
                patient_name: patient.patient_name,
            },
            Ok(None) => PatientDetailsOutcome::NotFound {
                message: "No patient record was found with these details. You can proceed with \
                          creating a new record if needed."
                    .to_string(),
            },
            Err(e) => {
                error!("Patient lookup failed: {}", e);
                PatientDetailsOutcome::Error {
                    message: "There was an error checking for the patient.".to_string(),
                }
            }
        }
    }

    /// Identify a caller who only remembers their phone number and name.
    pub async fn resolve_patient(&self, request: ResolvePatientRequest) -> ResolveOutcome {
        match self
            .identity
            .find_by_phone_and_name(&self.db, &request.phone_number, &request.patient_name)
            .await
        {
            Ok(Some(patient)) => ResolveOutcome::Found {
                patient_id: patient.patient_id,
                message: format!("Patient record found for {}.", patient.patient_name),
                patient_name: patient.patient_name,
            },
            Ok(None) => ResolveOutcome::NotFound {
                message: "No patient record matched this phone number and name.".to_string(),
            },
            Err(e) => {
                error!("Patient lookup failed: {}", e);
                ResolveOutcome::Error {
                    message: "There was an error checking for the patient.".to_string(),
                }
            }
        }
    }

    /// Update contact or insurance details on an existing record.
    ///
    /// Every provided field is validated before anything is written, and an
    /// unmatched insurance name rejects the whole update. Registration is
    /// lenient about insurers; an explicit change is not.
    pub async fn update_patient(
        &self,
        patient_id: i64,
        request: UpdatePatientRequest,
    ) -> UpdatePatientOutcome {
        // Empty strings from the voice layer mean "not provided".
        let new_phone = request.new_phone_number.filter(|s| !s.is_empty());
        let new_insurance = request.new_insurance_name.filter(|s| !s.is_empty());
        let new_email = request.new_patient_email.filter(|s| !s.is_empty());

        if new_phone.is_none() && new_insurance.is_none() && new_email.is_none() {
            return UpdatePatientOutcome::Error {
                message: "No update information was provided.".to_string(),
            };
        }

        let mut update = PatientUpdate::default();

        if let Some(email) = new_email {
            match self.identity.normalize_email(&email) {
                Ok(email) => update.email = Some(email),
                Err(e) => {
                    return UpdatePatientOutcome::ValidationError {
                        message: e.to_string(),
                    }
                }
            }
        }

        update.phone = new_phone;

        if let Some(name) = new_insurance {
            match self.matcher.match_insurer(&self.db, &name).await {
                Ok(Some(insurer)) => update.insurer_id = Some(insurer.insurer_id),
                Ok(None) => {
                    return UpdatePatientOutcome::ValidationError {
                        message: format!(
                            "The insurance provider '{}' was not found in our system.",
                            name
                        ),
                    }
                }
                Err(e) => {
                    error!("Insurer lookup failed: {}", e);
                    return UpdatePatientOutcome::Error {
                        message: "A database error occurred during the update.".to_string(),
                    };
                }
            }
        }

        if update.is_empty() {
            return UpdatePatientOutcome::Error {
                message: "No valid update information could be processed.".to_string(),
            };
        }

        match self.db.update_patient_fields(patient_id, &update).await {
            Ok(rows) if rows > 0 => {
                info!("Successfully updated record for patient ID {}.", patient_id);
                UpdatePatientOutcome::Success {
                    message: "Patient information has been updated.".to_string(),
                }
            }
            Ok(_) => UpdatePatientOutcome::NotFound {
                message: "No patient record was found with the given ID.".to_string(),
            },
            Err(e) => {
                error!("Patient update failed: {}", e);
                UpdatePatientOutcome::Error {
                    message: "A database error occurred during the update.".to_string(),
                }
            }
        }
    }
}
