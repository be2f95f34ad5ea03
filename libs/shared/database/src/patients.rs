use sqlx::Row;

use shared_models::{NewPatient, PatientContact, PatientSummary, PatientUpdate, StoreError};

use crate::db::{unique_violation, ClinicDb};

impl ClinicDb {
    /// Insert a new patient row and return its id.
    ///
    /// The email column is UNIQUE; a collision surfaces as
    /// [`StoreError::DuplicateEmail`] so callers can phrase it for the caller
    /// on the phone instead of leaking driver text.
    pub async fn insert_patient(&self, patient: &NewPatient) -> Result<i64, StoreError> {
        let result = sqlx::query(
            "INSERT INTO patients (patient_name, phone_number, email, illness, insurer_id) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&patient.name)
        .bind(&patient.phone)
        .bind(&patient.email)
        .bind(&patient.illness)
        .bind(patient.insurer_id)
        .execute(self.pool())
        .await
        .map_err(|e| unique_violation(e, "patients.email", StoreError::DuplicateEmail))?;

        Ok(result.last_insert_rowid())
    }

    /// Look up a patient by exact (already normalized) email.
    pub async fn find_patient_by_email(
        &self,
        email: &str,
    ) -> Result<Option<PatientSummary>, StoreError> {
        let row = sqlx::query("SELECT patient_id, patient_name FROM patients WHERE email = ?")
            .bind(email)
            .fetch_optional(self.pool())
            .await?;

        row.map(|r| {
            Ok(PatientSummary {
                patient_id: r.try_get("patient_id")?,
                patient_name: r
                    .try_get::<Option<String>, _>("patient_name")?
                    .unwrap_or_default(),
            })
        })
        .transpose()
    }

    /// All patients registered under a phone number. Households share
    /// numbers, so callers disambiguate by name afterwards.
    pub async fn patients_by_phone(
        &self,
        phone: &str,
    ) -> Result<Vec<PatientSummary>, StoreError> {
        let rows =
            sqlx::query("SELECT patient_id, patient_name FROM patients WHERE phone_number = ?")
                .bind(phone)
                .fetch_all(self.pool())
                .await?;

        rows.into_iter()
            .map(|r| {
                Ok(PatientSummary {
                    patient_id: r.try_get("patient_id")?,
                    patient_name: r
                        .try_get::<Option<String>, _>("patient_name")?
                        .unwrap_or_default(),
                })
            })
            .collect()
    }

    /// Contact details used when sending a confirmation email.
    pub async fn patient_contact(
        &self,
        patient_id: i64,
    ) -> Result<Option<PatientContact>, StoreError> {
        let row = sqlx::query("SELECT email, patient_name FROM patients WHERE patient_id = ?")
            .bind(patient_id)
            .fetch_optional(self.pool())
            .await?;

        row.map(|r| {
            Ok(PatientContact {
                email: r.try_get("email")?,
                name: r
                    .try_get::<Option<String>, _>("patient_name")?
                    .unwrap_or_default(),
            })
        })
        .transpose()
    }

    /// Apply the populated fields of `update` to a patient row.
    ///
    /// Returns the number of rows changed; zero means no patient holds that
    /// id. An empty update short-circuits without touching the database.
    pub async fn update_patient_fields(
        &self,
        patient_id: i64,
        update: &PatientUpdate,
    ) -> Result<u64, StoreError> {
        if update.is_empty() {
            return Ok(0);
        }

        let mut assignments = Vec::new();
        if update.email.is_some() {
            assignments.push("email = ?");
        }
        if update.phone.is_some() {
            assignments.push("phone_number = ?");
        }
        if update.insurer_id.is_some() {
            assignments.push("insurer_id = ?");
        }

        let sql = format!(
            "UPDATE patients SET {} WHERE patient_id = ?",
            assignments.join(", ")
        );

        let mut query = sqlx::query(&sql);
        if let Some(email) = &update.email {
            query = query.bind(email);
        }
        if let Some(phone) = &update.phone {
            query = query.bind(phone);
        }
        if let Some(insurer_id) = update.insurer_id {
            query = query.bind(insurer_id);
        }
        let result = query.bind(patient_id).execute(self.pool()).await?;

        Ok(result.rows_affected())
    }
}
