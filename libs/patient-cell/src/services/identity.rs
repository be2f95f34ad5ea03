use regex::Regex;
use thiserror::Error;
use tracing::debug;

use shared_database::ClinicDb;
use shared_models::{PatientSummary, StoreError};
use shared_utils::similarity;

#[derive(Error, Debug)]
pub enum EmailError {
    #[error("The provided email '{0}' is not in a valid format. Please provide a valid email address (e.g., name@example.com).")]
    InvalidFormat(String),
}

/// Matches a caller's stated identity to a stored patient record.
///
/// Two lookup paths exist: exact email (after typo correction) and phone
/// number plus fuzzy name. Both are read-only.
pub struct IdentityResolver {
    email_format: Regex,
    name_match_threshold: u8,
}

impl IdentityResolver {
    /// Minimum similarity score for a stored name to count as the caller.
    /// Stricter than the insurer threshold.
    pub const DEFAULT_NAME_THRESHOLD: u8 = 85;

    pub fn new() -> Self {
        Self::with_threshold(Self::DEFAULT_NAME_THRESHOLD)
    }

    pub fn with_threshold(name_match_threshold: u8) -> Self {
        Self {
            email_format: Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap(),
            name_match_threshold,
        }
    }

    /// Correct the common "space instead of @" dictation typo, then check
    /// the format. The error carries the caller's original wording, not the
    /// corrected attempt.
    pub fn normalize_email(&self, email: &str) -> Result<String, EmailError> {
        let corrected = correct_email(email);
        if self.email_format.is_match(&corrected) {
            Ok(corrected)
        } else {
            Err(EmailError::InvalidFormat(email.to_string()))
        }
    }

    /// Find the patient behind a phone number, disambiguating households by
    /// fuzzy name match. A best score below the threshold is no match.
    pub async fn find_by_phone_and_name(
        &self,
        db: &ClinicDb,
        phone: &str,
        name: &str,
    ) -> Result<Option<PatientSummary>, StoreError> {
        let candidates = db.patients_by_phone(phone).await?;

        let mut best: Option<(u8, PatientSummary)> = None;
        for candidate in candidates {
            let score = similarity(name, &candidate.patient_name);
            match &best {
                Some((best_score, _)) if *best_score >= score => {}
                _ => best = Some((score, candidate)),
            }
        }

        match best {
            Some((score, patient)) if score >= self.name_match_threshold => {
                debug!(
                    "Resolved '{}' to patient {} (score {})",
                    name, patient.patient_id, score
                );
                Ok(Some(patient))
            }
            _ => Ok(None),
        }
    }
}

impl Default for IdentityResolver {
    fn default() -> Self {
        Self::new()
    }
}

fn correct_email(email: &str) -> String {
    let trimmed = email.trim();
    if !trimmed.contains('@') && trimmed.contains(' ') {
        if let Some((local, domain)) = trimmed.rsplit_once(' ') {
            if domain.contains('.') {
                let corrected = format!("{}@{}", local, domain);
                debug!(
                    "Corrected potential email typo: '{}' -> '{}'",
                    email, corrected
                );
                return corrected;
            }
        }
    }
    trimmed.to_string()
}
