use tracing::error;

use shared_database::ClinicDb;
use shared_models::{InsurerRecord, StoreError};

use crate::models::CoverageOutcome;
use crate::services::ProviderMatcher;

pub struct CoverageService {
    db: ClinicDb,
    matcher: ProviderMatcher,
}

impl CoverageService {
    pub fn new(db: ClinicDb) -> Self {
        Self {
            db,
            matcher: ProviderMatcher::new(),
        }
    }

    /// Answer a coverage inquiry. Storage failures collapse into the `Error`
    /// outcome with a caller-safe message; detail goes to the log.
    pub async fn check_coverage(&self, insurance_name: &str) -> CoverageOutcome {
        match self.resolve(insurance_name).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Insurance lookup failed: {}", e);
                CoverageOutcome::Error {
                    message: "There was an error checking the insurance details.".to_string(),
                }
            }
        }
    }

    async fn resolve(&self, insurance_name: &str) -> Result<CoverageOutcome, StoreError> {
        let Some(insurer) = self.matcher.match_insurer(&self.db, insurance_name).await? else {
            return Ok(CoverageOutcome::NotFound {
                message: "This insurance provider is not in our list. However, we can still \
                          proceed with scheduling an appointment."
                    .to_string(),
            });
        };

        Ok(assess(insurer))
    }
}

/// A plan covers the clinic's services when its condition list mentions
/// general or orthopedic care.
fn assess(insurer: InsurerRecord) -> CoverageOutcome {
    if !insurer.is_supported {
        return CoverageOutcome::NotSupported {
            message: format!(
                "While {} is in our system, we do not currently support it. We can still \
                 schedule an appointment, but you would need to cover the costs directly.",
                insurer.insurer_name
            ),
            name: insurer.insurer_name,
        };
    }

    let covered = insurer
        .covered_conditions
        .as_deref()
        .unwrap_or_default()
        .to_lowercase();

    if covered.contains("general") || covered.contains("orthopedics") {
        CoverageOutcome::SupportedAndCovers {
            message: format!(
                "Yes, we accept {}, and it appears to cover the relevant services. We can \
                 proceed with your intake.",
                insurer.insurer_name
            ),
            name: insurer.insurer_name,
        }
    } else {
        CoverageOutcome::SupportedButCoverageUnclear {
            message: format!(
                "Yes, we accept {}. However, for your specific needs (Orthopedics), we would \
                 recommend you confirm the coverage details directly with them. We can still \
                 proceed with the intake process.",
                insurer.insurer_name
            ),
            name: insurer.insurer_name,
        }
    }
}
