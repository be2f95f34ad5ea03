use tracing::debug;

use shared_database::ClinicDb;
use shared_models::{InsurerRecord, StoreError};
use shared_utils::similarity;

/// Resolves spoken insurance provider names against the insurer catalog.
pub struct ProviderMatcher {
    threshold: u8,
}

impl ProviderMatcher {
    /// Minimum similarity score for a catalog entry to count as a match.
    pub const DEFAULT_MATCH_THRESHOLD: u8 = 80;

    pub fn new() -> Self {
        Self::with_threshold(Self::DEFAULT_MATCH_THRESHOLD)
    }

    pub fn with_threshold(threshold: u8) -> Self {
        Self { threshold }
    }

    /// Score every catalog entry against the spoken name and return the best
    /// one if it clears the threshold. Ties keep the earliest catalog entry.
    pub async fn match_insurer(
        &self,
        db: &ClinicDb,
        spoken_name: &str,
    ) -> Result<Option<InsurerRecord>, StoreError> {
        let insurers = db.all_insurers().await?;

        let mut best: Option<(u8, InsurerRecord)> = None;
        for insurer in insurers {
            let score = similarity(spoken_name, &insurer.insurer_name);
            match &best {
                Some((best_score, _)) if *best_score >= score => {}
                _ => best = Some((score, insurer)),
            }
        }

        match best {
            Some((score, insurer)) if score >= self.threshold => {
                debug!(
                    "Matched insurance '{}' to '{}' (score {})",
                    spoken_name, insurer.insurer_name, score
                );
                Ok(Some(insurer))
            }
            _ => Ok(None),
        }
    }
}

impl Default for ProviderMatcher {
    fn default() -> Self {
        Self::new()
    }
}
