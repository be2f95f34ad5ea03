use serde::{Deserialize, Serialize};

/// "Do you take my insurance?" as the voice layer hears it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageInquiry {
    pub insurance_name: String,
}

/// Answer to a coverage inquiry.
///
/// The conversational layer switches on `status` and reads `message` aloud,
/// so every variant carries a caller-ready sentence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CoverageOutcome {
    NotFound { message: String },
    NotSupported { name: String, message: String },
    SupportedAndCovers { name: String, message: String },
    SupportedButCoverageUnclear { name: String, message: String },
    Error { message: String },
}
