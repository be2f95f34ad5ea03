use thiserror::Error;

/// Failures surfaced by the scheduling store.
///
/// The two named variants are the ones the operations branch on; anything
/// else travels as `Unavailable` and is reported to the caller as a generic
/// database error.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("a patient with this email already exists")]
    DuplicateEmail,

    #[error("the slot is already booked for this clinician")]
    SlotTaken,

    #[error("database unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),
}
