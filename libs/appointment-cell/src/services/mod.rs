pub mod assignment;
pub mod booking;
pub mod validation;

pub use assignment::assign_doctor;
pub use booking::BookingService;
pub use validation::{parse_slot, validate_slot, validate_slot_at, CLINIC_TZ};
