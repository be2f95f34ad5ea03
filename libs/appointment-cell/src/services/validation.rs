use chrono::{DateTime, Datelike, NaiveDateTime, Timelike, Utc, Weekday};
use chrono_tz::{America::New_York, Tz};

use crate::models::SlotError;

/// The clinic runs on US Eastern wall-clock time.
pub const CLINIC_TZ: Tz = New_York;

/// Parse "YYYY-MM-DD" + "HH:MM" into the civil datetime they describe.
pub fn parse_slot(date: &str, time: &str) -> Result<NaiveDateTime, SlotError> {
    NaiveDateTime::parse_from_str(&format!("{} {}", date, time), "%Y-%m-%d %H:%M")
        .map_err(|_| SlotError::Format)
}

/// Check a requested slot against clinic rules relative to `now` on the
/// clinic clock. First failure wins: format, past, weekend, alignment,
/// opening hours.
pub fn validate_slot_at(
    date: &str,
    time: &str,
    now: DateTime<Tz>,
) -> Result<NaiveDateTime, SlotError> {
    let slot = parse_slot(date, time)?;

    // Civil-time comparison; an exactly-now slot is not in the past.
    if slot < now.naive_local() {
        return Err(SlotError::InPast);
    }

    if matches!(slot.weekday(), Weekday::Sat | Weekday::Sun) {
        return Err(SlotError::Weekend);
    }

    if slot.minute() != 0 && slot.minute() != 30 {
        return Err(SlotError::Misaligned);
    }

    // Minutes are aligned by now, so [08:00, 17:00) reduces to the hour:
    // 16:30 is the last slot that passes, 17:00 the first that fails.
    if slot.hour() < 8 || slot.hour() >= 17 {
        return Err(SlotError::OutsideHours);
    }

    Ok(slot)
}

/// [`validate_slot_at`] against the current clinic clock.
pub fn validate_slot(date: &str, time: &str) -> Result<NaiveDateTime, SlotError> {
    validate_slot_at(date, time, Utc::now().with_timezone(&CLINIC_TZ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    // Wednesday mid-morning on the clinic clock.
    fn wednesday_ten_am() -> DateTime<Tz> {
        CLINIC_TZ.with_ymd_and_hms(2030, 6, 5, 10, 0, 0).unwrap()
    }

    #[test]
    fn accepts_aligned_weekday_slot() {
        let slot = validate_slot_at("2030-06-05", "10:30", wednesday_ten_am()).unwrap();
        assert_eq!(slot.hour(), 10);
        assert_eq!(slot.minute(), 30);
    }

    #[test]
    fn accepts_opening_and_last_slot_boundaries() {
        assert!(validate_slot_at("2030-06-06", "08:00", wednesday_ten_am()).is_ok());
        assert!(validate_slot_at("2030-06-06", "16:30", wednesday_ten_am()).is_ok());
    }

    #[test]
    fn rejects_unparseable_input() {
        assert_eq!(
            validate_slot_at("not-a-date", "10:00", wednesday_ten_am()),
            Err(SlotError::Format)
        );
        assert_eq!(
            validate_slot_at("2030-06-05", "25:00", wednesday_ten_am()),
            Err(SlotError::Format)
        );
        assert_eq!(
            validate_slot_at("2030-06-05", "10:00:00", wednesday_ten_am()),
            Err(SlotError::Format)
        );
    }

    #[test]
    fn rejects_past_slots_but_not_the_present() {
        assert_eq!(
            validate_slot_at("2030-06-04", "10:00", wednesday_ten_am()),
            Err(SlotError::InPast)
        );
        assert_eq!(
            validate_slot_at("2030-06-05", "09:30", wednesday_ten_am()),
            Err(SlotError::InPast)
        );
        // A slot at exactly "now" passes the past check.
        assert!(validate_slot_at("2030-06-05", "10:00", wednesday_ten_am()).is_ok());
    }

    #[test]
    fn rejects_weekends() {
        assert_eq!(
            validate_slot_at("2030-06-08", "10:00", wednesday_ten_am()),
            Err(SlotError::Weekend)
        );
        assert_eq!(
            validate_slot_at("2030-06-09", "10:00", wednesday_ten_am()),
            Err(SlotError::Weekend)
        );
    }

    #[test]
    fn rejects_unaligned_minutes() {
        assert_eq!(
            validate_slot_at("2030-06-05", "10:15", wednesday_ten_am()),
            Err(SlotError::Misaligned)
        );
        assert_eq!(
            validate_slot_at("2030-06-05", "10:31", wednesday_ten_am()),
            Err(SlotError::Misaligned)
        );
    }

    #[test]
    fn rejects_slots_outside_opening_hours() {
        assert_eq!(
            validate_slot_at("2030-06-05", "07:30", wednesday_ten_am()),
            Err(SlotError::OutsideHours)
        );
        assert_eq!(
            validate_slot_at("2030-06-05", "17:00", wednesday_ten_am()),
            Err(SlotError::OutsideHours)
        );
        assert_eq!(
            validate_slot_at("2030-06-05", "17:30", wednesday_ten_am()),
            Err(SlotError::OutsideHours)
        );
    }

    #[test]
    fn failure_order_is_past_then_weekend_then_alignment() {
        // A past Saturday reports "past", not "weekend".
        assert_eq!(
            validate_slot_at("2030-06-01", "10:00", wednesday_ten_am()),
            Err(SlotError::InPast)
        );
        // An unaligned before-hours slot reports the alignment problem.
        assert_eq!(
            validate_slot_at("2030-06-05", "07:15", wednesday_ten_am()),
            Err(SlotError::Misaligned)
        );
    }
}
