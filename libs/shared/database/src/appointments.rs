use chrono::NaiveDateTime;
use sqlx::Row;

use shared_models::{AppointmentContext, NewAppointment, StoreError};

use crate::db::{unique_violation, ClinicDb};

/// Storage layout for appointment timestamps.
pub const DB_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn fmt(ts: NaiveDateTime) -> String {
    ts.format(DB_DATETIME_FORMAT).to_string()
}

impl ClinicDb {
    /// Whether a clinician already holds an appointment at `start`.
    pub async fn slot_taken(
        &self,
        doctor_name: &str,
        start: NaiveDateTime,
    ) -> Result<bool, StoreError> {
        let row = sqlx::query(
            "SELECT appointment_id FROM appointments WHERE doctor_name = ? AND start_time = ?",
        )
        .bind(doctor_name)
        .bind(fmt(start))
        .fetch_optional(self.pool())
        .await?;

        Ok(row.is_some())
    }

    /// Insert an appointment and return its id.
    ///
    /// The (doctor_name, start_time) unique index backs this up: if two
    /// bookings race past the availability pre-check, the slower insert
    /// comes back as [`StoreError::SlotTaken`].
    pub async fn insert_appointment(
        &self,
        appointment: &NewAppointment,
    ) -> Result<i64, StoreError> {
        let result = sqlx::query(
            "INSERT INTO appointments (patient_id, doctor_name, start_time, end_time) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(appointment.patient_id)
        .bind(&appointment.doctor_name)
        .bind(fmt(appointment.start))
        .bind(fmt(appointment.end))
        .execute(self.pool())
        .await
        .map_err(|e| unique_violation(e, "appointments.doctor_name", StoreError::SlotTaken))?;

        Ok(result.last_insert_rowid())
    }

    /// Find the appointment a patient holds at `start`, if any.
    pub async fn find_appointment_id(
        &self,
        patient_id: i64,
        start: NaiveDateTime,
    ) -> Result<Option<i64>, StoreError> {
        let row = sqlx::query(
            "SELECT appointment_id FROM appointments WHERE patient_id = ? AND start_time = ?",
        )
        .bind(patient_id)
        .bind(fmt(start))
        .fetch_optional(self.pool())
        .await?;

        Ok(row.map(|r| r.try_get("appointment_id")).transpose()?)
    }

    /// Delete an appointment; returns how many rows went away.
    pub async fn delete_appointment(&self, appointment_id: i64) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM appointments WHERE appointment_id = ?")
            .bind(appointment_id)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected())
    }

    /// An appointment joined with the patient details a reschedule needs.
    pub async fn appointment_with_patient(
        &self,
        patient_id: i64,
        start: NaiveDateTime,
    ) -> Result<Option<AppointmentContext>, StoreError> {
        let row = sqlx::query(
            "SELECT a.appointment_id, a.doctor_name, p.illness, p.email, p.patient_name \
             FROM appointments a \
             JOIN patients p ON a.patient_id = p.patient_id \
             WHERE a.patient_id = ? AND a.start_time = ?",
        )
        .bind(patient_id)
        .bind(fmt(start))
        .fetch_optional(self.pool())
        .await?;

        row.map(|r| {
            Ok(AppointmentContext {
                appointment_id: r.try_get("appointment_id")?,
                doctor_name: r.try_get("doctor_name")?,
                illness: r
                    .try_get::<Option<String>, _>("illness")?
                    .unwrap_or_default(),
                email: r.try_get("email")?,
                patient_name: r
                    .try_get::<Option<String>, _>("patient_name")?
                    .unwrap_or_default(),
            })
        })
        .transpose()
    }

    /// Atomically move an appointment: drop the old row, insert the new one.
    ///
    /// Runs in a transaction so a rejected target slot leaves the original
    /// appointment in place.
    pub async fn replace_appointment(
        &self,
        old_appointment_id: i64,
        replacement: &NewAppointment,
    ) -> Result<i64, StoreError> {
        let mut tx = self.pool().begin().await?;

        sqlx::query("DELETE FROM appointments WHERE appointment_id = ?")
            .bind(old_appointment_id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query(
            "INSERT INTO appointments (patient_id, doctor_name, start_time, end_time) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(replacement.patient_id)
        .bind(&replacement.doctor_name)
        .bind(fmt(replacement.start))
        .bind(fmt(replacement.end))
        .execute(&mut *tx)
        .await
        .map_err(|e| unique_violation(e, "appointments.doctor_name", StoreError::SlotTaken))?;

        let new_id = result.last_insert_rowid();
        tx.commit().await?;
        Ok(new_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use shared_models::NewPatient;
    use tempfile::NamedTempFile;

    async fn open_db() -> (ClinicDb, NamedTempFile) {
        let file = NamedTempFile::new().expect("temp file");
        let path = file.path().to_str().expect("utf-8 path");
        let db = ClinicDb::connect(path).await.expect("connect");
        (db, file)
    }

    async fn insert_test_patient(db: &ClinicDb, email: &str) -> i64 {
        db.insert_patient(&NewPatient {
            name: "Jonathan Smith".to_string(),
            phone: "555-0101".to_string(),
            email: email.to_string(),
            illness: "knee pain".to_string(),
            insurer_id: Some(1),
        })
        .await
        .expect("patient insert")
    }

    fn monday_morning() -> NaiveDateTime {
        // 2030-06-03 is a Monday.
        NaiveDate::from_ymd_opt(2030, 6, 3)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    fn slot(patient_id: i64, doctor: &str, start: NaiveDateTime) -> NewAppointment {
        NewAppointment {
            patient_id,
            doctor_name: doctor.to_string(),
            start,
            end: start + Duration::minutes(30),
        }
    }

    #[tokio::test]
    async fn unique_index_blocks_double_booking() {
        let (db, _file) = open_db().await;
        let first = insert_test_patient(&db, "jon@example.com").await;
        let second = insert_test_patient(&db, "maria@example.com").await;
        let start = monday_morning();

        db.insert_appointment(&slot(first, "Dr. Jonas", start))
            .await
            .expect("first booking");

        // Same clinician, same start, different patient: the index refuses.
        let err = db
            .insert_appointment(&slot(second, "Dr. Jonas", start))
            .await
            .expect_err("second booking must fail");
        assert!(matches!(err, StoreError::SlotTaken));

        // The other clinician is free at that time.
        db.insert_appointment(&slot(second, "Dr. Katherine", start))
            .await
            .expect("other clinician books fine");
    }

    #[tokio::test]
    async fn slot_taken_reflects_bookings() {
        let (db, _file) = open_db().await;
        let patient = insert_test_patient(&db, "jon@example.com").await;
        let start = monday_morning();

        assert!(!db.slot_taken("Dr. Jonas", start).await.expect("probe"));
        db.insert_appointment(&slot(patient, "Dr. Jonas", start))
            .await
            .expect("booking");
        assert!(db.slot_taken("Dr. Jonas", start).await.expect("probe"));
        assert!(!db.slot_taken("Dr. Katherine", start).await.expect("probe"));
    }

    #[tokio::test]
    async fn find_and_delete_round_trip() {
        let (db, _file) = open_db().await;
        let patient = insert_test_patient(&db, "jon@example.com").await;
        let start = monday_morning();

        let id = db
            .insert_appointment(&slot(patient, "Dr. Jonas", start))
            .await
            .expect("booking");

        let found = db
            .find_appointment_id(patient, start)
            .await
            .expect("lookup");
        assert_eq!(found, Some(id));

        let rows = db.delete_appointment(id).await.expect("delete");
        assert_eq!(rows, 1);

        let gone = db
            .find_appointment_id(patient, start)
            .await
            .expect("lookup");
        assert!(gone.is_none());

        let rows = db.delete_appointment(id).await.expect("second delete");
        assert_eq!(rows, 0);
    }

    #[tokio::test]
    async fn appointment_with_patient_joins_details() {
        let (db, _file) = open_db().await;
        let patient = insert_test_patient(&db, "jon@example.com").await;
        let start = monday_morning();

        let id = db
            .insert_appointment(&slot(patient, "Dr. Jonas", start))
            .await
            .expect("booking");

        let context = db
            .appointment_with_patient(patient, start)
            .await
            .expect("lookup")
            .expect("a row");
        assert_eq!(context.appointment_id, id);
        assert_eq!(context.doctor_name, "Dr. Jonas");
        assert_eq!(context.illness, "knee pain");
        assert_eq!(context.email.as_deref(), Some("jon@example.com"));
        assert_eq!(context.patient_name, "Jonathan Smith");

        let other_time = start + Duration::hours(2);
        let missing = db
            .appointment_with_patient(patient, other_time)
            .await
            .expect("lookup");
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn replace_moves_the_appointment() {
        let (db, _file) = open_db().await;
        let patient = insert_test_patient(&db, "jon@example.com").await;
        let old_start = monday_morning();
        let new_start = old_start + Duration::hours(3);

        let old_id = db
            .insert_appointment(&slot(patient, "Dr. Jonas", old_start))
            .await
            .expect("booking");

        let new_id = db
            .replace_appointment(old_id, &slot(patient, "Dr. Jonas", new_start))
            .await
            .expect("reschedule");

        assert!(db
            .find_appointment_id(patient, old_start)
            .await
            .expect("lookup")
            .is_none());
        assert_eq!(
            db.find_appointment_id(patient, new_start)
                .await
                .expect("lookup"),
            Some(new_id)
        );
    }

    #[tokio::test]
    async fn replace_into_occupied_slot_keeps_the_original() {
        let (db, _file) = open_db().await;
        let mover = insert_test_patient(&db, "jon@example.com").await;
        let holder = insert_test_patient(&db, "maria@example.com").await;
        let old_start = monday_morning();
        let target = old_start + Duration::hours(1);

        let old_id = db
            .insert_appointment(&slot(mover, "Dr. Jonas", old_start))
            .await
            .expect("booking");
        db.insert_appointment(&slot(holder, "Dr. Jonas", target))
            .await
            .expect("holder booking");

        let err = db
            .replace_appointment(old_id, &slot(mover, "Dr. Jonas", target))
            .await
            .expect_err("occupied target must fail");
        assert!(matches!(err, StoreError::SlotTaken));

        // The transaction rolled back, so the original booking survives.
        assert_eq!(
            db.find_appointment_id(mover, old_start)
                .await
                .expect("lookup"),
            Some(old_id)
        );
    }
}
