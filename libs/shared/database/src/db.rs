use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

use shared_models::StoreError;

/// Insurer catalog seeded on first startup.
const INSURER_SEED: [(i64, &str, i64, &str); 15] = [
    (1, "Aetna", 1, "Cardiology, Diabetes, Cancer, Orthopedics, Pediatrics"),
    (2, "Blue Cross Blue Shield", 1, "General, Heart Disease, Mental Health, Orthopedics, Respiratory Disorders"),
    (3, "UnitedHealthcare", 1, "Diabetes, Hypertension, Cardiology, Maternity, Pediatrics"),
    (4, "Cigna", 1, "Oncology, Cardiology, Dermatology, Gastroenterology"),
    (5, "Humana", 0, "Diabetes, Cancer, Kidney Disorders, Vision & Dental"),
    (6, "Kaiser Permanente", 1, "Pediatrics, Cardiology, Diabetes, Preventive Care"),
    (7, "Allianz Care", 1, "Global Health, Critical Illness, Mental Health, Maternity"),
    (8, "Prudential Health", 1, "Cancer, Diabetes, Cardiology, Orthopedics, Chronic Illness"),
    (9, "Manulife", 1, "Diabetes, Heart Disease, Stroke, Cancer, General Care"),
    (10, "ICICI Lombard (India)", 1, "Cancer, Diabetes, Cardiology, COVID-19, Critical Illness"),
    (11, "HDFC ERGO Health (India)", 1, "Orthopedics, Maternity, Cancer, Diabetes, Neurology"),
    (12, "Star Health (India)", 1, "Pediatrics, Diabetes, Heart Disease, Cancer, Maternity"),
    (13, "Max Bupa (Niva Bupa, India)", 1, "Cancer, Diabetes, Cardiology, Pediatrics, Respiratory Disorders"),
    (14, "Religare Care (Care Health)", 1, "Diabetes, Cancer, Stroke, Heart Disease, Critical Illness"),
    (15, "New India Assurance", 1, "General, Cancer, Diabetes, Heart Disease, Neurological Disorders"),
];

/// Connection pool over the clinic's SQLite file.
///
/// The front desk serves one conversation at a time, so the pool is capped
/// at a single connection; WAL keeps concurrent readers cheap regardless.
#[derive(Debug, Clone)]
pub struct ClinicDb {
    pool: SqlitePool,
}

impl ClinicDb {
    /// Open the database (creating the file if needed), apply the schema and
    /// seed the insurer catalog.
    pub async fn connect(path: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", path))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.init_schema().await?;
        db.seed_insurers().await?;
        info!("Clinic database ready at {}", path);
        Ok(db)
    }

    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn init_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS insurers (
                insurer_id INTEGER PRIMARY KEY,
                insurer_name TEXT NOT NULL,
                is_supported INTEGER NOT NULL,
                covered_conditions TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS patients (
                patient_id INTEGER PRIMARY KEY AUTOINCREMENT,
                patient_name TEXT,
                phone_number TEXT,
                email TEXT UNIQUE,
                illness TEXT,
                insurer_id INTEGER,
                FOREIGN KEY (insurer_id) REFERENCES insurers (insurer_id)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS appointments (
                appointment_id INTEGER PRIMARY KEY AUTOINCREMENT,
                start_time TEXT NOT NULL,
                end_time TEXT NOT NULL,
                doctor_name TEXT NOT NULL,
                patient_id INTEGER,
                FOREIGN KEY (patient_id) REFERENCES patients (patient_id)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        // One appointment per clinician per start time; concurrent bookings
        // lose this race instead of double-booking.
        sqlx::query(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_appointments_doctor_start \
             ON appointments (doctor_name, start_time)",
        )
        .execute(&self.pool)
        .await?;

        debug!("Database schema applied");
        Ok(())
    }

    async fn seed_insurers(&self) -> Result<(), StoreError> {
        let mut inserted = 0u64;
        for (insurer_id, name, is_supported, covered) in INSURER_SEED {
            let result = sqlx::query(
                "INSERT OR IGNORE INTO insurers (insurer_id, insurer_name, is_supported, covered_conditions) \
                 VALUES (?, ?, ?, ?)",
            )
            .bind(insurer_id)
            .bind(name)
            .bind(is_supported)
            .bind(covered)
            .execute(&self.pool)
            .await?;
            inserted += result.rows_affected();
        }

        if inserted > 0 {
            info!("Insurer catalog seeded with {} providers", inserted);
        }
        Ok(())
    }
}

/// Narrow a driver error to `mapped` when it is a UNIQUE violation naming
/// `column`; everything else stays a generic store failure.
pub(crate) fn unique_violation(err: sqlx::Error, column: &str, mapped: StoreError) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        let message = db_err.message();
        if message.contains("UNIQUE constraint failed") && message.contains(column) {
            return mapped;
        }
    }
    StoreError::Unavailable(err)
}
