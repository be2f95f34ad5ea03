use sqlx::Row;

use shared_models::{InsurerRecord, StoreError};

use crate::db::ClinicDb;

fn read_insurer(row: &sqlx::sqlite::SqliteRow) -> Result<InsurerRecord, StoreError> {
    Ok(InsurerRecord {
        insurer_id: row.try_get("insurer_id")?,
        insurer_name: row.try_get("insurer_name")?,
        is_supported: row.try_get::<i64, _>("is_supported")? != 0,
        covered_conditions: row.try_get("covered_conditions")?,
    })
}

impl ClinicDb {
    /// The full insurer catalog, in seed order.
    pub async fn all_insurers(&self) -> Result<Vec<InsurerRecord>, StoreError> {
        let rows = sqlx::query(
            "SELECT insurer_id, insurer_name, is_supported, covered_conditions \
             FROM insurers ORDER BY insurer_id",
        )
        .fetch_all(self.pool())
        .await?;

        rows.iter().map(read_insurer).collect()
    }
}
