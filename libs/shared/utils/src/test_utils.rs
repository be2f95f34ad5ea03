use tempfile::NamedTempFile;

use shared_config::AppConfig;
use shared_database::ClinicDb;

/// A freshly migrated and seeded database on a throwaway file.
///
/// The temp file handle is returned alongside the pool; dropping it deletes
/// the database, so keep it bound for the duration of the test.
pub async fn test_db() -> (ClinicDb, NamedTempFile) {
    let file = NamedTempFile::new().expect("create temp database file");
    let path = file.path().to_str().expect("temp path is valid utf-8");
    let db = ClinicDb::connect(path).await.expect("open test database");
    (db, file)
}

pub struct TestConfig {
    pub sendgrid_api_key: String,
    pub sendgrid_from_email: String,
    pub sendgrid_template_id: String,
    pub sendgrid_base_url: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            sendgrid_api_key: "SG.test-key".to_string(),
            sendgrid_from_email: "frontdesk@stemmee.example".to_string(),
            sendgrid_template_id: "d-test-template".to_string(),
            sendgrid_base_url: "https://api.sendgrid.com".to_string(),
        }
    }
}

impl TestConfig {
    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            db_path: "unused.db".to_string(),
            port: 3000,
            clinic_name: "Stemmee Surgery Center".to_string(),
            sendgrid_api_key: self.sendgrid_api_key.clone(),
            sendgrid_from_email: self.sendgrid_from_email.clone(),
            sendgrid_template_id: self.sendgrid_template_id.clone(),
            sendgrid_base_url: self.sendgrid_base_url.clone(),
        }
    }
}
