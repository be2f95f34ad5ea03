use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: String,
    pub port: u16,
    pub clinic_name: String,
    pub sendgrid_api_key: String,
    pub sendgrid_from_email: String,
    pub sendgrid_template_id: String,
    pub sendgrid_base_url: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            db_path: env::var("CLINIC_DB_PATH")
                .unwrap_or_else(|_| {
                    warn!("CLINIC_DB_PATH not set, using clinic_data.db");
                    "clinic_data.db".to_string()
                }),
            port: env::var("PORT")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(3000),
            clinic_name: env::var("CLINIC_NAME")
                .unwrap_or_else(|_| "Stemmee Surgery Center".to_string()),
            sendgrid_api_key: env::var("SENDGRID_API_KEY")
                .unwrap_or_else(|_| {
                    warn!("SENDGRID_API_KEY not set, using empty value");
                    String::new()
                }),
            sendgrid_from_email: env::var("SENDGRID_FROM_EMAIL")
                .unwrap_or_else(|_| {
                    warn!("SENDGRID_FROM_EMAIL not set, using empty value");
                    String::new()
                }),
            sendgrid_template_id: env::var("SENDGRID_TEMPLATE_ID")
                .unwrap_or_else(|_| "d-6245e3018e5b430f98f27cbb96a1dd08".to_string()),
            sendgrid_base_url: env::var("SENDGRID_BASE_URL")
                .unwrap_or_else(|_| "https://api.sendgrid.com".to_string()),
        };

        if !config.is_email_configured() {
            warn!("Email notifications not fully configured - confirmation emails will be skipped");
        }

        config
    }

    pub fn is_email_configured(&self) -> bool {
        !self.sendgrid_api_key.is_empty() && !self.sendgrid_from_email.is_empty()
    }
}
