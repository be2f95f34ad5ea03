use chrono::{NaiveDate, NaiveTime};
use reqwest::Client;
use serde_json::json;
use tracing::info;

use shared_config::AppConfig;

use crate::models::{AppointmentConfirmation, NotificationError};

/// Sends appointment confirmations through a SendGrid dynamic template.
pub struct ConfirmationMailer {
    client: Client,
    api_key: String,
    from_email: String,
    template_id: String,
    base_url: String,
}

impl ConfirmationMailer {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: config.sendgrid_api_key.clone(),
            from_email: config.sendgrid_from_email.clone(),
            template_id: config.sendgrid_template_id.clone(),
            base_url: config.sendgrid_base_url.clone(),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.from_email.is_empty()
    }

    /// Fire a confirmation email. Callers treat this as best-effort; a
    /// booking stands regardless of what happens here.
    pub async fn send_confirmation(
        &self,
        confirmation: &AppointmentConfirmation,
    ) -> Result<(), NotificationError> {
        if !self.is_configured() {
            return Err(NotificationError::NotConfigured);
        }

        let (date, time) = humanize_slot(
            &confirmation.appointment_date,
            &confirmation.appointment_time,
        );

        let body = json!({
            "from": { "email": self.from_email },
            "personalizations": [{
                "to": [{ "email": confirmation.patient_email }],
                "dynamic_template_data": {
                    "appointment_start_time": time,
                    "patient_name": confirmation.patient_name,
                    "doctor_name": confirmation.doctor_name,
                    "appointment_date": date,
                    "unsubscribe": "https://example.com/unsubscribe",
                    "unsubscribe_preferences": "https://example.com/preferences",
                }
            }],
            "template_id": self.template_id,
        });

        let response = self
            .client
            .post(format!("{}/v3/mail/send", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotificationError::Rejected(status));
        }

        info!(
            "Confirmation email sent to {}. Status code: {}",
            confirmation.patient_email,
            status.as_u16()
        );
        Ok(())
    }
}

/// Reformat "2025-10-15" / "09:30" as "October 15, 2025" / "9:30 AM".
/// Unparseable input passes through unchanged so the email still sends.
fn humanize_slot(date: &str, time: &str) -> (String, String) {
    match (
        NaiveDate::parse_from_str(date, "%Y-%m-%d"),
        NaiveTime::parse_from_str(time, "%H:%M"),
    ) {
        (Ok(d), Ok(t)) => (
            d.format("%B %d, %Y").to_string(),
            t.format("%-I:%M %p").to_string(),
        ),
        _ => (date.to_string(), time.to_string()),
    }
}
