use crate::config::Config;
use crate::errors::AppError;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;

/// Client for the SendGrid transactional mail API.
#[derive(Clone)]
pub struct SendGridService {
    client: Client,
    base_url: String,
    api_key: String,
    from_email: String,
}

impl SendGridService {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                AppError::InternalError(format!("Failed to create SendGrid client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: config.sendgrid_base_url.clone(),
            api_key: config.sendgrid_api_key.clone(),
            from_email: config.email_from.clone(),
        })
    }

    /// Sends a plain-text email via `POST /v3/mail/send`.
    pub async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<(), AppError> {
        let url = format!("{}/v3/mail/send", self.base_url);

        let payload = json!({
            "personalizations": [{"to": [{"email": to}]}],
            "from": {"email": self.from_email},
            "subject": subject,
            "content": [{"type": "text/plain", "value": body}],
        });

        tracing::debug!("Sending confirmation email to {}", to);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                AppError::ExternalApiError(format!("SendGrid request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!("SendGrid returned error {}: {}", status, error_text);
            return Err(AppError::ExternalApiError(format!(
                "SendGrid returned status {}: {}",
                status, error_text
            )));
        }

        tracing::info!("Confirmation email sent to {}", to);
        Ok(())
    }
}

/// Client for the Twilio Messages API (SMS and WhatsApp).
#[derive(Clone)]
pub struct TwilioService {
    client: Client,
    base_url: String,
    account_sid: String,
    auth_token: String,
    sms_from: String,
    whatsapp_from: String,
}

impl TwilioService {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                AppError::InternalError(format!("Failed to create Twilio client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: config.twilio_base_url.clone(),
            account_sid: config.twilio_sid.clone(),
            auth_token: config.twilio_auth.clone(),
            sms_from: config.twilio_phone.clone(),
            whatsapp_from: config.twilio_whatsapp.clone(),
        })
    }

    /// Sends a plain SMS to `to`.
    pub async fn send_sms(&self, to: &str, body: &str) -> Result<(), AppError> {
        self.send_message(to, &self.sms_from, body).await
    }

    /// Sends the same message over the WhatsApp channel.
    ///
    /// Twilio addresses WhatsApp destinations as `whatsapp:{number}`.
    pub async fn send_whatsapp(&self, to: &str, body: &str) -> Result<(), AppError> {
        let to = format!("whatsapp:{}", to);
        self.send_message(&to, &self.whatsapp_from, body).await
    }

    async fn send_message(&self, to: &str, from: &str, body: &str) -> Result<(), AppError> {
        let url = format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.base_url, self.account_sid
        );

        let params = [("To", to), ("From", from), ("Body", body)];

        tracing::debug!("Sending Twilio message to {}", to);

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::ExternalApiError(format!("Twilio request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!("Twilio returned error {}: {}", status, error_text);
            return Err(AppError::ExternalApiError(format!(
                "Twilio returned status {}: {}",
                status, error_text
            )));
        }

        tracing::info!("Twilio message sent to {}", to);
        Ok(())
    }
}
