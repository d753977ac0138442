use crate::config::Config;
use crate::errors::AppError;
use crate::services::{SendGridService, TwilioService};

/// Subject line for the booking confirmation email.
pub const CONFIRMATION_SUBJECT: &str = "AI Agent Demo Booking Confirmation";

/// Builds the confirmation message body for a lead.
pub fn compose_confirmation(name: &str) -> String {
    format!(
        "Hi {}, thanks for booking your AI Agent demo! We'll see you soon.",
        name
    )
}

/// Sends the booking confirmation across the configured channels.
///
/// Email always goes out; SMS and WhatsApp only when the lead left a phone
/// number. Sends are sequential and the first failure aborts the rest, so a
/// failed SMS after a successful email surfaces as a plain dispatch error.
#[derive(Clone)]
pub struct NotificationService {
    sendgrid: SendGridService,
    twilio: TwilioService,
}

impl NotificationService {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        Ok(Self {
            sendgrid: SendGridService::new(config)?,
            twilio: TwilioService::new(config)?,
        })
    }

    /// Dispatches the fixed confirmation message to `email` and, when
    /// `phone` is non-empty, to `phone` over SMS and WhatsApp.
    pub async fn send_booking_confirmation(
        &self,
        name: &str,
        email: &str,
        phone: &str,
    ) -> Result<(), AppError> {
        let message = compose_confirmation(name);

        self.sendgrid
            .send_email(email, CONFIRMATION_SUBJECT, &message)
            .await?;

        if !phone.is_empty() {
            self.twilio.send_sms(phone, &message).await?;
            self.twilio.send_whatsapp(phone, &message).await?;
        }

        Ok(())
    }
}
