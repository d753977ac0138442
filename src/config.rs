use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    pub sendgrid_api_key: String,
    pub sendgrid_base_url: String,
    pub email_from: String,
    pub twilio_sid: String,
    pub twilio_auth: String,
    pub twilio_phone: String,
    pub twilio_whatsapp: String,
    pub twilio_base_url: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            sendgrid_api_key: required_env("SENDGRID_API_KEY")?,
            sendgrid_base_url: base_url_env("SENDGRID_BASE_URL", "https://api.sendgrid.com")?,
            email_from: required_env("EMAIL_FROM")?,
            twilio_sid: required_env("TWILIO_SID")?,
            twilio_auth: required_env("TWILIO_AUTH")?,
            twilio_phone: required_env("TWILIO_PHONE")?,
            twilio_whatsapp: required_env("TWILIO_WHATSAPP")?,
            twilio_base_url: base_url_env("TWILIO_BASE_URL", "https://api.twilio.com")?,
        };

        // Log successful configuration load (without sensitive values)
        tracing::debug!("SendGrid base URL: {}", config.sendgrid_base_url);
        tracing::debug!("Twilio base URL: {}", config.twilio_base_url);
        tracing::debug!("Email sender: {}", config.email_from);
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }
}

/// Reads a required environment variable, rejecting empty values.
fn required_env(name: &str) -> anyhow::Result<String> {
    std::env::var(name)
        .map_err(|_| anyhow::anyhow!("{} environment variable required", name))
        .and_then(|value| {
            if value.trim().is_empty() {
                anyhow::bail!("{} cannot be empty", name);
            }
            Ok(value)
        })
}

/// Reads an optional base-URL override, falling back to the provider default.
fn base_url_env(name: &str, default: &str) -> anyhow::Result<String> {
    let url = std::env::var(name)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| default.to_string());

    if !url.starts_with("http://") && !url.starts_with("https://") {
        anyhow::bail!("{} must start with http:// or https://", name);
    }

    Ok(url.trim_end_matches('/').to_string())
}
