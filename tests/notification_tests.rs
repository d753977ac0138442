/// Provider-client tests with mocked SendGrid and Twilio APIs.
use lead_relay_api::config::Config;
use lead_relay_api::dispatch::{NotificationService, CONFIRMATION_SUBJECT};
use lead_relay_api::services::{SendGridService, TwilioService};
use wiremock::matchers::{basic_auth, bearer_token, body_partial_json, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper function to create test config
fn create_test_config(sendgrid_base_url: String, twilio_base_url: String) -> Config {
    Config {
        port: 8080,
        sendgrid_api_key: "test_sendgrid_key".to_string(),
        sendgrid_base_url,
        email_from: "demos@example.com".to_string(),
        twilio_sid: "test_sid".to_string(),
        twilio_auth: "test_auth".to_string(),
        twilio_phone: "+15550009999".to_string(),
        twilio_whatsapp: "whatsapp:+15550008888".to_string(),
        twilio_base_url,
    }
}

#[tokio::test]
async fn test_sendgrid_sends_expected_payload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/mail/send"))
        .and(bearer_token("test_sendgrid_key"))
        .and(body_partial_json(serde_json::json!({
            "personalizations": [{"to": [{"email": "a@x.com"}]}],
            "from": {"email": "demos@example.com"},
            "subject": CONFIRMATION_SUBJECT,
            "content": [{"type": "text/plain", "value": "hello"}],
        })))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(mock_server.uri(), "https://api.twilio.com".to_string());
    let service = SendGridService::new(&config).unwrap();

    let result = service.send_email("a@x.com", CONFIRMATION_SUBJECT, "hello").await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_sendgrid_error_carries_status_and_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/mail/send"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad api key"))
        .mount(&mock_server)
        .await;

    let config = create_test_config(mock_server.uri(), "https://api.twilio.com".to_string());
    let service = SendGridService::new(&config).unwrap();

    let result = service.send_email("a@x.com", "subject", "body").await;
    let error = result.unwrap_err().to_string();
    assert!(error.contains("401"), "missing status in: {}", error);
    assert!(error.contains("bad api key"), "missing body in: {}", error);
}

#[tokio::test]
async fn test_twilio_sms_uses_basic_auth_and_form_encoding() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/2010-04-01/Accounts/test_sid/Messages.json"))
        .and(basic_auth("test_sid", "test_auth"))
        .and(body_string_contains("To=%2B15551234567"))
        .and(body_string_contains("From=%2B15550009999"))
        .and(body_string_contains("Body=hello+there"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config("https://api.sendgrid.com".to_string(), mock_server.uri());
    let service = TwilioService::new(&config).unwrap();

    let result = service.send_sms("+15551234567", "hello there").await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_twilio_whatsapp_prefixes_destination() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/2010-04-01/Accounts/test_sid/Messages.json"))
        .and(body_string_contains("To=whatsapp%3A%2B15551234567"))
        .and(body_string_contains("From=whatsapp%3A%2B15550008888"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config("https://api.sendgrid.com".to_string(), mock_server.uri());
    let service = TwilioService::new(&config).unwrap();

    let result = service.send_whatsapp("+15551234567", "hello").await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_twilio_error_propagates() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/2010-04-01/Accounts/test_sid/Messages.json"))
        .respond_with(ResponseTemplate::new(400).set_body_string("invalid number"))
        .mount(&mock_server)
        .await;

    let config = create_test_config("https://api.sendgrid.com".to_string(), mock_server.uri());
    let service = TwilioService::new(&config).unwrap();

    let result = service.send_sms("not-a-number", "hello").await;
    let error = result.unwrap_err().to_string();
    assert!(error.contains("400"));
    assert!(error.contains("invalid number"));
}

#[tokio::test]
async fn test_dispatch_sends_email_then_sms_then_whatsapp() {
    let sendgrid_server = MockServer::start().await;
    let twilio_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/mail/send"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&sendgrid_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/2010-04-01/Accounts/test_sid/Messages.json"))
        .respond_with(ResponseTemplate::new(201))
        .expect(2)
        .mount(&twilio_server)
        .await;

    let config = create_test_config(sendgrid_server.uri(), twilio_server.uri());
    let notifier = NotificationService::new(&config).unwrap();

    let result = notifier
        .send_booking_confirmation("Ana", "a@x.com", "+15551234567")
        .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_dispatch_stops_at_first_twilio_failure() {
    let sendgrid_server = MockServer::start().await;
    let twilio_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/mail/send"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&sendgrid_server)
        .await;

    // First Twilio call (SMS) fails, so the WhatsApp send never happens
    Mock::given(method("POST"))
        .and(path("/2010-04-01/Accounts/test_sid/Messages.json"))
        .respond_with(ResponseTemplate::new(500).set_body_string("twilio down"))
        .expect(1)
        .mount(&twilio_server)
        .await;

    let config = create_test_config(sendgrid_server.uri(), twilio_server.uri());
    let notifier = NotificationService::new(&config).unwrap();

    let result = notifier
        .send_booking_confirmation("Ana", "a@x.com", "+15551234567")
        .await;
    assert!(result.unwrap_err().to_string().contains("twilio down"));
}
