//! Contact messages
//!
//! The contact form record, its validation rules, and the messaging
//! collaborator that delivers a validated form.

use async_trait::async_trait;
use regex::Regex;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;
use std::time::Duration;
use thiserror::Error;

use crate::client::{ServiceClient, ServiceConfig};

/// Errors returned by a contact service
#[derive(Debug, Error)]
pub enum ContactError {
    /// The service rejected one or more fields
    #[error("Validation failed for {} field(s)", .0.len())]
    Validation(FieldErrors),

    /// The message could not be delivered
    #[error("Transport error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for ContactError {
    fn from(e: reqwest::Error) -> Self {
        ContactError::Transport(e.to_string())
    }
}

/// Result type for contact operations
pub type Result<T> = std::result::Result<T, ContactError>;

/// Fields of the contact form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactField {
    /// Sender name
    Name,
    /// Sender email
    Email,
    /// Message subject
    Subject,
    /// Message body
    Message,
}

impl ContactField {
    /// All fields in form order
    pub fn all() -> [ContactField; 4] {
        [ContactField::Name, ContactField::Email, ContactField::Subject, ContactField::Message]
    }

    fn required_message(&self) -> &'static str {
        match self {
            ContactField::Name => "Name is required",
            ContactField::Email => "Email is required",
            ContactField::Subject => "Subject is required",
            ContactField::Message => "Message is required",
        }
    }
}

/// Message shown when the email field is not an address
pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address";

/// A contact message as typed by the visitor
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContactForm {
    /// Sender name
    pub name: String,
    /// Sender email
    pub email: String,
    /// Message subject
    pub subject: String,
    /// Message body
    pub message: String,
}

impl ContactForm {
    /// Value of a field
    pub fn field(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Subject => &self.subject,
            ContactField::Message => &self.message,
        }
    }

    /// Replace the value of a field
    pub fn set_field(&mut self, field: ContactField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ContactField::Name => self.name = value,
            ContactField::Email => self.email = value,
            ContactField::Subject => self.subject = value,
            ContactField::Message => self.message = value,
        }
    }

    /// Whether every field is empty
    pub fn is_blank(&self) -> bool {
        ContactField::all().iter().all(|f| self.field(*f).is_empty())
    }

    /// Check the form, returning one message per offending field
    ///
    /// Every field is required (non-empty after trimming). A non-empty email
    /// must also look like `local@domain.tld`; the format message takes the
    /// place of the required message.
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();

        for field in ContactField::all() {
            if self.field(field).trim().is_empty() {
                errors.insert(field, field.required_message());
            }
        }

        if !self.email.is_empty() && !is_valid_email(&self.email) {
            errors.insert(ContactField::Email, INVALID_EMAIL_MESSAGE);
        }

        errors
    }
}

/// Whether a string has the `local@domain.tld` shape
pub fn is_valid_email(email: &str) -> bool {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex =
        EMAIL_REGEX.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
    regex.is_match(email)
}

/// Per-field validation messages
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<ContactField, String>);

impl FieldErrors {
    /// Record a message for a field, replacing any previous one
    pub fn insert(&mut self, field: ContactField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Message for a field, if any
    pub fn get(&self, field: ContactField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Drop the message for a field
    pub fn clear(&mut self, field: ContactField) -> bool {
        self.0.remove(&field).is_some()
    }

    /// Number of fields with errors
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no field has an error
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Fields with errors, in form order
    pub fn fields(&self) -> impl Iterator<Item = ContactField> + '_ {
        self.0.keys().copied()
    }
}

/// Messaging capability
#[async_trait]
pub trait ContactService: Send + Sync {
    /// Deliver a contact message
    async fn submit(&self, form: &ContactForm) -> Result<()>;
}

/// Messaging service that only waits, then acknowledges
#[derive(Debug, Clone)]
pub struct MockContactService {
    delay: Duration,
}

impl Default for MockContactService {
    fn default() -> Self {
        Self { delay: Duration::from_millis(2000) }
    }
}

impl MockContactService {
    /// Create a mock with the default 2s latency
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock with a custom latency
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }

    /// Simulated latency
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl ContactService for MockContactService {
    async fn submit(&self, form: &ContactForm) -> Result<()> {
        tracing::debug!(subject = %form.subject, delay_ms = self.delay.as_millis() as u64, "simulating contact delivery");
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct ValidationResponse {
    #[serde(default)]
    errors: FieldErrors,
}

/// Messaging service backed by `POST /contact`
#[derive(Debug, Clone)]
pub struct HttpContactService {
    client: ServiceClient,
}

impl HttpContactService {
    /// Create a new HTTP contact service
    pub fn new(config: ServiceConfig) -> Result<Self> {
        Ok(Self { client: ServiceClient::new(config)? })
    }
}

#[async_trait]
impl ContactService for HttpContactService {
    async fn submit(&self, form: &ContactForm) -> Result<()> {
        let response = self
            .client
            .http()
            .post(self.client.url("/contact"))
            .json(form)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                let body = response.text().await.unwrap_or_default();
                let errors = serde_json::from_str::<ValidationResponse>(&body)
                    .map(|r| r.errors)
                    .unwrap_or_default();
                Err(ContactError::Validation(errors))
            }
            status => Err(ContactError::Transport(format!(
                "unexpected status {}",
                status.as_u16()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn filled_form() -> ContactForm {
        ContactForm {
            name: "Jordan".to_string(),
            email: "jordan@example.com".to_string(),
            subject: "Enterprise plans".to_string(),
            message: "Do you offer team licenses?".to_string(),
        }
    }

    #[test]
    fn test_empty_form_has_four_errors() {
        let errors = ContactForm::default().validate();

        assert_eq!(errors.len(), 4);
        assert_eq!(errors.get(ContactField::Name), Some("Name is required"));
        assert_eq!(errors.get(ContactField::Email), Some("Email is required"));
        assert_eq!(errors.get(ContactField::Subject), Some("Subject is required"));
        assert_eq!(errors.get(ContactField::Message), Some("Message is required"));
    }

    #[test]
    fn test_malformed_email_has_single_error() {
        let form = ContactForm { email: "abc".to_string(), ..filled_form() };
        let errors = form.validate();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(ContactField::Email), Some(INVALID_EMAIL_MESSAGE));
    }

    #[test]
    fn test_whitespace_only_fields_are_missing() {
        let form = ContactForm { name: "   ".to_string(), ..filled_form() };
        let errors = form.validate();

        assert_eq!(errors.fields().collect::<Vec<_>>(), vec![ContactField::Name]);
    }

    #[test]
    fn test_whitespace_email_reports_format() {
        let form = ContactForm { email: "  ".to_string(), ..filled_form() };
        let errors = form.validate();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(ContactField::Email), Some(INVALID_EMAIL_MESSAGE));
    }

    #[test]
    fn test_valid_form() {
        assert!(filled_form().validate().is_empty());
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.de"));
        assert!(!is_valid_email("@c.de"));
    }

    #[test]
    fn test_set_field() {
        let mut form = ContactForm::default();
        assert!(form.is_blank());

        form.set_field(ContactField::Subject, "Hello");
        assert_eq!(form.field(ContactField::Subject), "Hello");
        assert!(!form.is_blank());
    }

    #[tokio::test(start_paused = true)]
    async fn test_mock_waits_for_delay() {
        let service = MockContactService::new();
        let start = tokio::time::Instant::now();

        service.submit(&filled_form()).await.unwrap();

        assert!(start.elapsed() >= Duration::from_millis(2000));
    }

    #[tokio::test]
    async fn test_http_submit_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/contact"))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&mock_server)
            .await;

        let service = HttpContactService::new(ServiceConfig::new(mock_server.uri())).unwrap();
        service.submit(&filled_form()).await.unwrap();
    }

    #[tokio::test]
    async fn test_http_submit_validation_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/contact"))
            .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({
                "errors": { "email": "Domain does not accept mail" }
            })))
            .mount(&mock_server)
            .await;

        let service = HttpContactService::new(ServiceConfig::new(mock_server.uri())).unwrap();
        let err = service.submit(&filled_form()).await.unwrap_err();

        match err {
            ContactError::Validation(errors) => {
                assert_eq!(errors.get(ContactField::Email), Some("Domain does not accept mail"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_http_submit_transport_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/contact"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&mock_server)
            .await;

        let service = HttpContactService::new(ServiceConfig::new(mock_server.uri())).unwrap();
        let err = service.submit(&filled_form()).await.unwrap_err();

        assert!(matches!(err, ContactError::Transport(_)));
    }
}
