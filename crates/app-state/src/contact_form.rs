//! Contact form submission state
//!
//! Tracks the fields being edited, per-field validation messages, whether a
//! submission is in flight (the submit control is disabled meanwhile) and
//! the post-submission acknowledgment window.
//!
//! At most one submission is in flight per form. A second submit while one
//! is pending is rejected with [`SubmitError::InFlight`]; in-flight
//! submissions are never cancelled.

use app_core::contact::{ContactError, ContactField, ContactForm, ContactService, FieldErrors};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;

/// How long the success acknowledgment stays visible
pub const DEFAULT_ACKNOWLEDGEMENT: Duration = Duration::from_millis(5000);

/// Submission errors
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Local validation failed; nothing was sent
    #[error("Form has {} invalid field(s)", .0.len())]
    Invalid(FieldErrors),

    /// A submission is already pending
    #[error("A submission is already in progress")]
    InFlight,

    /// The messaging service rejected or failed to deliver the message
    #[error("Delivery failed: {0}")]
    Delivery(#[from] ContactError),
}

/// Result type for submissions
pub type Result<T> = std::result::Result<T, SubmitError>;

#[derive(Debug, Default)]
struct FormState {
    form: ContactForm,
    errors: FieldErrors,
    submitting: bool,
    acknowledged_at: Option<Instant>,
}

/// Contact form controller
///
/// Cloning is cheap; clones drive the same form.
#[derive(Clone)]
pub struct ContactFormController {
    state: Arc<Mutex<FormState>>,
    service: Arc<dyn ContactService>,
    acknowledgement: Duration,
}

impl ContactFormController {
    /// Create an empty form delivering through `service`
    pub fn new(service: Arc<dyn ContactService>) -> Self {
        Self {
            state: Arc::new(Mutex::new(FormState::default())),
            service,
            acknowledgement: DEFAULT_ACKNOWLEDGEMENT,
        }
    }

    /// Override how long the success acknowledgment is shown
    pub fn with_acknowledgement(mut self, window: Duration) -> Self {
        self.acknowledgement = window;
        self
    }

    /// Edit a field; clears that field's error only
    pub fn update_field(&self, field: ContactField, value: impl Into<String>) {
        let mut state = self.state.lock();
        state.form.set_field(field, value);
        state.errors.clear(field);
    }

    /// Snapshot of the current field values
    pub fn form(&self) -> ContactForm {
        self.state.lock().form.clone()
    }

    /// Snapshot of the current validation messages
    pub fn errors(&self) -> FieldErrors {
        self.state.lock().errors.clone()
    }

    /// Message for a single field
    pub fn error(&self, field: ContactField) -> Option<String> {
        self.state.lock().errors.get(field).map(str::to_string)
    }

    /// Whether a submission is pending
    pub fn is_submitting(&self) -> bool {
        self.state.lock().submitting
    }

    /// Whether the submit control is enabled
    pub fn can_submit(&self) -> bool {
        !self.is_submitting()
    }

    /// Whether the success acknowledgment is currently visible
    pub fn is_acknowledged(&self) -> bool {
        self.state
            .lock()
            .acknowledged_at
            .is_some_and(|at| at.elapsed() < self.acknowledgement)
    }

    /// Validate and deliver the form
    ///
    /// Validation failures are recorded per field and returned without
    /// contacting the service. On success every field is cleared and the
    /// acknowledgment window starts. On delivery failure the fields are kept
    /// so the visitor can retry.
    pub async fn submit(&self) -> Result<()> {
        self.begin_submit()?.deliver().await
    }

    /// Validate the form and mark it as submitting
    ///
    /// Returns the pending delivery, which may be awaited in place or moved
    /// to another task. The submit control stays disabled until the returned
    /// value finishes or is dropped.
    pub fn begin_submit(&self) -> Result<PendingSubmission> {
        let mut state = self.state.lock();
        if state.submitting {
            return Err(SubmitError::InFlight);
        }

        let errors = state.form.validate();
        state.errors = errors.clone();
        if !errors.is_empty() {
            tracing::debug!(invalid_fields = errors.len(), "contact form rejected");
            return Err(SubmitError::Invalid(errors));
        }

        state.submitting = true;
        state.acknowledged_at = None;

        Ok(PendingSubmission {
            form: state.form.clone(),
            service: self.service.clone(),
            guard: SubmittingGuard { state: self.state.clone() },
        })
    }
}

/// Clears the submitting flag however the delivery ends
struct SubmittingGuard {
    state: Arc<Mutex<FormState>>,
}

impl Drop for SubmittingGuard {
    fn drop(&mut self) {
        self.state.lock().submitting = false;
    }
}

/// A validated form waiting to be delivered
pub struct PendingSubmission {
    form: ContactForm,
    service: Arc<dyn ContactService>,
    guard: SubmittingGuard,
}

impl PendingSubmission {
    /// The form being delivered
    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    /// Hand the form to the messaging service and record the outcome
    pub async fn deliver(self) -> Result<()> {
        let PendingSubmission { form, service, guard } = self;

        tracing::info!(subject = %form.subject, "submitting contact form");
        let result = service.submit(&form).await;

        let state = guard.state.clone();
        drop(guard);
        let mut state = state.lock();

        match result {
            Ok(()) => {
                state.form = ContactForm::default();
                state.acknowledged_at = Some(Instant::now());
                tracing::info!("contact form delivered");
                Ok(())
            }
            Err(ContactError::Validation(errors)) => {
                state.errors = errors.clone();
                Err(SubmitError::Delivery(ContactError::Validation(errors)))
            }
            Err(e) => {
                tracing::warn!("Contact form delivery failed: {}", e);
                Err(SubmitError::Delivery(e))
            }
        }
    }
}

impl std::fmt::Debug for PendingSubmission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingSubmission").field("form", &self.form).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use app_core::contact::{MockContactService, INVALID_EMAIL_MESSAGE};
    use async_trait::async_trait;
    use mockall::mock;

    mock! {
        pub Messenger {}

        #[async_trait]
        impl ContactService for Messenger {
            async fn submit(&self, form: &ContactForm) -> app_core::contact::Result<()>;
        }
    }

    fn fill(controller: &ContactFormController) {
        controller.update_field(ContactField::Name, "Jordan");
        controller.update_field(ContactField::Email, "jordan@example.com");
        controller.update_field(ContactField::Subject, "Team plans");
        controller.update_field(ContactField::Message, "Hello there");
    }

    fn mock_controller() -> ContactFormController {
        ContactFormController::new(Arc::new(MockContactService::new()))
    }

    #[tokio::test]
    async fn test_empty_submit_reports_four_errors_without_sending() {
        let mut messenger = MockMessenger::new();
        messenger.expect_submit().never();
        let controller = ContactFormController::new(Arc::new(messenger));

        let err = controller.submit().await.unwrap_err();

        assert!(matches!(err, SubmitError::Invalid(ref errors) if errors.len() == 4));
        assert_eq!(controller.errors().len(), 4);
        assert!(controller.can_submit());
    }

    #[tokio::test]
    async fn test_malformed_email_reports_one_error() {
        let controller = mock_controller();
        fill(&controller);
        controller.update_field(ContactField::Email, "abc");

        let err = controller.submit().await.unwrap_err();

        assert!(matches!(err, SubmitError::Invalid(_)));
        let errors = controller.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(ContactField::Email), Some(INVALID_EMAIL_MESSAGE));
    }

    #[tokio::test]
    async fn test_editing_clears_only_that_field() {
        let controller = mock_controller();
        let _ = controller.submit().await;

        controller.update_field(ContactField::Subject, "Hi");

        assert_eq!(controller.error(ContactField::Subject), None);
        assert_eq!(controller.errors().len(), 3);
        assert_eq!(controller.error(ContactField::Name).as_deref(), Some("Name is required"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_disables_until_delay_elapses() {
        let controller = mock_controller();
        fill(&controller);

        let pending = tokio::spawn({
            let controller = controller.clone();
            async move { controller.submit().await }
        });
        tokio::task::yield_now().await;

        assert!(controller.is_submitting());
        assert!(!controller.can_submit());
        assert!(matches!(controller.submit().await, Err(SubmitError::InFlight)));

        tokio::time::advance(Duration::from_millis(1999)).await;
        assert!(controller.is_submitting());

        tokio::time::advance(Duration::from_millis(1)).await;
        pending.await.unwrap().unwrap();

        assert!(controller.can_submit());
        assert!(controller.is_acknowledged());
        assert!(controller.form().is_blank());
        assert!(controller.errors().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_acknowledgement_expires() {
        let controller = mock_controller().with_acknowledgement(Duration::from_millis(5000));
        fill(&controller);
        controller.submit().await.unwrap();

        assert!(controller.is_acknowledged());

        tokio::time::advance(Duration::from_millis(4999)).await;
        assert!(controller.is_acknowledged());

        tokio::time::advance(Duration::from_millis(1)).await;
        assert!(!controller.is_acknowledged());
    }

    #[tokio::test]
    async fn test_delivery_failure_keeps_fields() {
        let mut messenger = MockMessenger::new();
        messenger
            .expect_submit()
            .times(1)
            .returning(|_| Err(ContactError::Transport("connection reset".to_string())));
        let controller = ContactFormController::new(Arc::new(messenger));
        fill(&controller);

        let err = controller.submit().await.unwrap_err();

        assert!(matches!(err, SubmitError::Delivery(ContactError::Transport(_))));
        assert_eq!(controller.form().name, "Jordan");
        assert!(controller.can_submit());
        assert!(!controller.is_acknowledged());
    }

    #[tokio::test]
    async fn test_remote_validation_errors_are_shown() {
        let mut messenger = MockMessenger::new();
        messenger.expect_submit().returning(|_| {
            let mut errors = FieldErrors::default();
            errors.insert(ContactField::Email, "Mailbox unavailable");
            Err(ContactError::Validation(errors))
        });
        let controller = ContactFormController::new(Arc::new(messenger));
        fill(&controller);

        assert!(controller.submit().await.is_err());
        assert_eq!(controller.error(ContactField::Email).as_deref(), Some("Mailbox unavailable"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_submit_reenables_form() {
        let controller = mock_controller();
        fill(&controller);

        let abandoned =
            tokio::time::timeout(Duration::from_millis(10), controller.submit()).await;

        assert!(abandoned.is_err());
        assert!(controller.can_submit());
        assert!(!controller.is_acknowledged());
        assert_eq!(controller.form().name, "Jordan");

        controller.submit().await.unwrap();
        assert!(controller.is_acknowledged());
    }

    #[tokio::test(start_paused = true)]
    async fn test_pending_submission_moves_to_task() {
        let controller = mock_controller();
        fill(&controller);

        let pending = controller.begin_submit().unwrap();
        assert_eq!(pending.form().subject, "Team plans");
        assert!(matches!(controller.begin_submit(), Err(SubmitError::InFlight)));

        let handle = tokio::spawn(pending.deliver());
        tokio::time::advance(Duration::from_millis(2000)).await;
        handle.await.unwrap().unwrap();

        assert!(controller.can_submit());
        assert!(controller.form().is_blank());
    }
}
