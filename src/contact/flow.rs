//! Contact submission flow - validate, deliver, report
//!
//! `ContactFlow::submit` is a pure function of the draft plus the injected
//! delivery channel: it holds no mutable state and is safe to call from many
//! tasks at once.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::contact::delivery::DeliveryChannel;
use crate::contact::schema::{validate, ContactDraft, ContactSubmission, FieldErrors};

pub const MSG_FIX_ERRORS: &str = "Please fix the errors below.";
pub const MSG_RECEIVED: &str = "Your dispatch has been received. I shall reply within 24 hours.";
pub const MSG_TRANSMISSION_FAILED: &str =
    "Transmission failed. Please try again or reach out directly via social links.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Success,
    Error,
}

/// Outcome of one submission attempt
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResult {
    pub status: SubmissionStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<FieldErrors>,
}

impl SubmissionResult {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn invalid(field_errors: FieldErrors) -> Self {
        SubmissionResult {
            status: SubmissionStatus::Error,
            message: MSG_FIX_ERRORS.to_string(),
            field_errors: Some(field_errors),
        }
    }

    pub fn received() -> Self {
        SubmissionResult {
            status: SubmissionStatus::Success,
            message: MSG_RECEIVED.to_string(),
            field_errors: None,
        }
    }

    pub fn transmission_failed() -> Self {
        SubmissionResult {
            status: SubmissionStatus::Error,
            message: MSG_TRANSMISSION_FAILED.to_string(),
            field_errors: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == SubmissionStatus::Success
    }

    pub fn is_error(&self) -> bool {
        self.status == SubmissionStatus::Error
    }

    /// An error that is not about the input
    pub fn is_delivery_error(&self) -> bool {
        self.is_error() && self.field_errors.is_none()
    }
}

/// What the post-delivery hook is told about
#[derive(Clone, Debug)]
pub struct AuditRecord {
    pub name: String,
    pub email: String,
    pub at: DateTime<Utc>,
}

impl AuditRecord {
    fn from_submission(submission: &ContactSubmission) -> Self {
        AuditRecord {
            name: submission.name.clone(),
            email: submission.email.clone(),
            at: Utc::now(),
        }
    }
}

/// Best-effort notification after a successful delivery
#[async_trait]
pub trait AuditHook: Send + Sync {
    async fn record(&self, record: AuditRecord) -> anyhow::Result<()>;
}

/// Writes one audit line to the log
pub struct LogAudit;

#[async_trait]
impl AuditHook for LogAudit {
    async fn record(&self, record: AuditRecord) -> anyhow::Result<()> {
        tracing::info!(
            "[Contact] {} <{}> at {}",
            record.name,
            record.email,
            record.at.to_rfc3339()
        );
        Ok(())
    }
}

#[derive(Clone)]
pub struct ContactFlow {
    channel: Arc<dyn DeliveryChannel>,
    audit: Arc<dyn AuditHook>,
}

impl ContactFlow {
    pub fn new(channel: Arc<dyn DeliveryChannel>, audit: Arc<dyn AuditHook>) -> Self {
        ContactFlow { channel, audit }
    }

    pub fn channel_name(&self) -> &str {
        self.channel.name()
    }

    pub async fn submit(&self, draft: &ContactDraft) -> SubmissionResult {
        let submission = match validate(draft) {
            Ok(submission) => submission,
            Err(field_errors) => {
                let fields: Vec<&str> = field_errors.keys().map(|f| f.as_str()).collect();
                tracing::info!(fields = ?fields, "Contact submission rejected");
                return SubmissionResult::invalid(field_errors);
            }
        };

        match self.channel.deliver(&submission).await {
            Ok(()) => {
                let result = SubmissionResult::received();
                self.spawn_audit(AuditRecord::from_submission(&submission));
                result
            }
            Err(e) => {
                tracing::error!(channel = self.channel.name(), error = %e, "[Contact] delivery failed");
                SubmissionResult::transmission_failed()
            }
        }
    }

    /// Detached: the caller's result is already decided and never waits on this
    fn spawn_audit(&self, record: AuditRecord) {
        let audit = Arc::clone(&self.audit);
        tokio::spawn(async move {
            if let Err(e) = audit.record(record).await {
                tracing::warn!(error = %e, "Contact audit hook failed");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::delivery::{DeliveryError, SimulatedDelivery};
    use crate::contact::schema::Field;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::sync::mpsc;

    struct FailingChannel;

    #[async_trait]
    impl DeliveryChannel for FailingChannel {
        async fn deliver(&self, _submission: &ContactSubmission) -> Result<(), DeliveryError> {
            Err(DeliveryError::Status(503))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    #[derive(Default)]
    struct CountingChannel {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl DeliveryChannel for CountingChannel {
        async fn deliver(&self, _submission: &ContactSubmission) -> Result<(), DeliveryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    struct ChannelAudit(mpsc::UnboundedSender<AuditRecord>);

    #[async_trait]
    impl AuditHook for ChannelAudit {
        async fn record(&self, record: AuditRecord) -> anyhow::Result<()> {
            self.0.send(record)?;
            Ok(())
        }
    }

    struct BrokenAudit;

    #[async_trait]
    impl AuditHook for BrokenAudit {
        async fn record(&self, _record: AuditRecord) -> anyhow::Result<()> {
            anyhow::bail!("webhook unreachable")
        }
    }

    fn valid_draft() -> ContactDraft {
        ContactDraft {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            subject: "Project enquiry".to_string(),
            message: "x".repeat(25),
            budget: None,
            timeline: None,
        }
    }

    fn simulated() -> Arc<dyn DeliveryChannel> {
        Arc::new(SimulatedDelivery::new(Duration::from_millis(1)))
    }

    #[tokio::test]
    async fn test_invalid_draft_reports_field_errors() {
        let flow = ContactFlow::new(simulated(), Arc::new(LogAudit));
        let draft = ContactDraft {
            name: "A".to_string(),
            email: "bad".to_string(),
            subject: "ok subj".to_string(),
            message: "short".to_string(),
            budget: None,
            timeline: None,
        };

        let result = flow.submit(&draft).await;
        assert_eq!(result.status, SubmissionStatus::Error);
        assert_eq!(result.message, MSG_FIX_ERRORS);
        let errors = result.field_errors.unwrap();
        assert!(errors.contains_key(&Field::Name));
        assert!(errors.contains_key(&Field::Email));
        assert!(errors.contains_key(&Field::Message));
        assert!(!errors.contains_key(&Field::Subject));
    }

    #[tokio::test]
    async fn test_invalid_draft_never_reaches_channel() {
        let channel = Arc::new(CountingChannel::default());
        let flow = ContactFlow::new(channel.clone(), Arc::new(LogAudit));
        let mut draft = valid_draft();
        draft.email = "nope".to_string();

        flow.submit(&draft).await;
        assert_eq!(channel.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_successful_delivery() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let flow = ContactFlow::new(simulated(), Arc::new(ChannelAudit(tx)));

        let result = flow.submit(&valid_draft()).await;
        assert_eq!(result.status, SubmissionStatus::Success);
        assert_eq!(result.message, MSG_RECEIVED);
        assert!(result.field_errors.is_none());

        let record = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.name, "Jane Doe");
        assert_eq!(record.email, "jane@example.com");
    }

    #[tokio::test]
    async fn test_failed_delivery_is_distinct_from_invalid_input() {
        let flow = ContactFlow::new(Arc::new(FailingChannel), Arc::new(LogAudit));

        let result = flow.submit(&valid_draft()).await;
        assert_eq!(result.status, SubmissionStatus::Error);
        assert_eq!(result.message, MSG_TRANSMISSION_FAILED);
        assert!(result.field_errors.is_none());
        assert!(result.is_delivery_error());
    }

    #[tokio::test]
    async fn test_broken_audit_hook_does_not_affect_result() {
        let flow = ContactFlow::new(simulated(), Arc::new(BrokenAudit));
        let result = flow.submit(&valid_draft()).await;
        assert!(result.is_success());
    }

    #[tokio::test]
    async fn test_each_submit_delivers_again() {
        let channel = Arc::new(CountingChannel::default());
        let flow = ContactFlow::new(channel.clone(), Arc::new(LogAudit));

        let draft = valid_draft();
        let (a, b) = tokio::join!(flow.submit(&draft), flow.submit(&draft));
        assert!(a.is_success() && b.is_success());
        assert_eq!(channel.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_result_json_shape() {
        let json = serde_json::to_value(SubmissionResult::transmission_failed()).unwrap();
        assert_eq!(json["status"], "error");
        assert!(json.get("fieldErrors").is_none());

        let mut errors = FieldErrors::new();
        errors.insert(Field::Email, "Please enter a valid email address".to_string());
        let json = serde_json::to_value(SubmissionResult::invalid(errors)).unwrap();
        assert_eq!(json["fieldErrors"]["email"], "Please enter a valid email address");
    }
}
