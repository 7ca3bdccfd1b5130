//! Contact layer - the "Dispatch" form and its delivery pipeline
//!
//! The schema is shared by the App (fast feedback before sending) and the
//! flow (authoritative check before delivery).

pub mod schema;
pub mod delivery;
pub mod flow;

pub use schema::{validate, ContactDraft, ContactSubmission, Field, FieldErrors};
pub use delivery::{DeliveryChannel, DeliveryError, HttpDelivery, SimulatedDelivery};
pub use flow::{AuditHook, AuditRecord, ContactFlow, LogAudit, SubmissionResult, SubmissionStatus};
