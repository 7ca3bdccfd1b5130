//! Network messages - communication between App and Network layers

use crate::contact::{ContactDraft, SubmissionResult};

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Validate and deliver a contact dispatch
    SubmitContact {
        id: u64,
        draft: ContactDraft,
    },

    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    /// A contact submission finished, one way or the other
    ContactResult {
        id: u64,
        result: SubmissionResult,
        time_ms: u64,
    },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::ContactResult { id, .. } => *id,
        }
    }
}
