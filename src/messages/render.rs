//! Render state - data structure sent from App layer to UI for rendering

use crate::contact::{ContactDraft, Field, SubmissionResult};
use crate::messages::ui_events::InputMode;
use crate::models::PortfolioData;
use crate::navigation::{Direction, PageId};
use crate::storage::sample_portfolio;

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    // Navigation
    pub page: PageId,
    pub previous_page: Option<PageId>,
    pub direction: Direction,
    pub nav_pending: bool,
    pub position: String,
    pub has_next: bool,
    pub has_prev: bool,
    pub scroll: u16,

    // Printed content
    pub portfolio: PortfolioData,

    // Contact form
    pub draft: ContactDraft,
    pub focused_field: Field,
    pub input_mode: InputMode,
    pub cursor_position: usize,
    pub result: SubmissionResult,
    pub optimistic_sent: bool,
    pub is_submitting: bool,

    // Status bar
    pub notice: Option<String>,

    // Popups
    pub show_help: bool,
}

impl RenderState {
    /// Whether the success panel replaces the form
    pub fn show_sent_panel(&self) -> bool {
        self.optimistic_sent || self.result.is_success()
    }

    /// Client-side message for a field, if any
    pub fn field_error(&self, field: Field) -> Option<&str> {
        self.result
            .field_errors
            .as_ref()
            .and_then(|errors| errors.get(&field))
            .map(|s| s.as_str())
    }
}

impl Default for RenderState {
    fn default() -> Self {
        RenderState {
            page: PageId::Front,
            previous_page: None,
            direction: Direction::Forward,
            nav_pending: false,
            position: String::from("1/6"),
            has_next: true,
            has_prev: false,
            scroll: 0,
            portfolio: sample_portfolio(),
            draft: ContactDraft::default(),
            focused_field: Field::Name,
            input_mode: InputMode::Normal,
            cursor_position: 0,
            result: SubmissionResult::idle(),
            optimistic_sent: false,
            is_submitting: false,
            notice: None,
            show_help: false,
        }
    }
}
