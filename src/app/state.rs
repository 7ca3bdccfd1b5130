//! App state - pure data structure with no I/O logic

use crate::contact::{ContactDraft, Field, SubmissionResult};
use crate::messages::ui_events::InputMode;
use crate::messages::RenderState;
use crate::navigation::PageNavigator;
use crate::storage::Storage;

/// Main application state - pure data, no I/O
pub struct AppState {
    // Page navigation
    pub navigator: PageNavigator,
    pub scroll: u16,

    // Portfolio data (read-only, cached)
    pub storage: Storage,

    // Contact form
    pub draft: ContactDraft,
    pub focused_field: Field,
    pub input_mode: InputMode,
    pub cursor_position: usize,

    // Submission
    pub result: SubmissionResult,
    pub optimistic_sent: bool,
    pub next_request_id: u64,
    pub pending_submission_id: Option<u64>,

    // Status bar
    pub notice: Option<String>,

    // Popups
    pub show_help: bool,
}

impl AppState {
    pub fn new(storage: Storage) -> Self {
        AppState {
            navigator: PageNavigator::new(),
            scroll: 0,
            storage,
            draft: ContactDraft::default(),
            focused_field: Field::Name,
            input_mode: InputMode::Normal,
            cursor_position: 0,
            result: SubmissionResult::idle(),
            optimistic_sent: false,
            next_request_id: 1,
            pending_submission_id: None,
            notice: None,
            show_help: false,
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    pub fn is_submitting(&self) -> bool {
        self.pending_submission_id.is_some()
    }

    /// The form is hidden behind the success panel
    pub fn sent_panel_showing(&self) -> bool {
        self.optimistic_sent || self.result.is_success()
    }

    /// Text of the focused field, empty for choice fields
    pub fn current_input(&self) -> &str {
        if self.focused_field.is_choice() {
            ""
        } else {
            self.draft.value(self.focused_field).unwrap_or("")
        }
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            page: self.navigator.current(),
            previous_page: self.navigator.previous(),
            direction: self.navigator.direction(),
            nav_pending: self.navigator.is_pending(),
            position: self.navigator.position(),
            has_next: self.navigator.has_next(),
            has_prev: self.navigator.has_prev(),
            scroll: self.scroll,
            portfolio: self.storage.data().clone(),
            draft: self.draft.clone(),
            focused_field: self.focused_field,
            input_mode: self.input_mode,
            cursor_position: self.cursor_position,
            result: self.result.clone(),
            optimistic_sent: self.optimistic_sent,
            is_submitting: self.is_submitting(),
            notice: self.notice.clone(),
            show_help: self.show_help,
        }
    }
}
