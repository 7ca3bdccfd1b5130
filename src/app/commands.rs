//! Command handlers - business logic for processing UI events

use crate::app::AppState;
use crate::contact::{validate, SubmissionResult};
use crate::messages::ui_events::InputMode;
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::navigation::{PageId, Transition};
use crate::storage::CacheTag;

/// Data slices printed on each page
fn page_tags(page: PageId) -> &'static [CacheTag] {
    match page {
        PageId::Front => &[CacheTag::Developer, CacheTag::Projects, CacheTag::Articles],
        PageId::About => &[CacheTag::Developer, CacheTag::Skills],
        PageId::Projects => &[CacheTag::Projects],
        PageId::Experience => &[CacheTag::Experience],
        PageId::Writing => &[CacheTag::Articles],
        PageId::Contact => &[CacheTag::Developer],
    }
}

impl AppState {
    // ========================
    // Navigation
    // ========================

    pub fn go_to(&mut self, page: PageId) -> Option<Transition> {
        let transition = self.navigator.go_to(page);
        if transition.is_some() {
            self.on_page_changed();
        }
        transition
    }

    pub fn next_page(&mut self) -> Option<Transition> {
        let transition = self.navigator.go_next();
        if transition.is_some() {
            self.on_page_changed();
        }
        transition
    }

    pub fn prev_page(&mut self) -> Option<Transition> {
        let transition = self.navigator.go_prev();
        if transition.is_some() {
            self.on_page_changed();
        }
        transition
    }

    pub fn settle_transition(&mut self, ticket: u64) {
        self.navigator.settle(ticket);
    }

    fn on_page_changed(&mut self) {
        self.scroll = 0;
        self.input_mode = InputMode::Normal;
        self.notice = None;
    }

    // ========================
    // Scrolling
    // ========================

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    // ========================
    // Contact form fields
    // ========================

    pub fn next_field(&mut self) {
        self.focus(self.focused_field.next());
    }

    pub fn prev_field(&mut self) {
        self.focus(self.focused_field.prev());
    }

    fn focus(&mut self, field: crate::contact::Field) {
        self.focused_field = field;
        if field.is_choice() {
            self.input_mode = InputMode::Normal;
        }
        self.cursor_position = self.current_input().len();
    }

    pub fn cycle_choice(&mut self) {
        if !self.is_submitting() && !self.sent_panel_showing() {
            self.draft.cycle_choice(self.focused_field);
        }
    }

    // ========================
    // Input editing
    // ========================

    pub fn start_editing(&mut self) {
        if self.focused_field.is_choice() || self.is_submitting() || self.sent_panel_showing() {
            return;
        }
        self.input_mode = InputMode::Editing;
        self.cursor_position = self.current_input().len();
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn move_cursor_left(&mut self) {
        let input = self.current_input();
        if self.cursor_position > 0 {
            let new_pos = input[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.cursor_position = new_pos;
        }
    }

    pub fn move_cursor_right(&mut self) {
        let input = self.current_input();
        if self.cursor_position < input.len() {
            let new_pos = input[self.cursor_position..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_position + i)
                .unwrap_or(input.len());
            self.cursor_position = new_pos;
        }
    }

    pub fn enter_char(&mut self, c: char) {
        if self.sent_panel_showing() {
            return;
        }
        let cursor_pos = self.cursor_position;
        if let Some(input) = self.draft.text_mut(self.focused_field) {
            if cursor_pos <= input.len() {
                input.insert(cursor_pos, c);
                self.cursor_position = cursor_pos + c.len_utf8();
            }
        }
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position == 0 || self.sent_panel_showing() {
            return;
        }
        let cursor_pos = self.cursor_position;
        if let Some(input) = self.draft.text_mut(self.focused_field) {
            let prev_pos = input[..cursor_pos]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            input.remove(prev_pos);
            self.cursor_position = prev_pos;
        }
    }

    // ========================
    // Submission
    // ========================

    /// Check the draft locally and, if it passes, hand it to the Network layer.
    /// The success panel shows immediately; the real result confirms or
    /// rolls it back.
    pub fn prepare_submission(&mut self) -> Option<NetworkCommand> {
        if self.is_submitting() || self.optimistic_sent {
            return None;
        }
        self.input_mode = InputMode::Normal;

        if let Err(field_errors) = validate(&self.draft) {
            self.result = SubmissionResult::invalid(field_errors);
            return None;
        }

        let id = self.next_id();
        self.pending_submission_id = Some(id);
        self.optimistic_sent = true;
        self.notice = Some(String::from("Transmitting..."));

        Some(NetworkCommand::SubmitContact {
            id,
            draft: self.draft.clone(),
        })
    }

    /// Start over after a dispatch went through; an unsent draft is kept
    pub fn reset_contact(&mut self) {
        if self.is_submitting() || !self.sent_panel_showing() {
            return;
        }
        self.draft = Default::default();
        self.result = SubmissionResult::idle();
        self.optimistic_sent = false;
        self.focused_field = crate::contact::Field::Name;
        self.cursor_position = 0;
        self.input_mode = InputMode::Normal;
    }

    // ========================
    // Response handling
    // ========================

    pub fn handle_response(&mut self, response: NetworkResponse) {
        let is_for_pending = self.pending_submission_id == Some(response.id());

        match response {
            NetworkResponse::ContactResult { result, time_ms, .. } => {
                if !is_for_pending {
                    return;
                }
                tracing::info!(status = ?result.status, time_ms, "Contact result received");

                self.pending_submission_id = None;
                self.optimistic_sent = result.is_success();
                self.notice = if result.is_success() {
                    Some(format!("Dispatch delivered in {} ms", time_ms))
                } else {
                    None
                };
                if result.is_success() {
                    self.draft = Default::default();
                    self.cursor_position = 0;
                }
                self.result = result;
            }
        }
    }

    // ========================
    // Data
    // ========================

    /// Refresh the data slices printed on the current page
    pub fn revalidate_current_page(&mut self) {
        let tags = page_tags(self.navigator.current());
        let mut reloaded = Vec::new();
        let mut stale = Vec::new();

        for tag in tags {
            if self.storage.revalidate(tag.as_str()) {
                if self.storage.is_stale(*tag) {
                    stale.push(tag.as_str());
                } else {
                    reloaded.push(tag.as_str());
                }
            }
        }

        self.notice = Some(if stale.is_empty() {
            format!("Revalidated: {}", reloaded.join(", "))
        } else {
            format!("Could not reload {}; showing cached edition", stale.join(", "))
        });
    }

    // ========================
    // Help popup
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::{Field, SubmissionStatus};
    use crate::navigation::Direction;
    use crate::storage::Storage;
    use tempfile::tempdir;

    fn state() -> AppState {
        let dir = tempdir().unwrap();
        AppState::new(Storage::new(dir.path().join("missing.yaml")))
    }

    fn type_text(state: &mut AppState, field: Field, text: &str) {
        state.focused_field = field;
        state.start_editing();
        for c in text.chars() {
            state.enter_char(c);
        }
        state.stop_editing();
    }

    fn fill_valid(state: &mut AppState) {
        type_text(state, Field::Name, "Jane Doe");
        type_text(state, Field::Email, "jane@example.com");
        type_text(state, Field::Subject, "Project enquiry");
        type_text(state, Field::Message, &"x".repeat(25));
    }

    #[test]
    fn test_page_change_resets_scroll() {
        let mut state = state();
        state.scroll_down();
        state.scroll_down();
        let t = state.next_page().unwrap();
        assert_eq!(t.direction, Direction::Forward);
        assert_eq!(state.scroll, 0);
        assert!(state.to_render_state().nav_pending);

        state.settle_transition(t.ticket);
        assert!(!state.to_render_state().nav_pending);
    }

    #[test]
    fn test_same_page_keeps_scroll() {
        let mut state = state();
        state.scroll_down();
        assert!(state.go_to(PageId::Front).is_none());
        assert_eq!(state.scroll, 1);
    }

    #[test]
    fn test_editing_inserts_at_cursor() {
        let mut state = state();
        type_text(&mut state, Field::Name, "Jne");
        state.start_editing();
        state.move_cursor_left();
        state.move_cursor_left();
        state.enter_char('a');
        assert_eq!(state.draft.name, "Jane");
        state.delete_char();
        assert_eq!(state.draft.name, "Jne");
    }

    #[test]
    fn test_choice_fields_do_not_enter_editing() {
        let mut state = state();
        state.focused_field = Field::Timeline;
        state.start_editing();
        assert_eq!(state.input_mode, InputMode::Normal);
        state.cycle_choice();
        assert_eq!(state.draft.timeline.as_deref(), Some("ASAP"));
    }

    #[test]
    fn test_invalid_draft_is_caught_before_network() {
        let mut state = state();
        type_text(&mut state, Field::Name, "A");

        assert!(state.prepare_submission().is_none());
        assert_eq!(state.result.status, SubmissionStatus::Error);
        assert!(!state.optimistic_sent);
        assert!(state.result.field_errors.as_ref().unwrap().contains_key(&Field::Email));
    }

    #[test]
    fn test_optimistic_flag_rolls_back_on_error() {
        let mut state = state();
        fill_valid(&mut state);

        let cmd = state.prepare_submission().unwrap();
        let NetworkCommand::SubmitContact { id, draft } = cmd else {
            panic!("expected a submission");
        };
        assert_eq!(draft.name, "Jane Doe");
        assert!(state.optimistic_sent);
        assert!(state.to_render_state().show_sent_panel());

        state.handle_response(NetworkResponse::ContactResult {
            id,
            result: SubmissionResult::transmission_failed(),
            time_ms: 5,
        });
        assert!(!state.optimistic_sent);
        assert!(state.result.is_delivery_error());
        assert!(!state.to_render_state().show_sent_panel());
        // The form comes back with what was typed
        assert_eq!(state.draft.name, "Jane Doe");
    }

    #[test]
    fn test_success_keeps_sent_panel_and_reset_clears() {
        let mut state = state();
        fill_valid(&mut state);
        let Some(NetworkCommand::SubmitContact { id, .. }) = state.prepare_submission() else {
            panic!("expected a submission");
        };
        assert!(state.prepare_submission().is_none());

        state.handle_response(NetworkResponse::ContactResult {
            id,
            result: SubmissionResult::received(),
            time_ms: 5,
        });
        assert!(state.optimistic_sent);
        assert!(state.result.is_success());
        assert!(state.draft.name.is_empty());

        state.reset_contact();
        assert!(!state.optimistic_sent);
        assert_eq!(state.result.status, SubmissionStatus::Idle);
    }

    #[test]
    fn test_send_another_keeps_unsent_draft() {
        let mut state = state();
        type_text(&mut state, Field::Name, "Jane Doe");

        state.reset_contact();
        assert_eq!(state.draft.name, "Jane Doe");
        assert_eq!(state.cursor_position, "Jane Doe".len());
    }

    #[test]
    fn test_sent_panel_blocks_form_input() {
        let mut state = state();
        state.optimistic_sent = true;
        state.result = SubmissionResult::received();

        state.focused_field = Field::Name;
        state.start_editing();
        assert_eq!(state.input_mode, InputMode::Normal);
        state.enter_char('z');
        assert!(state.draft.name.is_empty());

        state.focused_field = Field::Budget;
        state.cycle_choice();
        assert!(state.draft.budget.is_none());
    }

    #[test]
    fn test_stale_response_is_ignored() {
        let mut state = state();
        fill_valid(&mut state);
        state.prepare_submission();

        state.handle_response(NetworkResponse::ContactResult {
            id: 999,
            result: SubmissionResult::transmission_failed(),
            time_ms: 1,
        });
        assert!(state.optimistic_sent);
        assert!(state.is_submitting());
    }

    #[test]
    fn test_revalidate_without_file_reports_cached() {
        let mut state = state();
        state.go_to(PageId::Projects);
        state.revalidate_current_page();
        let notice = state.notice.clone().unwrap();
        assert!(notice.contains("projects"));
        assert!(notice.starts_with("Could not reload"));
    }
}
