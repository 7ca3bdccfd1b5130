//! App actor - message loop processing UI events, network responses and
//! transition timers

use std::time::Duration;

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use crate::navigation::Transition;

/// App actor that processes UI events and network responses
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
    transition: Duration,
    settle_tx: mpsc::UnboundedSender<u64>,
    settle_rx: mpsc::UnboundedReceiver<u64>,
}

impl AppActor {
    pub fn new(
        state: AppState,
        transition: Duration,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        let (settle_tx, settle_rx) = mpsc::unbounded_channel();
        AppActor {
            state,
            network_tx,
            render_tx,
            transition,
            settle_tx,
            settle_rx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        // Send initial render state
        let _ = self.render_tx.send(self.state.to_render_state());

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(response) = net_rx.recv() => {
                    self.state.handle_response(response);
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(ticket) = self.settle_rx.recv() => {
                    self.state.settle_transition(ticket);
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                else => break,
            }
        }
    }

    /// Close the transition window once the page has had time to turn
    fn schedule_settle(&self, transition: Option<Transition>) {
        if let Some(transition) = transition {
            let settle_tx = self.settle_tx.clone();
            let delay = self.transition;
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                let _ = settle_tx.send(transition.ticket);
            });
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // Page navigation
            UiEvent::GoTo(page) => {
                let transition = self.state.go_to(page);
                self.schedule_settle(transition);
            }
            UiEvent::NextPage => {
                let transition = self.state.next_page();
                self.schedule_settle(transition);
            }
            UiEvent::PrevPage => {
                let transition = self.state.prev_page();
                self.schedule_settle(transition);
            }
            UiEvent::ScrollUp => self.state.scroll_up(),
            UiEvent::ScrollDown => self.state.scroll_down(),

            // Contact form
            UiEvent::NextField => self.state.next_field(),
            UiEvent::PrevField => self.state.prev_field(),
            UiEvent::StartEditing => self.state.start_editing(),
            UiEvent::StopEditing => self.state.stop_editing(),
            UiEvent::CharInput(c) => self.state.enter_char(c),
            UiEvent::Backspace => self.state.delete_char(),
            UiEvent::CursorLeft => self.state.move_cursor_left(),
            UiEvent::CursorRight => self.state.move_cursor_right(),
            UiEvent::CycleChoice => self.state.cycle_choice(),
            UiEvent::SubmitContact => {
                if let Some(cmd) = self.state.prepare_submission() {
                    let _ = self.network_tx.send(cmd);
                }
            }
            UiEvent::ResetContact => self.state.reset_contact(),

            // Data
            UiEvent::Revalidate => self.state.revalidate_current_page(),

            // Popups
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}
