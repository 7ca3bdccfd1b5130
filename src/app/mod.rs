//! App layer - owns the navigator and the contact form
//!
//! The App actor receives UI events, network responses and transition
//! timers, updates state, and emits network commands and render state.

pub mod state;
pub mod actor;
pub mod commands;

pub use state::AppState;
pub use actor::AppActor;
