//! # Gazette TUI
//!
//! A developer portfolio in the terminal, laid out like a morning newspaper.
//!
//! ## Features
//! - Six sections turned like pages, with a transition window per turn
//! - Section ribbon, masthead with date and edition number
//! - Contact ("Dispatch") form with client-side validation
//! - Delivery over HTTP, or simulated when no endpoint is configured
//! - Portfolio data from YAML, revalidated per cache tag
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime)

pub mod models;
pub mod storage;
pub mod ui;
pub mod config;
pub mod constants;
pub mod navigation;
pub mod contact;
pub mod messages;
pub mod app;
pub mod network;

// Re-export commonly used types
pub use models::{Developer, PortfolioData, Project};
pub use navigation::{Direction, PageId, PageNavigator, Transition};
pub use contact::{validate, ContactDraft, ContactFlow, Field, SubmissionResult, SubmissionStatus};
pub use storage::{CacheTag, Storage};
pub use config::Config;
pub use messages::{UiEvent, NetworkCommand, NetworkResponse, RenderState};
pub use app::{AppState, AppActor};
pub use network::NetworkActor;
