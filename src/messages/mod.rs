//! Messages passed between the UI, App and Network actors.
//!
//! Key presses become `UiEvent`s, the App answers with `RenderState`
//! snapshots, and contact deliveries travel as `NetworkCommand` /
//! `NetworkResponse` pairs.

pub mod ui_events;
pub mod network;
pub mod render;

pub use ui_events::{InputMode, UiEvent};
pub use network::{NetworkCommand, NetworkResponse};
pub use render::RenderState;
