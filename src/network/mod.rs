//! Network layer - contact deliveries
//!
//! The Network actor receives submission commands and sends back results.

pub mod actor;
pub mod client;

pub use actor::NetworkActor;
