//! Turn-taking session - State machine and async service
//!
//! This module is split into:
//! - [`state`]: the pure state machine (events in, actions out)
//! - [`service`]: the async service applying actions against the speech ports

mod service;
mod state;

pub use service::SessionService;
pub use state::{SessionAction, SessionEvent, SessionPhase, SessionSettings, VoiceSession};
