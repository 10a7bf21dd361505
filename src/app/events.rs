//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them — today that is the serial log.

use crate::error::Error;
use crate::fsm::StateId;
use crate::fsm::context::Outcome;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The controller has started (carries initial state and roster size).
    Started { state: StateId, members: usize },

    /// A non-idle outcome was decided this cycle.
    Decision(Outcome),

    /// The FSM transitioned between states.
    StateChanged { from: StateId, to: StateId },

    /// Startup aborted — peripheral bring-up or roster load failed.
    /// The cycle loop never runs after this.
    StartupFailed(Error),
}
