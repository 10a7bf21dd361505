//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the logger (UART / USB-CDC in production).  A future network adapter
//! would implement the same trait.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::fsm::context::Outcome;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { state, members } => {
                info!("START | initial_state={:?} | roster_members={}", state, members);
            }
            AppEvent::Decision(outcome) => match outcome {
                Outcome::Idle => {}
                Outcome::DoorReleasedByButton => info!("DECISION | door released by button"),
                Outcome::AccessGranted(label) => info!("DECISION | access granted to {label}"),
                Outcome::AccessDenied => info!("DECISION | access denied"),
                Outcome::IntrusionAlert => warn!("DECISION | INTRUSION ALERT"),
            },
            AppEvent::StateChanged { from, to } => {
                info!("STATE | {:?} -> {:?}", from, to);
            }
            AppEvent::StartupFailed(err) => {
                warn!("STARTUP | {err} — cycle loop will not run");
            }
        }
    }
}
