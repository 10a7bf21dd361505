//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (input sampling, display/LED/buzzer feedback, roster
//! storage, event sinks) implement these traits.  The
//! [`AppService`](super::service::AppService) consumes them via generics,
//! so the domain core never touches hardware directly.

use crate::access::roster::{Roster, RosterError};
use crate::fsm::context::CycleSnapshot;

// ───────────────────────────────────────────────────────────────
// Input port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this once per cycle to obtain the
/// button level, door contact level, and any presented tag.
pub trait InputPort {
    /// Sample all three inputs.  The snapshot is immutable for the cycle;
    /// the read has no side effect beyond consuming a presented tag from
    /// the reader's field.
    fn sample(&mut self) -> CycleSnapshot;
}

// ───────────────────────────────────────────────────────────────
// Feedback port (driven adapter: domain → operator)
// ───────────────────────────────────────────────────────────────

/// Which indicator LED a feedback sequence drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    /// Intrusion alert.
    Red,
    /// Access denied.
    Yellow,
    /// Door released / access granted.
    Green,
}

/// Write-side port: the domain renders outcome feedback through this.
///
/// `delay_ms` is a **blocking** hold — feedback sequences are part of the
/// cycle's synchronous work and run to completion once begun.
pub trait FeedbackPort {
    /// Put two lines of text on the operator display (16 columns each).
    fn show(&mut self, line1: &str, line2: &str);

    /// Blank the display.
    fn clear(&mut self);

    /// Switch an indicator LED on or off.
    fn indicator(&mut self, which: Indicator, on: bool);

    /// Start or stop the buzzer tone.
    fn buzzer(&mut self, on: bool);

    /// Hold the current feedback for `ms` milliseconds.
    fn delay_ms(&mut self, ms: u32);
}

// ───────────────────────────────────────────────────────────────
// Roster store port (driven adapter: persistent roster → domain)
// ───────────────────────────────────────────────────────────────

/// Loads the member roster from its backing source at startup.
///
/// Implementations must be fail-fast: a source that cannot be opened or
/// holds a malformed record returns the matching [`RosterError`] rather
/// than a partial roster.  The caller decides to halt; there is no
/// degraded mode.
pub trait RosterStore {
    fn load(&mut self) -> Result<Roster, RosterError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (serial log today;
/// anything else tomorrow).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
