//! Shared mutable context threaded through every FSM handler.
//!
//! `FsmContext` is the single struct that state handlers read from and
//! write to.  It carries this cycle's input snapshot, the roster-resolved
//! tag scan, the outcome the handlers decide on, timing, and configuration.
//! Think of it as the "blackboard" in a blackboard architecture.

use crate::access::tag::{TagKey, TagUid};
use crate::config::SystemConfig;

// ---------------------------------------------------------------------------
// Cycle snapshot (read-only to state handlers; written by the input hub)
// ---------------------------------------------------------------------------

/// The three physical inputs, sampled once per cycle and immutable within
/// it.  A tag or button event not observed during its cycle is simply
/// missed; there is no cross-cycle buffering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleSnapshot {
    /// Release button analog level was above the press threshold.
    pub button_pressed: bool,
    /// Door contact reports the door physically open.
    pub door_open: bool,
    /// UID of a tag presented to the reader this cycle, if any.
    pub tag: Option<TagUid>,
}

/// A presented tag after roster resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagScan {
    pub uid: TagUid,
    pub key: TagKey,
    /// Display label when the key is on the roster; `None` for an
    /// unrecognised tag.
    pub member: Option<String>,
}

// ---------------------------------------------------------------------------
// Outcome (written by state handlers; rendered by the service)
// ---------------------------------------------------------------------------

/// The single decision result produced by the controller each cycle.
/// `Idle` cycles produce no output side effect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Outcome {
    #[default]
    Idle,
    /// Manual release: the door may open without raising an alarm.
    DoorReleasedByButton,
    /// A roster member presented their tag; carries the display label.
    AccessGranted(String),
    /// Unrecognised tag while the door is closed.
    AccessDenied,
    /// Unauthorized opening, or an unrecognised tag while the door is
    /// already open.
    IntrusionAlert,
}

// ---------------------------------------------------------------------------
// FsmContext
// ---------------------------------------------------------------------------

/// The shared context passed to every state handler function.
pub struct FsmContext {
    // -- Timing --
    /// Ticks elapsed since the current state was entered.
    pub ticks_in_state: u64,
    /// Monotonic total tick count.
    pub total_ticks: u64,

    // -- Cycle data --
    /// This cycle's raw input snapshot.  Written before each FSM tick.
    pub inputs: CycleSnapshot,
    /// Roster resolution of `inputs.tag`, if a tag was presented.
    pub scan: Option<TagScan>,

    // -- Decision output --
    /// The outcome the state handlers settled on this tick.
    pub outcome: Outcome,

    // -- Configuration --
    pub config: SystemConfig,
}

impl FsmContext {
    /// Create a new context with the given configuration.
    pub fn new(config: SystemConfig) -> Self {
        Self {
            ticks_in_state: 0,
            total_ticks: 0,
            inputs: CycleSnapshot::default(),
            scan: None,
            outcome: Outcome::Idle,
            config,
        }
    }

    /// Install this cycle's inputs and reset the outcome, immediately
    /// before the FSM tick.
    pub fn begin_cycle(&mut self, inputs: CycleSnapshot, scan: Option<TagScan>) {
        self.inputs = inputs;
        self.scan = scan;
        self.outcome = Outcome::Idle;
    }
}
