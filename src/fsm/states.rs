//! Concrete state handler functions and table builder.
//!
//! Each state is defined by plain `fn` pointers — no closures, no dynamic
//! dispatch, no heap.  This is the classic embedded C FSM pattern
//! expressed in safe Rust.
//!
//! ```text
//!  IDLE ──[button | known tag]──▶ DOOR_AUTHORIZED
//!    ▲                                  │
//!    │                          [door seen closed]
//!    └──────────────────────────────────┘
//!
//!  IDLE ──[door open, no event]──▶ ALARMED ──[door closed]──▶ IDLE
//!                                     │
//!                             [button | known tag]
//!                                     ▼
//!                              DOOR_AUTHORIZED
//! ```
//!
//! Event priority within a cycle is fixed: button, then tag, then the
//! bare door level.  On a rejected tag, denied-vs-intruder is selected
//! solely by the door level at that instant.

use log::{info, warn};

use super::context::{FsmContext, Outcome};
use super::{StateDescriptor, StateId};

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        // Index 0 — Idle
        StateDescriptor {
            id: StateId::Idle,
            name: "Idle",
            on_enter: None,
            on_exit: None,
            on_update: idle_update,
        },
        // Index 1 — DoorAuthorized
        StateDescriptor {
            id: StateId::DoorAuthorized,
            name: "DoorAuthorized",
            on_enter: Some(door_authorized_enter),
            on_exit: Some(door_authorized_exit),
            on_update: door_authorized_update,
        },
        // Index 2 — Alarmed
        StateDescriptor {
            id: StateId::Alarmed,
            name: "Alarmed",
            on_enter: Some(alarmed_enter),
            on_exit: None,
            on_update: alarmed_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  Shared event evaluation (window inactive)
// ═══════════════════════════════════════════════════════════════════════════

/// Evaluate this cycle's events with the authorization window inactive.
/// Both `Idle` and `Alarmed` run the same rules; they differ only in
/// where "nothing happened" leaves the machine.
fn quiet_update(ctx: &mut FsmContext) -> Option<StateId> {
    if ctx.inputs.button_pressed {
        ctx.outcome = Outcome::DoorReleasedByButton;
        return Some(StateId::DoorAuthorized);
    }

    if let Some(scan) = &ctx.scan {
        return match &scan.member {
            Some(label) => {
                ctx.outcome = Outcome::AccessGranted(label.clone());
                Some(StateId::DoorAuthorized)
            }
            None if ctx.inputs.door_open => {
                // Unrecognised tag presented from inside an already-open
                // door: treat as intrusion, not plain denial.
                ctx.outcome = Outcome::IntrusionAlert;
                Some(StateId::Alarmed)
            }
            None => {
                ctx.outcome = Outcome::AccessDenied;
                Some(StateId::Idle)
            }
        };
    }

    if ctx.inputs.door_open {
        // Door open with no button press and no granted tag beforehand.
        ctx.outcome = Outcome::IntrusionAlert;
        return Some(StateId::Alarmed);
    }

    Some(StateId::Idle)
}

// ═══════════════════════════════════════════════════════════════════════════
//  IDLE state — door closed, window inactive
// ═══════════════════════════════════════════════════════════════════════════

fn idle_update(ctx: &mut FsmContext) -> Option<StateId> {
    match quiet_update(ctx) {
        Some(StateId::Idle) => None, // already here
        next => next,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  DOOR_AUTHORIZED state — the authorization window is open
// ═══════════════════════════════════════════════════════════════════════════

fn door_authorized_enter(ctx: &mut FsmContext) {
    info!(
        "DOOR_AUTHORIZED: window armed ({:?})",
        ctx.outcome
    );
}

fn door_authorized_exit(_ctx: &mut FsmContext) {
    info!("DOOR_AUTHORIZED: window cleared, door seen closed");
}

fn door_authorized_update(ctx: &mut FsmContext) -> Option<StateId> {
    // A closed door retires the window before new events are evaluated,
    // so a stale window never masks a fresh event this same cycle.  A
    // timeout alone never clears it.
    let window_cleared = !ctx.inputs.door_open;

    if ctx.inputs.button_pressed {
        // Held or re-pressed button re-arms the window every cycle.
        ctx.outcome = Outcome::DoorReleasedByButton;
        return None;
    }

    if let Some(scan) = &ctx.scan {
        return match &scan.member {
            Some(label) => {
                ctx.outcome = Outcome::AccessGranted(label.clone());
                None
            }
            None if ctx.inputs.door_open => {
                // Rejection keys on the door level alone: open door means
                // intruder, even mid-window.  The window itself survives —
                // the door has not been seen closed.
                ctx.outcome = Outcome::IntrusionAlert;
                None
            }
            None => {
                ctx.outcome = Outcome::AccessDenied;
                Some(StateId::Idle)
            }
        };
    }

    if window_cleared {
        Some(StateId::Idle)
    } else {
        // Authorized opening in progress — stay quiet.
        None
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  ALARMED state — unauthorized opening in progress
// ═══════════════════════════════════════════════════════════════════════════

fn alarmed_enter(ctx: &mut FsmContext) {
    warn!(
        "ALARMED: unauthorized opening (door_open={})",
        ctx.inputs.door_open
    );
}

fn alarmed_update(ctx: &mut FsmContext) -> Option<StateId> {
    // Same rules as Idle: the window is inactive here.  While the door
    // stays open with no authorizing event, the alert re-raises every
    // cycle; the moment the door closes the alarm resolves silently.
    match quiet_update(ctx) {
        Some(StateId::Alarmed) => None, // still alarmed
        next => next,
    }
}
