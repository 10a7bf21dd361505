//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the FSM, the shared context, and the member
//! roster.  It exposes a clean, hardware-agnostic API.  All I/O flows
//! through port traits injected at call sites, making the entire service
//! testable with mock adapters.
//!
//! ```text
//!   InputPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                 │       AppService        │
//! FeedbackPort ◀──│  FSM · Roster lookup    │
//!                 └────────────────────────┘
//! ```

use log::{debug, info};

use crate::access::roster::Roster;
use crate::config::SystemConfig;
use crate::fsm::context::{CycleSnapshot, FsmContext, Outcome, TagScan};
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, StateId};

use super::events::AppEvent;
use super::ports::{EventSink, FeedbackPort, Indicator, InputPort};

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService {
    fsm: Fsm,
    ctx: FsmContext,
    roster: Roster,
    tick_count: u64,
}

impl AppService {
    /// Construct the service from configuration and a fully loaded
    /// roster.
    ///
    /// There is deliberately no way to build the service without a
    /// roster: a load failure must keep the cycle loop from ever
    /// starting, never run it against a partial allow-list.
    ///
    /// Does **not** start the FSM — call [`start`](Self::start) next.
    pub fn new(config: SystemConfig, roster: Roster) -> Self {
        let ctx = FsmContext::new(config);
        let fsm = Fsm::new(build_state_table(), StateId::Idle);
        Self {
            fsm,
            ctx,
            roster,
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Start the FSM in its initial state (Idle).
    pub fn start(&mut self, sink: &mut impl EventSink) {
        self.fsm.start(&mut self.ctx);
        sink.emit(&AppEvent::Started {
            state: self.fsm.current_state(),
            members: self.roster.len(),
        });
        info!(
            "AppService started in {:?} with {} roster member(s)",
            self.fsm.current_state(),
            self.roster.len()
        );
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one full control cycle: sample → resolve → decide → render.
    ///
    /// The `hw` parameter satisfies **both** [`InputPort`] and
    /// [`FeedbackPort`] — this avoids a double mutable borrow while
    /// keeping the port boundary explicit.
    pub fn tick(&mut self, hw: &mut (impl InputPort + FeedbackPort), sink: &mut impl EventSink) {
        self.tick_count += 1;
        let prev_state = self.fsm.current_state();

        // 1. Sample inputs via InputPort
        let snapshot = hw.sample();

        // 2. Resolve a presented tag against the roster
        let scan = self.resolve_tag(&snapshot);

        // 3. FSM tick (pure decision logic)
        self.ctx.begin_cycle(snapshot, scan);
        self.fsm.tick(&mut self.ctx);

        // 4. Render feedback and emit the decision, if any
        let outcome = self.ctx.outcome.clone();
        if outcome != Outcome::Idle {
            sink.emit(&AppEvent::Decision(outcome.clone()));
            self.render_feedback(&outcome, hw);
        }

        // 5. Emit state change if the FSM moved
        let new_state = self.fsm.current_state();
        if new_state != prev_state {
            sink.emit(&AppEvent::StateChanged {
                from: prev_state,
                to: new_state,
            });
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current FSM state.  `DoorAuthorized` means the authorization
    /// window is active.
    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }

    /// Total control ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// This cycle's decision (Idle between events).
    pub fn last_outcome(&self) -> &Outcome {
        &self.ctx.outcome
    }

    // ── Internal ──────────────────────────────────────────────

    /// Derive the canonical key for a presented tag and look it up.
    fn resolve_tag(&self, snapshot: &CycleSnapshot) -> Option<TagScan> {
        let uid = snapshot.tag?;
        let key = uid.key();
        let member = self.roster.lookup(&key).map(str::to_owned);
        debug!(
            "tag scan: uid=[{uid}] member={}",
            member.as_deref().unwrap_or("<none>")
        );
        Some(TagScan { uid, key, member })
    }

    /// Translate an outcome into the display / indicator / buzzer
    /// sequence.  Holds block inside the cycle; once a sequence begins it
    /// runs to completion.
    fn render_feedback(&self, outcome: &Outcome, hw: &mut impl FeedbackPort) {
        let cfg = &self.ctx.config;
        match outcome {
            Outcome::Idle => {}

            Outcome::DoorReleasedByButton => {
                hw.show("DOOR UNLOCKED!!!", "");
                hw.indicator(Indicator::Green, true);
                hw.delay_ms(cfg.grant_hold_ms);
                hw.indicator(Indicator::Green, false);
                hw.clear();
            }

            Outcome::AccessGranted(label) => {
                hw.show("WELCOME", label);
                hw.indicator(Indicator::Green, true);
                hw.delay_ms(cfg.grant_hold_ms);
                hw.indicator(Indicator::Green, false);
                hw.clear();
            }

            Outcome::AccessDenied => {
                hw.show("ACCESS DENIED!!!", "");
                hw.indicator(Indicator::Yellow, true);
                hw.buzzer(true);
                hw.delay_ms(cfg.alert_hold_ms);
                hw.buzzer(false);
                hw.indicator(Indicator::Yellow, false);
                hw.clear();
            }

            Outcome::IntrusionAlert => {
                hw.show("INTRUDER!!", "");
                hw.indicator(Indicator::Red, true);
                hw.buzzer(true);
                hw.delay_ms(cfg.alert_hold_ms);
                hw.buzzer(false);
                hw.indicator(Indicator::Red, false);
                hw.clear();
            }
        }
    }
}
