//! Integration tests: AppService → FSM → feedback rendering.
//!
//! Drives whole control cycles through recording mock ports, asserting
//! both the decision and the exact feedback sequence (text, indicator,
//! tone, hold) it renders.

use std::collections::VecDeque;

use doorguard::access::roster::Roster;
use doorguard::access::tag::TagUid;
use doorguard::app::events::AppEvent;
use doorguard::app::ports::{EventSink, FeedbackPort, Indicator, InputPort};
use doorguard::app::service::AppService;
use doorguard::config::SystemConfig;
use doorguard::fsm::StateId;
use doorguard::fsm::context::{CycleSnapshot, Outcome};

// ── Mock implementations ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
enum FbCall {
    Show { line1: String, line2: String },
    Clear,
    Indicator { which: Indicator, on: bool },
    Buzzer { on: bool },
    Delay { ms: u32 },
}

struct MockHw {
    queued: VecDeque<CycleSnapshot>,
    calls: Vec<FbCall>,
}

impl MockHw {
    fn new() -> Self {
        Self {
            queued: VecDeque::new(),
            calls: Vec::new(),
        }
    }

    fn queue(&mut self, snap: CycleSnapshot) {
        self.queued.push_back(snap);
    }
}

impl InputPort for MockHw {
    fn sample(&mut self) -> CycleSnapshot {
        self.queued.pop_front().unwrap_or_default()
    }
}

impl FeedbackPort for MockHw {
    fn show(&mut self, line1: &str, line2: &str) {
        self.calls.push(FbCall::Show {
            line1: line1.to_owned(),
            line2: line2.to_owned(),
        });
    }
    fn clear(&mut self) {
        self.calls.push(FbCall::Clear);
    }
    fn indicator(&mut self, which: Indicator, on: bool) {
        self.calls.push(FbCall::Indicator { which, on });
    }
    fn buzzer(&mut self, on: bool) {
        self.calls.push(FbCall::Buzzer { on });
    }
    fn delay_ms(&mut self, ms: u32) {
        // Record the hold instead of sleeping.
        self.calls.push(FbCall::Delay { ms });
    }
}

struct RecordingSink {
    events: Vec<AppEvent>,
}

impl RecordingSink {
    fn new() -> Self {
        Self { events: Vec::new() }
    }

    fn decisions(&self) -> Vec<Outcome> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::Decision(o) => Some(o.clone()),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Fixtures ──────────────────────────────────────────────────

const KNOWN_UID: [u8; 4] = [12, 34, 56, 78];

fn roster() -> Roster {
    Roster::from_bytes(br#"{"12 34 56 78":"Alice"};{"90 12 11 44":"Bob"};"#).unwrap()
}

fn make_app() -> (AppService, MockHw, RecordingSink) {
    let mut app = AppService::new(SystemConfig::default(), roster());
    let hw = MockHw::new();
    let mut sink = RecordingSink::new();
    app.start(&mut sink);
    (app, hw, sink)
}

fn snap(button: bool, door_open: bool, tag: Option<[u8; 4]>) -> CycleSnapshot {
    CycleSnapshot {
        button_pressed: button,
        door_open,
        tag: tag.map(TagUid),
    }
}

// ── Scenario: known tag at a closed door ──────────────────────

#[test]
fn known_tag_grants_access_with_welcome_feedback() {
    let (mut app, mut hw, mut sink) = make_app();
    hw.queue(snap(false, false, Some(KNOWN_UID)));
    app.tick(&mut hw, &mut sink);

    assert_eq!(app.state(), StateId::DoorAuthorized);
    assert_eq!(
        sink.decisions(),
        vec![Outcome::AccessGranted("Alice".to_owned())]
    );
    assert_eq!(
        hw.calls,
        vec![
            FbCall::Show {
                line1: "WELCOME".to_owned(),
                line2: "Alice".to_owned()
            },
            FbCall::Indicator {
                which: Indicator::Green,
                on: true
            },
            FbCall::Delay { ms: 2000 },
            FbCall::Indicator {
                which: Indicator::Green,
                on: false
            },
            FbCall::Clear,
        ]
    );
}

// ── Scenario: authorized opening is quiet, window persists ────

#[test]
fn door_opening_inside_window_raises_no_alert() {
    let (mut app, mut hw, mut sink) = make_app();
    hw.queue(snap(false, false, Some(KNOWN_UID)));
    app.tick(&mut hw, &mut sink);
    hw.calls.clear();

    // Door swings open during the armed window.
    hw.queue(snap(false, true, None));
    app.tick(&mut hw, &mut sink);

    assert_eq!(app.state(), StateId::DoorAuthorized);
    assert_eq!(sink.decisions().len(), 1, "no second decision");
    assert!(hw.calls.is_empty(), "idle cycles render nothing");
}

// ── Scenario: closing the door retires the window ─────────────

#[test]
fn door_closing_clears_window_and_rearms_detection() {
    let (mut app, mut hw, mut sink) = make_app();
    hw.queue(snap(false, false, Some(KNOWN_UID)));
    hw.queue(snap(false, true, None)); // authorized opening
    hw.queue(snap(false, false, None)); // door closed again
    for _ in 0..3 {
        app.tick(&mut hw, &mut sink);
    }
    assert_eq!(app.state(), StateId::Idle);

    // A fresh opening with no authorization now alerts.
    hw.calls.clear();
    hw.queue(snap(false, true, None));
    app.tick(&mut hw, &mut sink);
    assert_eq!(app.state(), StateId::Alarmed);
    assert_eq!(
        sink.decisions().last(),
        Some(&Outcome::IntrusionAlert)
    );
}

// ── Scenario: unknown tag, door closed → denial ───────────────

#[test]
fn unknown_tag_at_closed_door_is_denied_with_tone() {
    let (mut app, mut hw, mut sink) = make_app();
    hw.queue(snap(false, false, Some([1, 2, 3, 4])));
    app.tick(&mut hw, &mut sink);

    assert_eq!(app.state(), StateId::Idle);
    assert_eq!(sink.decisions(), vec![Outcome::AccessDenied]);
    assert_eq!(
        hw.calls,
        vec![
            FbCall::Show {
                line1: "ACCESS DENIED!!!".to_owned(),
                line2: String::new()
            },
            FbCall::Indicator {
                which: Indicator::Yellow,
                on: true
            },
            FbCall::Buzzer { on: true },
            FbCall::Delay { ms: 500 },
            FbCall::Buzzer { on: false },
            FbCall::Indicator {
                which: Indicator::Yellow,
                on: false
            },
            FbCall::Clear,
        ]
    );
}

// ── Scenario: unknown tag, door already open → intrusion ──────

#[test]
fn unknown_tag_at_open_door_is_intrusion_not_denial() {
    let (mut app, mut hw, mut sink) = make_app();
    hw.queue(snap(false, true, Some([1, 2, 3, 4])));
    app.tick(&mut hw, &mut sink);

    assert_eq!(app.state(), StateId::Alarmed);
    assert_eq!(sink.decisions(), vec![Outcome::IntrusionAlert]);
    assert!(
        hw.calls.contains(&FbCall::Indicator {
            which: Indicator::Red,
            on: true
        }),
        "intrusion drives the red indicator"
    );
    assert!(
        !hw.calls.iter().any(|c| matches!(
            c,
            FbCall::Indicator {
                which: Indicator::Yellow,
                ..
            }
        )),
        "no yellow on the intrusion path"
    );
}

// ── Scenario: unauthorized opening ────────────────────────────

#[test]
fn unauthorized_opening_raises_intruder_feedback() {
    let (mut app, mut hw, mut sink) = make_app();
    hw.queue(snap(false, true, None));
    app.tick(&mut hw, &mut sink);

    assert_eq!(app.state(), StateId::Alarmed);
    assert_eq!(sink.decisions(), vec![Outcome::IntrusionAlert]);
    assert_eq!(
        hw.calls,
        vec![
            FbCall::Show {
                line1: "INTRUDER!!".to_owned(),
                line2: String::new()
            },
            FbCall::Indicator {
                which: Indicator::Red,
                on: true
            },
            FbCall::Buzzer { on: true },
            FbCall::Delay { ms: 500 },
            FbCall::Buzzer { on: false },
            FbCall::Indicator {
                which: Indicator::Red,
                on: false
            },
            FbCall::Clear,
        ]
    );
}

#[test]
fn intrusion_re_raises_every_cycle_until_door_closes() {
    let (mut app, mut hw, mut sink) = make_app();
    for _ in 0..3 {
        hw.queue(snap(false, true, None));
    }
    hw.queue(snap(false, false, None));
    for _ in 0..4 {
        app.tick(&mut hw, &mut sink);
    }

    assert_eq!(
        sink.decisions(),
        vec![
            Outcome::IntrusionAlert,
            Outcome::IntrusionAlert,
            Outcome::IntrusionAlert,
        ],
        "one alert per open-door cycle, silence once closed"
    );
    assert_eq!(app.state(), StateId::Idle);
}

// ── Scenario: manual release button ───────────────────────────

#[test]
fn button_press_unlocks_with_green_hold() {
    let (mut app, mut hw, mut sink) = make_app();
    hw.queue(snap(true, false, None));
    app.tick(&mut hw, &mut sink);

    assert_eq!(app.state(), StateId::DoorAuthorized);
    assert_eq!(sink.decisions(), vec![Outcome::DoorReleasedByButton]);
    assert_eq!(
        hw.calls,
        vec![
            FbCall::Show {
                line1: "DOOR UNLOCKED!!!".to_owned(),
                line2: String::new()
            },
            FbCall::Indicator {
                which: Indicator::Green,
                on: true
            },
            FbCall::Delay { ms: 2000 },
            FbCall::Indicator {
                which: Indicator::Green,
                on: false
            },
            FbCall::Clear,
        ]
    );
}

#[test]
fn button_outranks_a_simultaneous_tag() {
    let (mut app, mut hw, mut sink) = make_app();
    hw.queue(snap(true, false, Some([1, 2, 3, 4])));
    app.tick(&mut hw, &mut sink);

    assert_eq!(sink.decisions(), vec![Outcome::DoorReleasedByButton]);
}

// ── State change events ───────────────────────────────────────

#[test]
fn state_changes_are_emitted_to_the_sink() {
    let (mut app, mut hw, mut sink) = make_app();
    hw.queue(snap(true, false, None));
    hw.queue(snap(false, false, None));
    app.tick(&mut hw, &mut sink);
    app.tick(&mut hw, &mut sink);

    let changes: Vec<(StateId, StateId)> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::StateChanged { from, to } => Some((*from, *to)),
            _ => None,
        })
        .collect();
    assert_eq!(
        changes,
        vec![
            (StateId::Idle, StateId::DoorAuthorized),
            (StateId::DoorAuthorized, StateId::Idle),
        ]
    );
}

// ── Quiet cycles ──────────────────────────────────────────────

#[test]
fn quiet_cycles_emit_nothing_and_render_nothing() {
    let (mut app, mut hw, mut sink) = make_app();
    for _ in 0..10 {
        hw.queue(snap(false, false, None));
    }
    for _ in 0..10 {
        app.tick(&mut hw, &mut sink);
    }
    assert_eq!(app.state(), StateId::Idle);
    assert!(sink.decisions().is_empty());
    assert!(hw.calls.is_empty());
    assert_eq!(app.tick_count(), 10);
}
