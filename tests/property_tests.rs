//! Property tests for the access decision core.
//!
//! Runs on host (x86_64) only — proptest is not available for ESP32
//! targets.  On ESP32, these tests are compiled out.

#![cfg(not(target_os = "espidf"))]

use std::collections::{BTreeMap, VecDeque};

use proptest::prelude::*;

use doorguard::access::roster::Roster;
use doorguard::access::tag::{TagKey, TagUid};
use doorguard::app::events::AppEvent;
use doorguard::app::ports::{EventSink, FeedbackPort, Indicator, InputPort};
use doorguard::app::service::AppService;
use doorguard::config::SystemConfig;
use doorguard::fsm::StateId;
use doorguard::fsm::context::{CycleSnapshot, Outcome};

// ── Minimal ports for property runs ───────────────────────────

struct ScriptedHw {
    queued: VecDeque<CycleSnapshot>,
}

impl InputPort for ScriptedHw {
    fn sample(&mut self) -> CycleSnapshot {
        self.queued.pop_front().unwrap_or_default()
    }
}

impl FeedbackPort for ScriptedHw {
    fn show(&mut self, _line1: &str, _line2: &str) {}
    fn clear(&mut self) {}
    fn indicator(&mut self, _which: Indicator, _on: bool) {}
    fn buzzer(&mut self, _on: bool) {}
    fn delay_ms(&mut self, _ms: u32) {}
}

struct CollectingSink {
    decisions: Vec<Outcome>,
}

impl EventSink for CollectingSink {
    fn emit(&mut self, event: &AppEvent) {
        if let AppEvent::Decision(o) = event {
            self.decisions.push(o.clone());
        }
    }
}

// ── Input generation ──────────────────────────────────────────

const KNOWN_UID: [u8; 4] = [12, 34, 56, 78];
const UNKNOWN_UID: [u8; 4] = [200, 1, 2, 3];

#[derive(Debug, Clone, Copy)]
enum TagCase {
    None,
    Known,
    Unknown,
}

fn arb_cycle() -> impl Strategy<Value = (bool, bool, TagCase)> {
    (
        any::<bool>(),
        any::<bool>(),
        prop_oneof![
            Just(TagCase::None),
            Just(TagCase::Known),
            Just(TagCase::Unknown)
        ],
    )
}

fn to_snapshot(cycle: (bool, bool, TagCase)) -> CycleSnapshot {
    let (button_pressed, door_open, tag) = cycle;
    CycleSnapshot {
        button_pressed,
        door_open,
        tag: match tag {
            TagCase::None => None,
            TagCase::Known => Some(TagUid(KNOWN_UID)),
            TagCase::Unknown => Some(TagUid(UNKNOWN_UID)),
        },
    }
}

fn test_roster() -> Roster {
    Roster::from_bytes(br#"{"12 34 56 78":"Alice"};"#).unwrap()
}

fn run_sequence(cycles: &[(bool, bool, TagCase)]) -> (Vec<Outcome>, Vec<StateId>) {
    let mut app = AppService::new(SystemConfig::default(), test_roster());
    let mut hw = ScriptedHw {
        queued: cycles.iter().copied().map(to_snapshot).collect(),
    };
    let mut sink = CollectingSink {
        decisions: Vec::new(),
    };
    app.start(&mut sink);

    let mut outcomes = Vec::new();
    let mut states = Vec::new();
    for _ in cycles {
        let before = sink.decisions.len();
        app.tick(&mut hw, &mut sink);
        // Exactly one decision per cycle, counting quiet cycles as Idle.
        let outcome = if sink.decisions.len() > before {
            assert_eq!(sink.decisions.len(), before + 1);
            sink.decisions[before].clone()
        } else {
            Outcome::Idle
        };
        outcomes.push(outcome);
        states.push(app.state());
    }
    (outcomes, states)
}

// ── Tag key derivation ────────────────────────────────────────

proptest! {
    /// Key derivation is deterministic and injective over 4-byte UIDs.
    #[test]
    fn key_derivation_deterministic(uid in any::<[u8; 4]>()) {
        let a = TagUid(uid);
        prop_assert_eq!(a.key(), a.key());
    }

    #[test]
    fn distinct_uids_never_collide(a in any::<[u8; 4]>(), b in any::<[u8; 4]>()) {
        prop_assume!(a != b);
        prop_assert_ne!(TagUid(a).key(), TagUid(b).key());
    }
}

// ── Controller totality and invariants ────────────────────────

proptest! {
    /// The controller is total and deterministic: any input sequence
    /// produces exactly one outcome per cycle, twice over identically.
    #[test]
    fn controller_is_total_and_deterministic(
        cycles in proptest::collection::vec(arb_cycle(), 1..60),
    ) {
        let (first_outcomes, first_states) = run_sequence(&cycles);
        let (second_outcomes, second_states) = run_sequence(&cycles);
        prop_assert_eq!(first_outcomes, second_outcomes);
        prop_assert_eq!(first_states, second_states);
    }

    /// The quiet-path intrusion alert never fires while the
    /// authorization window is active, and fires exactly when the door
    /// is open with no event and no window.
    #[test]
    fn unauthorized_opening_invariant(
        cycles in proptest::collection::vec(arb_cycle(), 1..60),
    ) {
        let (outcomes, states) = run_sequence(&cycles);

        let mut prev_state = StateId::Idle;
        for (i, &(button, door_open, tag)) in cycles.iter().enumerate() {
            let quiet = !button && matches!(tag, TagCase::None);
            if quiet {
                let window_active = prev_state == StateId::DoorAuthorized;
                let expect_alert = door_open && !window_active;
                let alerted = outcomes[i] == Outcome::IntrusionAlert;
                prop_assert_eq!(
                    alerted, expect_alert,
                    "cycle {}: door_open={} window_active={}",
                    i, door_open, window_active
                );
            }
            prev_state = states[i];
        }
    }

    /// On a rejected tag, denial and intrusion are mutually exclusive
    /// and selected solely by the door level at that instant.
    #[test]
    fn rejection_tie_break_tracks_door_level(
        cycles in proptest::collection::vec(arb_cycle(), 1..60),
    ) {
        let (outcomes, _) = run_sequence(&cycles);

        for (i, &(button, door_open, tag)) in cycles.iter().enumerate() {
            if !button && matches!(tag, TagCase::Unknown) {
                let expected = if door_open {
                    Outcome::IntrusionAlert
                } else {
                    Outcome::AccessDenied
                };
                prop_assert_eq!(&outcomes[i], &expected, "cycle {}", i);
            }
        }
    }

    /// Button presses always win and always arm the window; known tags
    /// do the same when no button is pressed.
    #[test]
    fn authorizing_events_always_arm_the_window(
        cycles in proptest::collection::vec(arb_cycle(), 1..60),
    ) {
        let (outcomes, states) = run_sequence(&cycles);

        for (i, &(button, _door, tag)) in cycles.iter().enumerate() {
            if button {
                prop_assert_eq!(&outcomes[i], &Outcome::DoorReleasedByButton);
                prop_assert_eq!(states[i], StateId::DoorAuthorized);
            } else if matches!(tag, TagCase::Known) {
                prop_assert_eq!(
                    &outcomes[i],
                    &Outcome::AccessGranted("Alice".to_owned())
                );
                prop_assert_eq!(states[i], StateId::DoorAuthorized);
            }
        }
    }
}

// ── Roster loading ────────────────────────────────────────────

fn arb_member() -> impl Strategy<Value = ([u8; 4], String)> {
    (any::<[u8; 4]>(), "[A-Za-z ]{1,24}")
}

proptest! {
    /// Loading a well-formed source is idempotent and faithful: every
    /// written member is found, one record per member or all in one.
    #[test]
    fn roster_load_is_idempotent_and_faithful(
        members in proptest::collection::vec(arb_member(), 0..12),
    ) {
        let map: BTreeMap<String, String> = members
            .iter()
            .map(|(uid, label)| (TagUid(*uid).key().as_str().to_owned(), label.clone()))
            .collect();

        // One record per member.
        let mut stream = Vec::new();
        for (key, label) in &map {
            let record: BTreeMap<&str, &str> =
                BTreeMap::from([(key.as_str(), label.as_str())]);
            stream.extend_from_slice(serde_json::to_string(&record).unwrap().as_bytes());
            stream.push(b';');
        }

        let first = Roster::from_bytes(&stream).unwrap();
        let second = Roster::from_bytes(&stream).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.len(), map.len());

        for (key, label) in &map {
            prop_assert_eq!(
                first.lookup(&TagKey::from(key.as_str())),
                Some(label.as_str())
            );
        }
    }

    /// Arbitrary byte streams never panic the parser: they load or they
    /// fail with a typed error.
    #[test]
    fn roster_parser_is_panic_free(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
        let _ = Roster::from_bytes(&bytes);
    }
}
