//! Input subsystem — individual input drivers and the aggregating [`InputHub`].
//!
//! The hub owns the release button, the door contact, and the tag reader,
//! and reduces them to one [`CycleSnapshot`] per control cycle.  Threshold
//! policy lives here (in the drivers), not in the decision core.

pub mod button;
pub mod door;
pub mod reader;

use log::trace;

use crate::fsm::context::CycleSnapshot;
use button::ReleaseButton;
use door::DoorContact;
use reader::TagReader;

/// Aggregates all three inputs and produces a unified snapshot.
pub struct InputHub {
    pub button: ReleaseButton,
    pub door: DoorContact,
    pub reader: TagReader,
}

impl InputHub {
    /// Construct a new hub.  Pass in pre-built drivers (built in main
    /// where peripheral ownership is established).
    pub fn new(button: ReleaseButton, door: DoorContact, reader: TagReader) -> Self {
        Self {
            button,
            door,
            reader,
        }
    }

    /// Sample every input once and return a unified snapshot.
    ///
    /// No side effects beyond the reads themselves; a presented tag is
    /// consumed from the reader's field, so it appears in exactly one
    /// snapshot.
    pub fn sample(&mut self) -> CycleSnapshot {
        let button = self.button.read();
        let door_open = self.door.is_open();
        let tag = self.reader.poll();

        trace!(
            "inputs: button={} ({}) door_open={} tag={}",
            button.pressed,
            button.level,
            door_open,
            tag.map_or_else(|| "-".to_owned(), |uid| uid.to_string()),
        );

        CycleSnapshot {
            button_pressed: button.pressed,
            door_open,
            tag,
        }
    }
}
