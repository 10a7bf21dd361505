//! Door contact sensor.
//!
//! A reed switch with an external pull-up: the magnet holds the line low
//! while the door is closed, so a high level means the door is physically
//! open.  Pure level read, no debouncing — the contact is magnetic and
//! clean at the 20 Hz poll rate.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads the contact GPIO.
//! On host/test: reads from a static `AtomicBool` for injection.

use core::sync::atomic::{AtomicBool, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
#[cfg(target_os = "espidf")]
use crate::pins;

static SIM_DOOR_OPEN: AtomicBool = AtomicBool::new(false);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_door_open(open: bool) {
    SIM_DOOR_OPEN.store(open, Ordering::Relaxed);
}

pub struct DoorContact;

impl DoorContact {
    pub fn new() -> Self {
        Self
    }

    /// `true` while the door is physically open.
    pub fn is_open(&mut self) -> bool {
        self.read_level()
    }

    #[cfg(target_os = "espidf")]
    fn read_level(&self) -> bool {
        // Pull-up rest level low = closed; high = open.
        hw_init::gpio_read(pins::DOOR_CONTACT_GPIO)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_level(&self) -> bool {
        SIM_DOOR_OPEN.load(Ordering::Relaxed)
    }
}

impl Default for DoorContact {
    fn default() -> Self {
        Self::new()
    }
}
