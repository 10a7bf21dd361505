//! Piezo buzzer driver.
//!
//! One LEDC channel running a 50 % square wave at the configured tone
//! frequency.  The tone is a fixed alert pitch, not a melody engine.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the LEDC channel via hw_init.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;

pub struct Buzzer {
    tone_hz: u32,
    sounding: bool,
}

impl Buzzer {
    pub fn new(tone_hz: u32) -> Self {
        Self {
            tone_hz,
            sounding: false,
        }
    }

    pub fn on(&mut self) {
        hw_init::buzzer_on(self.tone_hz);
        self.sounding = true;
    }

    pub fn off(&mut self) {
        hw_init::buzzer_off();
        self.sounding = false;
    }

    pub fn is_sounding(&self) -> bool {
        self.sounding
    }
}
