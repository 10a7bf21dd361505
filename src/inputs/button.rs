//! Manual door-release button.
//!
//! The button feeds a resistive divider read through an ADC channel: the
//! level rests near 0 and saturates toward full scale while pressed, so
//! "pressed" is simply a level strictly above a fixed threshold in the top
//! half of the range.  The threshold is configuration, not code — it was
//! tuned against the deployed divider and must not be re-derived.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads the button ADC channel via the oneshot API.
//! On host/test: reads from a static `AtomicU16` for injection.

use core::sync::atomic::{AtomicU16, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
#[cfg(target_os = "espidf")]
use crate::pins;

static SIM_BUTTON_LEVEL: AtomicU16 = AtomicU16::new(0);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_button_level(raw: u16) {
    SIM_BUTTON_LEVEL.store(raw, Ordering::Relaxed);
}

/// One sampled button reading.
#[derive(Debug, Clone, Copy)]
pub struct ButtonReading {
    /// Raw analog level.
    pub level: u16,
    /// Level was strictly above the press threshold.
    pub pressed: bool,
}

pub struct ReleaseButton {
    threshold: u16,
}

impl ReleaseButton {
    pub fn new(threshold: u16) -> Self {
        Self { threshold }
    }

    /// Sample the analog level once and classify it.
    pub fn read(&mut self) -> ButtonReading {
        let level = self.read_level();
        ButtonReading {
            level,
            pressed: level > self.threshold,
        }
    }

    #[cfg(target_os = "espidf")]
    fn read_level(&self) -> u16 {
        hw_init::adc1_read(pins::BUTTON_ADC_CHANNEL)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_level(&self) -> u16 {
        SIM_BUTTON_LEVEL.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One sequential test: the simulation cell is a process-wide static,
    // so interleaved parallel tests would race on it.
    #[test]
    fn press_classification_is_strictly_above_threshold() {
        let mut btn = ReleaseButton::new(512);

        sim_set_button_level(0);
        assert!(!btn.read().pressed, "resting level is not a press");

        sim_set_button_level(512);
        assert!(!btn.read().pressed, "the threshold itself is not a press");

        sim_set_button_level(513);
        assert!(btn.read().pressed);

        sim_set_button_level(1023);
        assert!(btn.read().pressed, "full scale is a press");
    }
}
