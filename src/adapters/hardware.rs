//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the [`InputHub`] and all feedback drivers, exposing them through
//! [`InputPort`] and [`FeedbackPort`].  This is the only module in the
//! system that touches actual hardware.  On non-espidf targets, the
//! underlying drivers use cfg-gated simulation stubs.

use crate::app::ports::{FeedbackPort, Indicator, InputPort};
use crate::drivers::buzzer::Buzzer;
use crate::drivers::display::Lcd1602;
use crate::drivers::indicator::IndicatorLeds;
use crate::fsm::context::CycleSnapshot;
use crate::inputs::InputHub;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    hub: InputHub,
    lcd: Lcd1602,
    leds: IndicatorLeds,
    buzzer: Buzzer,
}

impl HardwareAdapter {
    pub fn new(hub: InputHub, lcd: Lcd1602, leds: IndicatorLeds, buzzer: Buzzer) -> Self {
        Self {
            hub,
            lcd,
            leds,
            buzzer,
        }
    }

    /// Direct display access for the boot sequence, before the service
    /// owns the feedback channel.
    pub fn display(&mut self) -> &mut Lcd1602 {
        &mut self.lcd
    }

    /// Quiesce every output (used before parking on a startup failure).
    pub fn silence(&mut self) {
        self.leds.all_off();
        self.buzzer.off();
    }
}

// ── InputPort implementation ──────────────────────────────────

impl InputPort for HardwareAdapter {
    fn sample(&mut self) -> CycleSnapshot {
        self.hub.sample()
    }
}

// ── FeedbackPort implementation ───────────────────────────────

impl FeedbackPort for HardwareAdapter {
    fn show(&mut self, line1: &str, line2: &str) {
        self.lcd.print(line1, line2);
    }

    fn clear(&mut self) {
        self.lcd.clear();
    }

    fn indicator(&mut self, which: Indicator, on: bool) {
        self.leds.set(which, on);
    }

    fn buzzer(&mut self, on: bool) {
        if on {
            self.buzzer.on();
        } else {
            self.buzzer.off();
        }
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }
}
