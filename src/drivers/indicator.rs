//! Discrete indicator LED driver (red / yellow / green).
//!
//! Three plain GPIO outputs, active HIGH.  A shadow of the current levels
//! is kept for tests and telemetry.

use crate::app::ports::Indicator;
use crate::drivers::hw_init;
use crate::pins;

pub struct IndicatorLeds {
    red: bool,
    yellow: bool,
    green: bool,
}

impl IndicatorLeds {
    pub fn new() -> Self {
        Self {
            red: false,
            yellow: false,
            green: false,
        }
    }

    pub fn set(&mut self, which: Indicator, on: bool) {
        let (pin, shadow) = match which {
            Indicator::Red => (pins::LED_RED_GPIO, &mut self.red),
            Indicator::Yellow => (pins::LED_YELLOW_GPIO, &mut self.yellow),
            Indicator::Green => (pins::LED_GREEN_GPIO, &mut self.green),
        };
        hw_init::gpio_write(pin, on);
        *shadow = on;
    }

    pub fn all_off(&mut self) {
        self.set(Indicator::Red, false);
        self.set(Indicator::Yellow, false);
        self.set(Indicator::Green, false);
    }

    pub fn is_on(&self, which: Indicator) -> bool {
        match which {
            Indicator::Red => self.red,
            Indicator::Yellow => self.yellow,
            Indicator::Green => self.green,
        }
    }
}

impl Default for IndicatorLeds {
    fn default() -> Self {
        Self::new()
    }
}
