//! Peripheral drivers: display, indicators, buzzer, watchdog, and the
//! one-shot hardware bring-up shims.

pub mod buzzer;
pub mod display;
pub mod hw_init;
pub mod indicator;
pub mod watchdog;
