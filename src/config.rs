//! System configuration parameters
//!
//! All tunable parameters for the DoorGuard controller.  The thresholds and
//! hold durations match the deployed board revision; change them here, not
//! at the call sites.

use serde::{Deserialize, Serialize};

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Release button ---
    /// Analog level above which the release button counts as pressed.
    /// The button divider rests near 0 and saturates near full scale, so
    /// anything in the top half of the range is a press.
    pub button_press_threshold: u16,
    /// Full-scale value of the button ADC range.
    pub button_adc_full_scale: u16,

    // --- Feedback holds ---
    /// How long the green indicator and welcome text stay up after a
    /// release or a granted tag (milliseconds).
    pub grant_hold_ms: u32,
    /// How long the buzzer and red/yellow indicator stay up on a denial
    /// or intrusion alert (milliseconds).
    pub alert_hold_ms: u32,
    /// Boot splash dwell between init phases (milliseconds).
    pub boot_splash_ms: u32,

    // --- Buzzer ---
    /// Buzzer tone frequency (Hz).
    pub buzzer_tone_hz: u32,

    // --- Timing ---
    /// Control loop poll period (milliseconds).
    pub control_loop_interval_ms: u32,

    // --- Roster ---
    /// Path of the member roster file on the mounted SD volume.
    pub roster_path: heapless::String<64>,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Release button
            button_press_threshold: 512,
            button_adc_full_scale: 1023,

            // Feedback holds
            grant_hold_ms: 2000,
            alert_hold_ms: 500,
            boot_splash_ms: 500,

            // Buzzer
            buzzer_tone_hz: 450,

            // Timing
            control_loop_interval_ms: 50, // 20 Hz poll

            // Roster
            roster_path: heapless::String::try_from("/sdcard/members.txt")
                .unwrap_or_default(),
        }
    }
}
