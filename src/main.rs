//! DoorGuard Firmware — Main Entry Point
//!
//! Hexagonal architecture around a fixed-period poll loop:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Adapters (outer ring)                    │
//! │                                                              │
//! │  HardwareAdapter        LogEventSink      SdRosterStore      │
//! │  (Input+Feedback)       (EventSink)       (RosterStore)      │
//! │                                                              │
//! │  ──────────────── Port Trait Boundary ───────────────────    │
//! │                                                              │
//! │  ┌──────────────────────────────────────────────────────┐    │
//! │  │             AppService (pure logic)                  │    │
//! │  │  FSM · Roster lookup · Feedback sequencing           │    │
//! │  └──────────────────────────────────────────────────────┘    │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! A roster load failure is fatal: the failure is shown on the panel and
//! the firmware parks in a watchdog-fed halt loop.  An access controller
//! must never cycle against an unknown or partial allow-list.
#![deny(unused_must_use)]

use std::thread;
use std::time::Duration;

use anyhow::Result;
use log::{error, info};

use doorguard::access::roster::RosterError;
use doorguard::adapters::hardware::HardwareAdapter;
use doorguard::adapters::log_sink::LogEventSink;
use doorguard::adapters::sd_store::SdRosterStore;
use doorguard::app::events::AppEvent;
use doorguard::app::ports::{EventSink, RosterStore};
use doorguard::app::service::AppService;
use doorguard::config::SystemConfig;
use doorguard::error::Error;
use doorguard::drivers::buzzer::Buzzer;
use doorguard::drivers::display::Lcd1602;
use doorguard::drivers::indicator::IndicatorLeds;
use doorguard::drivers::hw_init;
use doorguard::drivers::watchdog::Watchdog;
use doorguard::inputs::InputHub;
use doorguard::inputs::button::ReleaseButton;
use doorguard::inputs::door::DoorContact;
use doorguard::inputs::reader::TagReader;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("DoorGuard v{}", env!("CARGO_PKG_VERSION"));

    let config = SystemConfig::default();

    // ── 2. Hardware bring-up ──────────────────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        // Peripheral init failure is critical — log and halt.
        // The watchdog is not armed yet, so plain parking is safe.
        error!("{} — halting", Error::Init(e));
        #[allow(clippy::empty_loop)]
        loop {}
    }
    let watchdog = Watchdog::new();

    let mut lcd = Lcd1602::new();
    lcd.init();
    lcd.print("Begin", "Initialization");
    thread::sleep(Duration::from_millis(u64::from(config.boot_splash_ms)));

    let hub = InputHub::new(
        ReleaseButton::new(config.button_press_threshold),
        DoorContact::new(),
        TagReader::new(),
    );
    let mut hw = HardwareAdapter::new(
        hub,
        lcd,
        IndicatorLeds::new(),
        Buzzer::new(config.buzzer_tone_hz),
    );
    let mut sink = LogEventSink::new();

    // ── 3. Roster load (fail-fast) ────────────────────────────
    hw.display().print("SD Init", "");
    let mut store = SdRosterStore::new(config.roster_path.as_str());
    let roster = match store.load() {
        Ok(roster) => {
            hw.display().print("Opening JSON", "Successfull");
            thread::sleep(Duration::from_millis(u64::from(config.boot_splash_ms)));
            roster
        }
        Err(err) => {
            sink.emit(&AppEvent::StartupFailed(err.into()));
            match err {
                RosterError::Unavailable => hw.display().print("SD Init", "Failed"),
                RosterError::Malformed => hw.display().print("Deserialization", "failed"),
            }
            hw.silence();
            // Park forever: the cycle loop must never run without a
            // complete roster.  Keep the watchdog fed so the device
            // stays up showing the failure instead of boot-looping.
            loop {
                watchdog.feed();
                thread::sleep(Duration::from_millis(u64::from(
                    config.control_loop_interval_ms,
                )));
            }
        }
    };

    // ── 4. Construct and start the service ────────────────────
    let period = Duration::from_millis(u64::from(config.control_loop_interval_ms));
    let mut app = AppService::new(config, roster);
    app.start(&mut sink);
    hw.display().clear();

    info!("System ready. Entering poll loop.");

    // ── 5. Poll loop ──────────────────────────────────────────
    loop {
        app.tick(&mut hw, &mut sink);
        watchdog.feed();
        thread::sleep(period);
    }
}
