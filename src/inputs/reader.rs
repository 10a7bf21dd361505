//! Polled proximity-tag reader.
//!
//! Wraps the MFRC522 transceiver behind a one-call-per-cycle poll: if a
//! tag has entered the field since the last poll, its 4-byte UID is
//! returned exactly once.  The transport (SPI register traffic) lives in
//! [`hw_init`](crate::drivers::hw_init); this module owns only the
//! presence-then-read sequencing.
//!
//! There is no cross-cycle buffering: a tag that comes and goes between
//! polls is missed, matching the deployed device.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: presence check + UID read over SPI.
//! On host/test: a static atomic cell holds one injected tag, consumed by
//! the next poll.

use core::sync::atomic::{AtomicU64, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

use crate::access::tag::TagUid;

/// Presence flag bit for the simulation cell; the low 32 bits carry the
/// UID, so an all-zero UID still reads as present.
const SIM_PRESENT: u64 = 1 << 32;

static SIM_TAG: AtomicU64 = AtomicU64::new(0);

/// Place one tag in the simulated field.  The next poll consumes it.
#[cfg(not(target_os = "espidf"))]
pub fn sim_present_tag(uid: [u8; 4]) {
    let packed = SIM_PRESENT | u64::from(u32::from_be_bytes(uid));
    SIM_TAG.store(packed, Ordering::Release);
}

pub struct TagReader;

impl TagReader {
    pub fn new() -> Self {
        Self
    }

    /// Poll the field once.  Returns the UID of a newly presented tag, or
    /// `None` when the field is empty.
    pub fn poll(&mut self) -> Option<TagUid> {
        self.poll_hw()
    }

    #[cfg(target_os = "espidf")]
    fn poll_hw(&mut self) -> Option<TagUid> {
        if !hw_init::rfid_card_present() {
            return None;
        }
        hw_init::rfid_read_uid().map(TagUid)
    }

    #[cfg(not(target_os = "espidf"))]
    fn poll_hw(&mut self) -> Option<TagUid> {
        let packed = SIM_TAG.swap(0, Ordering::AcqRel);
        if packed & SIM_PRESENT == 0 {
            return None;
        }
        Some(TagUid(((packed & 0xFFFF_FFFF) as u32).to_be_bytes()))
    }
}

impl Default for TagReader {
    fn default() -> Self {
        Self::new()
    }
}
