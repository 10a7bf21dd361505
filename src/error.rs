//! Unified error types for the DoorGuard firmware.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! startup path's error handling uniform.  The cycle loop itself has no
//! error kind: a denied or unrecognised tag is a normal outcome, and the
//! controller is total over its inputs.

use core::fmt;

use crate::access::roster::RosterError;
use crate::drivers::hw_init::HwInitError;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
/// All of them are startup-time failures; none can occur once the cycle
/// loop is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The member roster could not be loaded.
    Roster(RosterError),
    /// Peripheral initialisation failed.
    Init(HwInitError),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Roster(e) => write!(f, "roster: {e}"),
            Self::Init(e) => write!(f, "init: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl From<RosterError> for Error {
    fn from(e: RosterError) -> Self {
        Self::Roster(e)
    }
}

impl From<HwInitError> for Error {
    fn from(e: HwInitError) -> Self {
        Self::Init(e)
    }
}

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
