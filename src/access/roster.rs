//! Member roster — the allow-list of authorised tag keys.
//!
//! The roster source is a stream of JSON objects, each mapping canonical
//! tag keys to member display labels and each terminated by a `;` sentinel
//! byte:
//!
//! ```text
//! {"12 34 56 78":"Alice"};{"90 12 11 44":"Bob"};
//! ```
//!
//! Records are accumulated byte-by-byte and parsed when their sentinel
//! arrives.  Parsing is fail-fast: one malformed record aborts the whole
//! load.  An access controller must never start with a partial roster —
//! silent under-provisioning would lock out authorised members without
//! anyone noticing.
//!
//! Bytes after the final sentinel are never parsed; a record only exists
//! once its sentinel arrives.  This keeps trailing newlines harmless.

use core::fmt;
use std::collections::{BTreeMap, HashMap};
use std::io::{self, Read};

use log::{debug, info};

use super::tag::TagKey;

/// Record terminator in the roster source stream.
const RECORD_SENTINEL: u8 = b';';

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a roster failed to load.  Both variants are fatal to startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterError {
    /// The source could not be opened or read.
    Unavailable,
    /// A fully accumulated record failed structural parsing.
    Malformed,
}

impl fmt::Display for RosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "roster source unavailable"),
            Self::Malformed => write!(f, "roster record malformed"),
        }
    }
}

impl From<io::Error> for RosterError {
    fn from(_: io::Error) -> Self {
        Self::Unavailable
    }
}

// ---------------------------------------------------------------------------
// Roster
// ---------------------------------------------------------------------------

/// In-memory mapping from canonical tag key to member display label.
///
/// Populated once at startup and read-only for the rest of the process
/// lifetime; there is no runtime enrollment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    members: HashMap<String, String>,
}

impl Roster {
    /// Load a roster from a record stream.
    ///
    /// Returns [`RosterError::Unavailable`] if the stream cannot be read
    /// and [`RosterError::Malformed`] if any terminated record fails to
    /// parse as a key→label object.
    pub fn from_reader(mut source: impl Read) -> Result<Self, RosterError> {
        let mut raw = Vec::new();
        source.read_to_end(&mut raw)?;
        Self::from_bytes(&raw)
    }

    /// Parse an already-buffered record stream.
    pub fn from_bytes(raw: &[u8]) -> Result<Self, RosterError> {
        let mut members: HashMap<String, String> = HashMap::new();
        let mut record: Vec<u8> = Vec::new();

        for &byte in raw {
            if byte == RECORD_SENTINEL {
                // BTreeMap rather than HashMap: serde's HashMap impl is
                // std-gated and this crate runs serde in alloc-only mode.
                let parsed: BTreeMap<String, String> =
                    serde_json::from_slice(&record).map_err(|e| {
                        debug!("roster record rejected: {e}");
                        RosterError::Malformed
                    })?;
                members.extend(parsed);
                record.clear();
            } else {
                record.push(byte);
            }
        }

        info!("roster loaded: {} member(s)", members.len());
        Ok(Self { members })
    }

    /// Look up the display label for a tag key.  `None` means the tag is
    /// not authorised — a normal outcome, not an error.
    pub fn lookup(&self, key: &TagKey) -> Option<&str> {
        self.members.get(key.as_str()).map(String::as_str)
    }

    /// Number of authorised members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
