//! Fuzz target: roster record-stream parser
//!
//! Feeds arbitrary bytes through `Roster::from_bytes` and verifies:
//! - No panics under arbitrary input
//! - Failures are always one of the two typed `RosterError` variants
//! - A successful parse is idempotent (same bytes → same roster)
//!
//! cargo fuzz run fuzz_roster_parse

#![no_main]

use libfuzzer_sys::fuzz_target;

use doorguard::access::roster::{Roster, RosterError};

fuzz_target!(|data: &[u8]| {
    match Roster::from_bytes(data) {
        Ok(roster) => {
            let again = Roster::from_bytes(data).expect("idempotent parse");
            assert_eq!(roster, again);
        }
        Err(RosterError::Malformed | RosterError::Unavailable) => {}
    }
});
