//! Synthetic cross-chain settlement: identifiers and latency.
//!
//! Nothing here touches a network. Hashes and message ids are random hex
//! strings with no cryptographic meaning.

use std::time::Duration;

use rand::Rng;
use xcm_yield_types::{TX_HASH_HEX_LEN, TX_HASH_PREFIX, XCM_MESSAGE_ID_HEX_LEN, XCM_MESSAGE_ID_PREFIX};

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Bounds of the simulated settlement latency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XcmDelayRange {
    pub min: Duration,
    pub max: Duration,
}

impl XcmDelayRange {
    pub fn from_millis(min_ms: u64, max_ms: u64) -> Self {
        Self {
            min: Duration::from_millis(min_ms),
            max: Duration::from_millis(max_ms.max(min_ms)),
        }
    }
}

impl Default for XcmDelayRange {
    fn default() -> Self {
        Self::from_millis(2_000, 4_000)
    }
}

/// Draw a settlement delay in `[min, max)`; a degenerate range yields `min`
pub fn xcm_delay<R: Rng + ?Sized>(rng: &mut R, range: XcmDelayRange) -> Duration {
    if range.max <= range.min {
        return range.min;
    }
    let min_ms = range.min.as_millis() as u64;
    let max_ms = range.max.as_millis() as u64;
    Duration::from_millis(rng.gen_range(min_ms..max_ms))
}

fn random_hex<R: Rng + ?Sized>(rng: &mut R, prefix: &str, len: usize) -> String {
    let mut out = String::with_capacity(prefix.len() + len);
    out.push_str(prefix);
    for _ in 0..len {
        out.push(HEX_DIGITS[rng.gen_range(0..16)] as char);
    }
    out
}

/// `0x` followed by 64 hex digits
pub fn generate_tx_hash<R: Rng + ?Sized>(rng: &mut R) -> String {
    random_hex(rng, TX_HASH_PREFIX, TX_HASH_HEX_LEN)
}

/// `xcm_` followed by 32 hex digits
pub fn generate_xcm_message_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    random_hex(rng, XCM_MESSAGE_ID_PREFIX, XCM_MESSAGE_ID_HEX_LEN)
}
