//! # Randomized Eviction
//!
//! Victim selection for a full cache.
//!
//! A fresh 256-bit value is drawn from a secure random source for every
//! eviction. The first resident key (in iteration order) that is
//! lexicographically greater than the draw is evicted. If none is greater,
//! the first key encountered is evicted instead.
//!
//! ## Security Notes
//!
//! - Resident keys are salted with a secret nonce and the draw is independent
//!   per call, so an attacker can neither predict which entry goes nor force
//!   out a chosen victim.
//! - The fallback pick does not have to be uniform. Iteration order is not
//!   relied upon as a source of randomness.
//! - Deliberately not recency based: LRU would let an attacker keep their own
//!   entries hot while legitimate ones starve.

use super::key::{SigCacheKey, SIG_CACHE_KEY_LEN};

/// Random draw compared against resident keys.
pub type EvictionDraw = [u8; SIG_CACHE_KEY_LEN];

/// Pick the entry to evict.
///
/// Returns `None` only when `entries` is empty.
pub fn select_victim<'a, I>(entries: I, draw: &EvictionDraw) -> Option<SigCacheKey>
where
    I: IntoIterator<Item = &'a SigCacheKey>,
{
    let mut fallback = None;
    for key in entries {
        if key.as_bytes() > draw {
            return Some(*key);
        }
        fallback.get_or_insert(*key);
    }
    fallback
}
