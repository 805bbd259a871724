//! # Attack Simulations
//!
//! Adversarial use of the signature cache:
//!
//! - **Forged flood**: invalid signatures must never occupy cache slots
//! - **Pinning**: re-submitting one's own valid signatures must not keep
//!   them resident (no recency refresh)
//! - **Steering**: which entry gets evicted must vary across instances and
//!   draws, never settle on one predictable slot

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use qc_10_sig_cache::{CachingVerifier, SigCache, SigCacheError};
    use rand::RngCore;
    use std::collections::HashSet;
    use std::sync::Arc;

    /// Random (sig_hash, der-ish signature, compressed pubkey) bytes.
    fn random_encoded() -> ([u8; 32], Vec<u8>, [u8; 33]) {
        let mut rng = rand::thread_rng();
        let mut sig_hash = [0u8; 32];
        let mut signature = vec![0u8; 71];
        let mut pubkey = [0u8; 33];
        rng.fill_bytes(&mut sig_hash);
        rng.fill_bytes(&mut signature);
        rng.fill_bytes(&mut pubkey[1..]);
        pubkey[0] = 0x02;
        (sig_hash, signature, pubkey)
    }

    #[test]
    fn test_forged_flood_never_enters_cache() {
        init_tracing();
        let cache = Arc::new(SigCache::new(1_000).unwrap());
        let verifier = CachingVerifier::new(Arc::clone(&cache));

        let forged: Vec<_> = (0..200).map(forged_check).collect();
        let outcome = verifier.verify_batch(&forged);

        assert_eq!(outcome.failed, 200);
        assert!(outcome
            .results
            .iter()
            .all(|r| r == &Err(SigCacheError::InvalidSignature)));
        assert!(cache.is_empty());
        assert_eq!(cache.metrics().insertions, 0);
    }

    #[test]
    fn test_resubmission_does_not_pin_attacker_entries() {
        const CAPACITY: usize = 100;
        let cache = SigCache::new(CAPACITY).unwrap();

        let attacker: Vec<_> = (0..CAPACITY).map(|_| random_encoded()).collect();
        for (h, s, k) in &attacker {
            cache.add_encoded(h, s, k);
        }

        // Hammer the same entries; nothing is refreshed or re-counted.
        for _ in 0..10 {
            for (h, s, k) in &attacker {
                cache.add_encoded(h, s, k);
            }
        }
        let metrics = cache.metrics();
        assert_eq!(metrics.insertions, CAPACITY as u64);
        assert_eq!(metrics.duplicate_insertions, 10 * CAPACITY as u64);
        assert_eq!(metrics.evictions, 0);

        // The first honest insertion can only evict an attacker entry.
        let honest: Vec<_> = (0..CAPACITY).map(|_| random_encoded()).collect();
        for (h, s, k) in &honest {
            cache.add_encoded(h, s, k);
        }

        let attacker_survivors = attacker
            .iter()
            .filter(|(h, s, k)| cache.exists_encoded(h, s, k))
            .count();
        assert!(attacker_survivors < CAPACITY);
        assert_eq!(cache.len(), CAPACITY);
    }

    #[test]
    fn test_eviction_victim_is_not_predictable() {
        const CAPACITY: usize = 16;
        let entries: Vec<_> = (0..=CAPACITY).map(|_| random_encoded()).collect();
        let mut victims = HashSet::new();

        // Same inputs, same insertion order; only the instance changes.
        for _ in 0..200 {
            let cache = SigCache::new(CAPACITY).unwrap();
            for (h, s, k) in &entries {
                cache.add_encoded(h, s, k);
            }

            let evicted: Vec<usize> = entries[..CAPACITY]
                .iter()
                .enumerate()
                .filter(|(_, (h, s, k))| !cache.exists_encoded(h, s, k))
                .map(|(i, _)| i)
                .collect();
            assert_eq!(evicted.len(), 1);
            victims.insert(evicted[0]);
        }

        assert!(
            victims.len() >= 4,
            "eviction concentrated on {} slot(s)",
            victims.len()
        );
    }
}
