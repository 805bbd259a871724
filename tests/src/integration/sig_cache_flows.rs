//! # Signature Cache Flows
//!
//! Exercises one shared cache the way a validating node does:
//!
//! 1. **Mempool admission → block validation**: signatures verified on
//!    mempool entry are cache hits when the block arrives
//! 2. **Readers vs. writer**: many validator threads call `exists` while a
//!    writer fills and evicts
//! 3. **Writers vs. writers**: concurrent `add`s never break the capacity bound

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use qc_10_sig_cache::{
        CachingVerifier, SigCache, SigCacheConfig, SignatureCheck, VerificationOutcome,
    };
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{mpsc, Arc};
    use std::thread;

    fn add(cache: &SigCache, check: &SignatureCheck) {
        cache.add(&check.sig_hash, &check.signature, &check.public_key);
    }

    fn exists(cache: &SigCache, check: &SignatureCheck) -> bool {
        cache.exists(&check.sig_hash, &check.signature, &check.public_key)
    }

    // =========================================================================
    // MEMPOOL → BLOCK VALIDATION
    // =========================================================================

    #[test]
    fn test_block_validation_reuses_mempool_verifications() {
        init_tracing();
        let cache = Arc::new(SigCache::new(10_000).unwrap());
        let mempool = CachingVerifier::new(Arc::clone(&cache));
        let block_validator = CachingVerifier::new(Arc::clone(&cache));

        let mempool_txs = signed_checks(200);
        for check in &mempool_txs {
            assert_eq!(
                mempool.verify(&check.sig_hash, &check.signature, &check.public_key),
                Ok(VerificationOutcome::Verified)
            );
        }

        // Block = every mempool tx plus a few never relayed to us
        let mut block = mempool_txs.clone();
        block.extend((1_000..1_020).map(signed_check));

        let outcome = block_validator.verify_batch(&block);

        assert!(outcome.all_valid);
        assert_eq!(outcome.cache_hits, 200);
        assert_eq!(outcome.verified, 20);
        assert_eq!(cache.len(), 220);
    }

    #[test]
    fn test_config_driven_cache() {
        let config = SigCacheConfig::default().with_max_entries(32);
        let cache = SigCache::from_config(&config).unwrap();

        for check in signed_checks(64) {
            add(&cache, &check);
        }

        assert_eq!(cache.len(), 32);
        assert_eq!(cache.metrics().evictions, 32);
    }

    // =========================================================================
    // READERS VS. WRITER
    // =========================================================================

    /// Readers race a writer that keeps the cache full. An entry a reader saw
    /// evicted must never reappear, and never-added entries are never found.
    #[test]
    fn test_concurrent_readers_and_evicting_writer() {
        init_tracing();
        const CAPACITY: usize = 256;

        let cache = Arc::new(SigCache::new(CAPACITY).unwrap());
        let resident = signed_checks(CAPACITY as u64);
        let never_added: Vec<_> = (5_000..5_032).map(signed_check).collect();
        let incoming: Vec<_> = (10_000..10_512).map(signed_check).collect();

        for check in &resident {
            add(&cache, check);
        }
        assert_eq!(cache.len(), CAPACITY);

        let writer_done = AtomicBool::new(false);

        thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    let mut evicted = vec![false; resident.len()];
                    loop {
                        let finished = writer_done.load(Ordering::Acquire);

                        for check in &never_added {
                            assert!(!exists(&cache, check));
                        }
                        for (i, check) in resident.iter().enumerate() {
                            let present = exists(&cache, check);
                            assert!(
                                !(evicted[i] && present),
                                "evicted entry reappeared"
                            );
                            evicted[i] |= !present;
                        }

                        if finished {
                            break;
                        }
                    }
                });
            }

            scope.spawn(|| {
                for check in &incoming {
                    add(&cache, check);
                    assert!(cache.len() <= CAPACITY);
                }
                writer_done.store(true, Ordering::Release);
            });
        });

        assert_eq!(cache.len(), CAPACITY);
        let metrics = cache.metrics();
        assert_eq!(metrics.evictions, incoming.len() as u64);
        assert_eq!(metrics.dropped_insertions, 0);
    }

    /// Once `add` returns, every subsequent `exists` on any thread sees it.
    #[test]
    fn test_read_after_write_visibility() {
        let cache = Arc::new(SigCache::new(1_000).unwrap());
        let checks = Arc::new(signed_checks(100));
        let (tx, rx) = mpsc::channel::<usize>();

        let writer = {
            let cache = Arc::clone(&cache);
            let checks = Arc::clone(&checks);
            thread::spawn(move || {
                for (i, check) in checks.iter().enumerate() {
                    add(&cache, check);
                    tx.send(i).unwrap();
                }
            })
        };

        for i in rx {
            assert!(exists(&cache, &checks[i]));
        }
        writer.join().unwrap();
    }

    // =========================================================================
    // WRITERS VS. WRITERS
    // =========================================================================

    #[test]
    fn test_concurrent_writers_respect_capacity() {
        const CAPACITY: usize = 64;
        const PER_THREAD: u64 = 50;

        let cache = SigCache::new(CAPACITY).unwrap();
        let batches: Vec<_> = (0..8u64)
            .map(|t| {
                (t * PER_THREAD..(t + 1) * PER_THREAD)
                    .map(signed_check)
                    .collect::<Vec<_>>()
            })
            .collect();

        thread::scope(|scope| {
            for batch in &batches {
                let cache = &cache;
                scope.spawn(move || {
                    for check in batch {
                        add(cache, check);
                        assert!(cache.len() <= CAPACITY);
                    }
                });
            }
        });

        assert_eq!(cache.len(), CAPACITY);
        let metrics = cache.metrics();
        assert_eq!(metrics.insertions, 8 * PER_THREAD);
        assert_eq!(metrics.evictions, 8 * PER_THREAD - CAPACITY as u64);
    }
}
