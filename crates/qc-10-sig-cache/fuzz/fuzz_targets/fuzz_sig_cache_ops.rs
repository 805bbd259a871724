//! Fuzz target for signature cache operations.
//!
//! Drives arbitrary add/exists sequences against a small cache and checks
//! the capacity bound and insert-then-exists after every step.
//!
//! ## Running
//!
//! ```bash
//! cd crates/qc-10-sig-cache
//! cargo +nightly fuzz run fuzz_sig_cache_ops
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use qc_10_sig_cache::SigCache;

/// One cache operation over raw encoded inputs.
#[derive(Debug, arbitrary::Arbitrary)]
enum Op {
    Add {
        sig_hash: [u8; 32],
        signature: Vec<u8>,
        pubkey: [u8; 33],
    },
    Exists {
        sig_hash: [u8; 32],
        signature: Vec<u8>,
        pubkey: [u8; 33],
    },
}

#[derive(Debug, arbitrary::Arbitrary)]
struct FuzzInput {
    capacity: u8,
    ops: Vec<Op>,
}

fuzz_target!(|input: FuzzInput| {
    let max_entries = usize::from(input.capacity % 16);
    let Ok(cache) = SigCache::new(max_entries) else {
        return;
    };

    for op in &input.ops {
        match op {
            Op::Add {
                sig_hash,
                signature,
                pubkey,
            } => {
                cache.add_encoded(sig_hash, signature, pubkey);
                // Must hold regardless of input
                assert!(cache.len() <= max_entries);
                assert_eq!(
                    cache.exists_encoded(sig_hash, signature, pubkey),
                    max_entries > 0
                );
            }
            Op::Exists {
                sig_hash,
                signature,
                pubkey,
            } => {
                let found = cache.exists_encoded(sig_hash, signature, pubkey);
                if max_entries == 0 {
                    assert!(!found);
                }
            }
        }
    }
});
