//! # Signature Cache Store
//!
//! Bounded set of salted keys for signatures already proven valid, with
//! randomized eviction once full.
//!
//! ## Concurrency
//!
//! One reader/writer lock per instance guards the set:
//! - `exists` takes the read lock. Readers never block each other, only a
//!   writer holding the lock.
//! - `add` takes the write lock for key derivation, the eviction draw, the
//!   victim scan and the insertion.
//!
//! No operation performs I/O or yields. Instances share nothing.

use super::config::SigCacheConfig;
use super::errors::SigCacheError;
use super::eviction::{select_victim, EvictionDraw};
use super::key::{compress, CompressedPubKey, Hash, Nonce, SigCacheKey, SIG_CACHE_KEY_LEN};
use crate::adapters::entropy::OsEntropy;
use crate::metrics::{SigCacheMetrics, SigCacheMetricsSnapshot};
use crate::ports::inbound::SigCacheApi;
use crate::ports::outbound::EntropySource;
use k256::ecdsa::{Signature, VerifyingKey};
use parking_lot::RwLock;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace, warn};
use zeroize::Zeroizing;

/// Signature verification cache with a randomized eviction policy.
///
/// Only signatures the caller has verified are added. Two purposes:
/// - Mitigates a complexity-DoS where crafted transactions force a node to
///   re-verify the same expensive signatures over and over.
/// - Lets block validation skip signatures already checked on mempool entry.
///
/// Share one instance across validator threads with `Arc<SigCache>`.
pub struct SigCache {
    valid_sigs: RwLock<HashSet<SigCacheKey>>,
    max_entries: usize,
    nonce: Zeroizing<Nonce>,
    entropy: Arc<dyn EntropySource>,
    metrics: SigCacheMetrics,
}

impl SigCache {
    /// Create a cache holding at most `max_entries` signatures, salted and
    /// evicted with OS randomness.
    ///
    /// `max_entries = 0` yields a disabled cache.
    ///
    /// # Errors
    /// `SigCacheError::NonceGeneration` if the OS random source fails.
    pub fn new(max_entries: usize) -> Result<Self, SigCacheError> {
        Self::with_entropy(max_entries, Arc::new(OsEntropy))
    }

    /// Create a cache from a validated configuration.
    pub fn from_config(config: &SigCacheConfig) -> Result<Self, SigCacheError> {
        config.validate()?;
        Self::new(config.max_entries)
    }

    /// Create a cache drawing all randomness from `entropy`.
    ///
    /// The nonce is drawn here, once. A failing source is fatal: there is no
    /// fallback to a weaker generator.
    pub fn with_entropy(
        max_entries: usize,
        entropy: Arc<dyn EntropySource>,
    ) -> Result<Self, SigCacheError> {
        let mut nonce = Zeroizing::new([0u8; 32]);
        entropy
            .fill(&mut nonce[..])
            .map_err(SigCacheError::NonceGeneration)?;

        debug!(max_entries, "Signature cache created");

        Ok(Self {
            valid_sigs: RwLock::new(HashSet::new()),
            max_entries,
            nonce,
            entropy,
            metrics: SigCacheMetrics::new(),
        })
    }

    /// Whether `signature` over `sig_hash` for `public_key` is cached.
    pub fn exists(
        &self,
        sig_hash: &Hash,
        signature: &Signature,
        public_key: &VerifyingKey,
    ) -> bool {
        let key = SigCacheKey::from_parts(&self.nonce, sig_hash, signature, public_key);
        self.lookup(&key)
    }

    /// Like [`exists`](Self::exists) for callers holding the DER signature
    /// and compressed SEC1 public key bytes.
    pub fn exists_encoded(
        &self,
        sig_hash: &Hash,
        signature_der: &[u8],
        pubkey: &CompressedPubKey,
    ) -> bool {
        let key = SigCacheKey::derive(&self.nonce, sig_hash, signature_der, pubkey);
        self.lookup(&key)
    }

    /// Record a signature the caller has verified.
    ///
    /// If the cache is full, one resident entry is evicted first (see
    /// [`crate::domain::eviction`]). If no eviction randomness can be drawn the
    /// insertion is abandoned and the cache is left unchanged.
    pub fn add(&self, sig_hash: &Hash, signature: &Signature, public_key: &VerifyingKey) {
        if !self.is_enabled() {
            return;
        }
        let der = signature.to_der();
        self.add_encoded(sig_hash, der.as_bytes(), &compress(public_key));
    }

    /// Like [`add`](Self::add) for already-encoded signature and key bytes.
    pub fn add_encoded(&self, sig_hash: &Hash, signature_der: &[u8], pubkey: &CompressedPubKey) {
        if !self.is_enabled() {
            return;
        }

        let mut valid_sigs = self.valid_sigs.write();
        let key = SigCacheKey::derive(&self.nonce, sig_hash, signature_der, pubkey);

        if valid_sigs.contains(&key) {
            self.metrics.record_duplicate();
            return;
        }

        if valid_sigs.len() + 1 > self.max_entries {
            let mut draw: EvictionDraw = [0u8; SIG_CACHE_KEY_LEN];
            if let Err(e) = self.entropy.fill(&mut draw) {
                warn!(error = %e, "Signature cache insertion dropped: no eviction randomness");
                self.metrics.record_dropped();
                return;
            }

            if let Some(victim) = select_victim(valid_sigs.iter(), &draw) {
                valid_sigs.remove(&victim);
                self.metrics.record_eviction();
                trace!(?victim, "Evicted signature cache entry");
            }
        }

        valid_sigs.insert(key);
        self.metrics.record_insertion();
    }

    /// Number of resident entries.
    pub fn len(&self) -> usize {
        self.valid_sigs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.valid_sigs.read().is_empty()
    }

    /// Capacity fixed at construction.
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// `false` for a zero-capacity cache.
    pub fn is_enabled(&self) -> bool {
        self.max_entries > 0
    }

    pub fn metrics(&self) -> SigCacheMetricsSnapshot {
        self.metrics.snapshot()
    }

    fn lookup(&self, key: &SigCacheKey) -> bool {
        let found = self.valid_sigs.read().contains(key);
        self.metrics.record_lookup(found);
        found
    }
}

impl SigCacheApi for SigCache {
    fn exists(&self, sig_hash: &Hash, signature: &Signature, public_key: &VerifyingKey) -> bool {
        SigCache::exists(self, sig_hash, signature, public_key)
    }

    fn add(&self, sig_hash: &Hash, signature: &Signature, public_key: &VerifyingKey) {
        SigCache::add(self, sig_hash, signature, public_key)
    }
}

impl<T: SigCacheApi + ?Sized> SigCacheApi for Arc<T> {
    fn exists(&self, sig_hash: &Hash, signature: &Signature, public_key: &VerifyingKey) -> bool {
        (**self).exists(sig_hash, signature, public_key)
    }

    fn add(&self, sig_hash: &Hash, signature: &Signature, public_key: &VerifyingKey) {
        (**self).add(sig_hash, signature, public_key)
    }
}

// The nonce must never show up in logs.
impl fmt::Debug for SigCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigCache")
            .field("len", &self.len())
            .field("max_entries", &self.max_entries)
            .finish_non_exhaustive()
    }
}
