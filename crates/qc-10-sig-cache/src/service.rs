//! # Caching Verifier Service
//!
//! Application service that puts a signature cache in front of secp256k1
//! ECDSA verification.
//!
//! ## Flow
//!
//! 1. `exists` on the cache. A hit skips the elliptic-curve work entirely.
//! 2. On a miss, verify the prehashed digest with `k256`.
//! 3. Only if verification succeeds, `add` the triple.
//!
//! Failed signatures never reach the cache.

use crate::domain::errors::SigCacheError;
use crate::domain::key::Hash;
use crate::ports::inbound::SigCacheApi;
use k256::ecdsa::signature::hazmat::PrehashVerifier;
use k256::ecdsa::{Signature, VerifyingKey};

/// How a successful verification was satisfied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerificationOutcome {
    /// Found in the cache; no cryptographic work done
    CacheHit,
    /// Verified now and recorded in the cache
    Verified,
}

/// One signature to check, e.g. one transaction input.
#[derive(Clone, Debug)]
pub struct SignatureCheck {
    pub sig_hash: Hash,
    pub signature: Signature,
    pub public_key: VerifyingKey,
}

/// Result of batch verification.
#[derive(Clone, Debug)]
pub struct BatchOutcome {
    /// Individual results, in input order
    pub results: Vec<Result<VerificationOutcome, SigCacheError>>,
    /// Whether every signature was valid
    pub all_valid: bool,
    pub cache_hits: usize,
    pub verified: usize,
    pub failed: usize,
}

impl BatchOutcome {
    pub fn from_results(results: Vec<Result<VerificationOutcome, SigCacheError>>) -> Self {
        let cache_hits = results
            .iter()
            .filter(|r| matches!(r, Ok(VerificationOutcome::CacheHit)))
            .count();
        let verified = results
            .iter()
            .filter(|r| matches!(r, Ok(VerificationOutcome::Verified)))
            .count();
        let failed = results.len() - cache_hits - verified;

        Self {
            results,
            all_valid: failed == 0,
            cache_hits,
            verified,
            failed,
        }
    }
}

/// Signature verifier backed by a signature cache.
///
/// Generic over the cache port so validators can share one
/// `Arc<SigCache>` between the mempool and block validation.
pub struct CachingVerifier<C: SigCacheApi> {
    cache: C,
}

impl<C: SigCacheApi> CachingVerifier<C> {
    pub fn new(cache: C) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Verify `signature` over the prehashed `sig_hash` for `public_key`.
    ///
    /// # Errors
    /// `SigCacheError::InvalidSignature` if the signature does not verify
    /// (including high-S signatures, which `k256` rejects).
    pub fn verify(
        &self,
        sig_hash: &Hash,
        signature: &Signature,
        public_key: &VerifyingKey,
    ) -> Result<VerificationOutcome, SigCacheError> {
        if self.cache.exists(sig_hash, signature, public_key) {
            return Ok(VerificationOutcome::CacheHit);
        }

        public_key
            .verify_prehash(sig_hash, signature)
            .map_err(|_| SigCacheError::InvalidSignature)?;

        self.cache.add(sig_hash, signature, public_key);
        Ok(VerificationOutcome::Verified)
    }

    /// Verify many signatures in parallel against the shared cache.
    pub fn verify_batch(&self, checks: &[SignatureCheck]) -> BatchOutcome {
        use rayon::prelude::*;

        let results = checks
            .par_iter()
            .map(|check| self.verify(&check.sig_hash, &check.signature, &check.public_key))
            .collect();

        BatchOutcome::from_results(results)
    }
}
