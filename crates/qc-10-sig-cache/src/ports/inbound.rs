//! # Inbound Ports (Driving Ports / API)
//!
//! The two operations the validation pipeline calls on a signature cache.

use crate::domain::key::Hash;
use k256::ecdsa::{Signature, VerifyingKey};

/// Signature cache API.
///
/// Implementations must be thread-safe (`Send + Sync`): many validator
/// threads share one instance.
pub trait SigCacheApi: Send + Sync {
    /// Whether `signature` over `sig_hash` under `public_key` was recorded
    /// as valid. Never errors.
    fn exists(&self, sig_hash: &Hash, signature: &Signature, public_key: &VerifyingKey) -> bool;

    /// Record that `signature` over `sig_hash` under `public_key` verified.
    ///
    /// # Contract
    /// The caller MUST have verified the signature first. Never call this
    /// for a signature that failed verification.
    fn add(&self, sig_hash: &Hash, signature: &Signature, public_key: &VerifyingKey);
}
