//! # Signature Cache Errors
//!
//! Error types for cache construction, configuration and the caching
//! verifier.
//!
//! The store itself never fails after construction: `exists` is infallible
//! and `add` degrades silently when eviction randomness is unavailable.

use thiserror::Error;

/// Failure to obtain bytes from a secure random source.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Secure random source unavailable: {0}")]
pub struct EntropyError(pub String);

/// Errors surfaced by the signature cache subsystem.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SigCacheError {
    /// The per-store nonce could not be drawn. The cache cannot be built.
    #[error("Failed to generate signature cache nonce: {0}")]
    NonceGeneration(#[source] EntropyError),

    /// Configuration rejected by validation
    #[error("Invalid signature cache configuration: {0}")]
    InvalidConfig(String),

    /// Signature did not verify against the digest and public key.
    ///
    /// Only produced by `CachingVerifier`; the store never judges validity.
    #[error("Signature verification failed")]
    InvalidSignature,
}
