//! # Signature Cache (QC-10)
//!
//! Signature verification cache for a validating node: remembers which
//! (signature-hash, signature, public key) triples have already been proven
//! valid so they are never verified twice.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): key derivation, bounded store, eviction
//! - **Ports Layer** (`ports/`): `SigCacheApi` (inbound), `EntropySource` (outbound)
//! - **Adapters Layer** (`adapters/`): OS and deterministic entropy sources
//! - **Service Layer** (`service.rs`): cache-in-front-of-ECDSA verifier
//!
//! ## Security Notes
//!
//! - **Salted keys**: every key is `SHA-256(nonce || sig_hash || sig || pubkey)`
//!   with a secret per-instance nonce
//! - **Randomized eviction**: victims are chosen against a fresh secure random
//!   draw, so an attacker cannot steer which entries are evicted
//! - **Valid-only**: the cache never verifies; callers add only signatures
//!   that passed verification
//!
//! ## Usage Example
//!
//! ```ignore
//! use qc_10_sig_cache::{CachingVerifier, SigCache};
//! use std::sync::Arc;
//!
//! let cache = Arc::new(SigCache::new(100_000)?);
//! let verifier = CachingVerifier::new(Arc::clone(&cache));
//!
//! verifier.verify(&sig_hash, &signature, &public_key)?; // verified, cached
//! verifier.verify(&sig_hash, &signature, &public_key)?; // cache hit
//! ```

pub mod adapters;
pub mod domain;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::{FailingEntropy, FixedEntropy, OsEntropy};
pub use domain::config::{SigCacheConfig, SigCacheConfigBuilder, DEFAULT_SIG_CACHE_ENTRIES};
pub use domain::errors::{EntropyError, SigCacheError};
pub use domain::key::{compress, CompressedPubKey, Hash, SigCacheKey};
pub use domain::store::SigCache;
pub use metrics::{SigCacheMetrics, SigCacheMetricsSnapshot};
pub use ports::inbound::SigCacheApi;
pub use ports::outbound::EntropySource;
pub use service::{BatchOutcome, CachingVerifier, SignatureCheck, VerificationOutcome};
