//! # Cache Key Derivation
//!
//! Turns a (signature-hash, signature, public key) triple into a salted,
//! fixed-width lookup key:
//!
//! ```text
//! key = SHA-256(nonce || sig_hash || DER(signature) || SEC1-compressed(pubkey))
//! ```
//!
//! ## Security Notes
//!
//! - The nonce is secret and per-store, so keys are unpredictable to anyone
//!   outside the process. Eviction order cannot be steered by crafting inputs.
//! - Signature and key use their consensus encodings: two bit-identical
//!   signature objects always hash identically.

use k256::ecdsa::{Signature, VerifyingKey};
use sha2::{Digest, Sha256};
use std::fmt;

/// Signature-hash digest of the transaction data a signature commits to.
pub type Hash = [u8; 32];

/// Per-store salt. Never leaves the store that drew it.
pub type Nonce = [u8; 32];

/// Compressed SEC1 public key: parity byte followed by the x coordinate.
///
/// Fixed width, so the signature/public key boundary inside the hash input
/// cannot be shifted.
pub type CompressedPubKey = [u8; 33];

/// Width of a cache key in bytes.
pub const SIG_CACHE_KEY_LEN: usize = 32;

/// Lookup key of the signature cache.
///
/// Ordered lexicographically by bytes; eviction compares keys against a
/// random draw using this order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SigCacheKey([u8; SIG_CACHE_KEY_LEN]);

impl SigCacheKey {
    /// Derive a key from an already-serialized signature and compressed
    /// public key.
    ///
    /// Only the signature is variable length; every other field is fixed
    /// width, which keeps the concatenation unambiguous.
    pub fn derive(
        nonce: &Nonce,
        sig_hash: &Hash,
        signature_bytes: &[u8],
        pubkey_bytes: &CompressedPubKey,
    ) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(nonce);
        hasher.update(sig_hash);
        hasher.update(signature_bytes);
        hasher.update(pubkey_bytes);

        let mut key = [0u8; SIG_CACHE_KEY_LEN];
        key.copy_from_slice(&hasher.finalize());
        Self(key)
    }

    /// Derive a key from typed secp256k1 values.
    ///
    /// The signature is serialized as DER and the public key as 33-byte
    /// compressed SEC1.
    pub fn from_parts(
        nonce: &Nonce,
        sig_hash: &Hash,
        signature: &Signature,
        public_key: &VerifyingKey,
    ) -> Self {
        let der = signature.to_der();
        Self::derive(nonce, sig_hash, der.as_bytes(), &compress(public_key))
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8; SIG_CACHE_KEY_LEN] {
        &self.0
    }
}

/// Compressed SEC1 encoding of a secp256k1 public key.
pub fn compress(public_key: &VerifyingKey) -> CompressedPubKey {
    // A verifying key is never the identity point, so this is always 33 bytes.
    let encoded = public_key.to_encoded_point(true);
    let mut compressed = [0u8; 33];
    compressed.copy_from_slice(encoded.as_bytes());
    compressed
}

impl From<[u8; SIG_CACHE_KEY_LEN]> for SigCacheKey {
    fn from(bytes: [u8; SIG_CACHE_KEY_LEN]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for SigCacheKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigCacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SigCacheKey(")?;
        for byte in &self.0[..4] {
            write!(f, "{byte:02x}")?;
        }
        write!(f, "..)")
    }
}
