//! # Outbound Ports (Driven Ports / SPI)
//!
//! Dependencies the signature cache needs from its environment.

use crate::domain::errors::EntropyError;

/// Cryptographically secure source of random bytes.
///
/// Used twice by the cache: once for the per-store nonce and once per
/// eviction for the victim draw. Implementations must never substitute a
/// weaker generator on failure; they report the failure instead.
pub trait EntropySource: Send + Sync {
    /// Fill `dest` entirely with random bytes.
    fn fill(&self, dest: &mut [u8]) -> Result<(), EntropyError>;
}
