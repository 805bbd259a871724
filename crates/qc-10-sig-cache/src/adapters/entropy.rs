//! Entropy Source Adapters

use crate::domain::errors::EntropyError;
use crate::ports::outbound::EntropySource;
use parking_lot::Mutex;
use rand::rngs::OsRng;
use rand::RngCore;

/// Production entropy source backed by the operating system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl OsEntropy {
    pub fn new() -> Self {
        Self
    }
}

impl EntropySource for OsEntropy {
    fn fill(&self, dest: &mut [u8]) -> Result<(), EntropyError> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| EntropyError(e.to_string()))
    }
}

/// Fixed entropy source for deterministic testing.
///
/// Returns queued byte patterns in order; once the queue is exhausted the
/// last pattern repeats.
///
/// # Example
///
/// ```rust
/// use qc_10_sig_cache::adapters::FixedEntropy;
/// use qc_10_sig_cache::EntropySource;
///
/// let entropy = FixedEntropy::new(vec![0x11, 0xFF]);
/// let mut buf = [0u8; 2];
/// entropy.fill(&mut buf).unwrap();
/// assert_eq!(buf, [0x11, 0x11]);
/// entropy.fill(&mut buf).unwrap();
/// assert_eq!(buf, [0xFF, 0xFF]);
/// entropy.fill(&mut buf).unwrap();
/// assert_eq!(buf, [0xFF, 0xFF]);
/// ```
#[derive(Debug)]
pub struct FixedEntropy {
    /// Pending fills (reversed, popped from the back) and the last one served.
    state: Mutex<(Vec<u8>, u8)>,
}

impl FixedEntropy {
    /// Each value in `fills` is broadcast across one whole `fill` call.
    pub fn new(fills: Vec<u8>) -> Self {
        let last = fills.first().copied().unwrap_or(0);
        let mut fills = fills;
        fills.reverse();
        Self {
            state: Mutex::new((fills, last)),
        }
    }

    /// Always fills with `byte`.
    pub fn repeating(byte: u8) -> Self {
        Self::new(vec![byte])
    }
}

impl EntropySource for FixedEntropy {
    fn fill(&self, dest: &mut [u8]) -> Result<(), EntropyError> {
        let mut state = self.state.lock();
        let (pending, last) = &mut *state;
        if let Some(next) = pending.pop() {
            *last = next;
        }
        dest.fill(*last);
        Ok(())
    }
}

/// Entropy source that succeeds a fixed number of times, then fails.
///
/// Models a secure random source becoming unavailable mid-run.
#[derive(Debug)]
pub struct FailingEntropy {
    remaining: Mutex<usize>,
    fallback: OsEntropy,
}

impl FailingEntropy {
    /// Fails on every call.
    pub fn always() -> Self {
        Self::after(0)
    }

    /// Serves `successes` fills from the OS source, then fails forever.
    pub fn after(successes: usize) -> Self {
        Self {
            remaining: Mutex::new(successes),
            fallback: OsEntropy,
        }
    }
}

impl EntropySource for FailingEntropy {
    fn fill(&self, dest: &mut [u8]) -> Result<(), EntropyError> {
        let mut remaining = self.remaining.lock();
        if *remaining == 0 {
            return Err(EntropyError("entropy source exhausted".to_string()));
        }
        *remaining -= 1;
        self.fallback.fill(dest)
    }
}
