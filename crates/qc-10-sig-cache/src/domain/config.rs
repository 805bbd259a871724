//! Signature cache configuration and validation
//!
//! # Example
//!
//! ```
//! use qc_10_sig_cache::SigCacheConfigBuilder;
//!
//! let config = SigCacheConfigBuilder::new()
//!     .max_entries(50_000)
//!     .build()
//!     .expect("valid config");
//! assert_eq!(config.max_entries, 50_000);
//! ```

use super::errors::SigCacheError;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Default number of cached signatures.
pub const DEFAULT_SIG_CACHE_ENTRIES: usize = 100_000;

/// Upper bound accepted by validation. Each entry costs a 32-byte key plus
/// set overhead, and the eviction scan is linear in capacity.
pub const MAX_SIG_CACHE_ENTRIES: usize = 10_000_000;

/// Environment variable overriding `max_entries`.
pub const MAX_ENTRIES_ENV: &str = "QC_SIGCACHE_MAX_ENTRIES";

/// Signature cache configuration.
///
/// `max_entries = 0` disables caching: every `add` is a no-op.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SigCacheConfig {
    /// Maximum number of entries resident at any moment
    pub max_entries: usize,
}

impl Default for SigCacheConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_SIG_CACHE_ENTRIES,
        }
    }
}

impl SigCacheConfig {
    /// Create a new configuration with validation
    pub fn new(max_entries: usize) -> Result<Self, SigCacheError> {
        let config = Self { max_entries };
        config.validate()?;
        Ok(config)
    }

    /// A configuration with caching turned off.
    pub fn disabled() -> Self {
        Self { max_entries: 0 }
    }

    /// Default configuration with `QC_SIGCACHE_MAX_ENTRIES` applied.
    ///
    /// Unparseable values are logged and ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_override(std::env::var(MAX_ENTRIES_ENV).ok().as_deref());
        config
    }

    fn apply_override(&mut self, raw: Option<&str>) {
        let Some(raw) = raw else {
            return;
        };
        match raw.trim().parse::<usize>() {
            Ok(max_entries) => {
                info!(max_entries, "Loaded signature cache size from environment");
                self.max_entries = max_entries;
            }
            Err(_) => warn!(
                value = raw,
                "{} must be a non-negative integer",
                MAX_ENTRIES_ENV
            ),
        }
    }

    pub fn validate(&self) -> Result<(), SigCacheError> {
        if self.max_entries > MAX_SIG_CACHE_ENTRIES {
            return Err(SigCacheError::InvalidConfig(format!(
                "max_entries {} exceeds limit {}",
                self.max_entries, MAX_SIG_CACHE_ENTRIES
            )));
        }
        Ok(())
    }

    /// Whether this configuration caches anything at all.
    pub fn is_enabled(&self) -> bool {
        self.max_entries > 0
    }

    /// Builder-style method to set max entries
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries;
        self
    }
}

/// Builder for SigCacheConfig with validation
#[derive(Default)]
pub struct SigCacheConfigBuilder {
    max_entries: Option<usize>,
}

impl SigCacheConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the capacity (0 disables the cache)
    pub fn max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = Some(max_entries);
        self
    }

    /// Build the config, validating all parameters
    pub fn build(self) -> Result<SigCacheConfig, SigCacheError> {
        let defaults = SigCacheConfig::default();
        let config = SigCacheConfig {
            max_entries: self.max_entries.unwrap_or(defaults.max_entries),
        };
        config.validate()?;
        Ok(config)
    }
}
