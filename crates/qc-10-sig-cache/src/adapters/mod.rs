//! # Adapters Layer
//!
//! Implementations of the outbound ports.

pub mod entropy;

pub use entropy::{FailingEntropy, FixedEntropy, OsEntropy};
