//! # Domain Layer
//!
//! Key derivation, the bounded store and its eviction policy.
//! No I/O; randomness arrives through the `EntropySource` port.

pub mod config;
pub mod errors;
pub mod eviction;
pub mod key;
pub mod store;
