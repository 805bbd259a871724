//! # Ports Layer
//!
//! Trait definitions for the hexagonal architecture.
//! - **Inbound (Driving)**: the cache API validators call
//! - **Outbound (Driven)**: the secure randomness the cache depends on

pub mod inbound;
pub mod outbound;
