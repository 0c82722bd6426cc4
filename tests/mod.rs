//! Test organization for the rookery chess engine
//!
//! - `common`: Shared test utilities and helpers
//! - `integration`: Behaviour of the engine through its public API

pub mod integration;
