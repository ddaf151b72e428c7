//! Ambient plumbing shared by the academy crates: config loading, tracing,
//! request-id middleware, liveness probe and serde helpers.

pub mod config;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
