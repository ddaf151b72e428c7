//! Test utilities for the academy service.
//!
//! Import from `[dev-dependencies]` only.

pub mod auth;
