//! Auth types shared by the academy service and its tests.
//!
//! Provides JWT claims with signing/validation and the bearer-token `Identity` extractor.

pub mod identity;
pub mod token;
