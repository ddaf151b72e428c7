//! Domain types shared across Academy crates.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; never in `infra/` or `handlers/`.

pub mod contact;
pub mod course;
pub mod user;
