//! Domain logic for the scholarship interview scheduling backend.
//!
//! This crate has zero internal dependencies so it can be shared by the
//! persistence layer, the HTTP layer, and any future tooling.

pub mod error;
pub mod interview;
pub mod pagination;
pub mod roles;
pub mod types;
