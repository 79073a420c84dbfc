//! Error types for the group lifecycle core.

pub mod domain;

pub use domain::{DenyReason, GroupError, MissingResource};
