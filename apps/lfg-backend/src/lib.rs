#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod platform;
pub mod repos;
pub mod services;
pub mod telemetry;

// Re-exports for public API
pub use config::db::{db_url, DbProfile};
pub use config::GroupConfig;
pub use db::connect_db;
pub use errors::{DenyReason, GroupError, MissingResource};
pub use platform::{ChatPlatform, PlatformError};
pub use services::access_control::AccessMode;
pub use services::group_flow::{CreatedGroup, GroupFields, GroupFlowService, JoinOutcome};
pub use services::scheduler::ReclaimScheduler;
