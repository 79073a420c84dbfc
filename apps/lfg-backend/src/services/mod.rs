//! Service layer: pure decision logic, resource wrappers, and the group
//! lifecycle orchestrator composing them.

pub mod access_control;
pub mod group_flow;
pub mod listings;
pub mod resolver;
pub mod rooms;
pub mod scheduler;
pub mod tags;
