pub mod db;
pub mod groups;

pub use groups::GroupConfig;
