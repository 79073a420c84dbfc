//! Typed CRUD over the persisted entities. No business logic lives here;
//! callers sequence these together.

pub mod access_lists;
pub mod groups;
pub mod guild_settings;
pub mod guild_tag_sets;
pub mod user_settings;
pub mod user_templates;
pub mod users;
