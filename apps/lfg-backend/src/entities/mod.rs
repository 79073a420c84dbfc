pub mod active_groups;
pub mod allow_list;
pub mod deny_list;
pub mod guild_settings;
pub mod guild_tag_sets;
pub mod user_settings;
pub mod user_templates;
pub mod users;
