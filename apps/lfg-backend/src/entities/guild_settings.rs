use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Per-guild provisioned resources. Ids are lazily filled in by the
/// provisioning flow and never unset once set.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "guild_settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub guild_id: i64,
    #[sea_orm(column_name = "forum_channel_id")]
    pub forum_channel_id: Option<i64>,
    #[sea_orm(column_name = "anchor_thread_id")]
    pub anchor_thread_id: Option<i64>,
    #[sea_orm(column_name = "create_button_id")]
    pub create_button_id: Option<i64>,
    #[sea_orm(column_name = "waiting_room_id")]
    pub waiting_room_id: Option<i64>,
    #[sea_orm(column_name = "mention_role_id")]
    pub mention_role_id: Option<i64>,
    #[sea_orm(column_name = "steam_api_key")]
    pub steam_api_key: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::guild_tag_sets::Entity")]
    GuildTagSets,
}

impl Related<super::guild_tag_sets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GuildTagSets.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
