use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Last-used group values per owner. All string fields stay NULL until the
/// owner's first successful create; "unset" and "set to empty" are distinct
/// states upstream.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_templates")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub discord_id: i64,
    #[sea_orm(column_name = "voice_name")]
    pub voice_name: Option<String>,
    #[sea_orm(column_name = "group_name")]
    pub group_name: Option<String>,
    #[sea_orm(column_name = "group_description")]
    pub group_description: Option<String>,
    #[sea_orm(column_name = "mod_code")]
    pub mod_code: Option<String>,
    #[sea_orm(column_name = "room_password")]
    pub room_password: Option<String>,
    #[sea_orm(column_name = "create_count")]
    pub create_count: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::DiscordId",
        to = "super::users::Column::DiscordId"
    )]
    Users,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
