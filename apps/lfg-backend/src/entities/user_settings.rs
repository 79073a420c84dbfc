use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub discord_id: i64,
    /// Access mode 0..3; decoded by `services::access_control::AccessMode`.
    #[sea_orm(column_name = "limit_mode", column_type = "SmallInteger")]
    pub limit_mode: i16,
    #[sea_orm(column_name = "group_password")]
    pub group_password: Option<String>,
    #[sea_orm(column_name = "user_limit")]
    pub user_limit: i32,
    #[sea_orm(column_name = "steam_friend_code")]
    pub steam_friend_code: Option<String>,
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
