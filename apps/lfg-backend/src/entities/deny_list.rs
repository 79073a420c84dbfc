use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "deny_list")]
pub struct Model {
    /// Member refused entry.
    #[sea_orm(primary_key, auto_increment = false)]
    pub subject_id: i64,
    /// Owner whose list this entry belongs to.
    #[sea_orm(primary_key, auto_increment = false)]
    pub owner_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::OwnerId",
        to = "super::users::Column::DiscordId"
    )]
    Owner,
}

impl ActiveModelBehavior for ActiveModel {}
