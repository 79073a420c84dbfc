use std::collections::BTreeMap;

use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

/// Name-or-role keyed map of forum tag ids, stored as a JSON column.
///
/// Keys are strings either way: version bucket names for `version_tags`,
/// stringified role ids for `role_tags`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct TagMap(pub BTreeMap<String, i64>);

impl TagMap {
    pub fn get(&self, key: &str) -> Option<i64> {
        self.0.get(key).copied()
    }

    pub fn insert(&mut self, key: impl Into<String>, tag_id: i64) {
        self.0.insert(key.into(), tag_id);
    }

    pub fn values(&self) -> impl Iterator<Item = i64> + '_ {
        self.0.values().copied()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "guild_tag_sets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub guild_id: i64,
    #[sea_orm(column_name = "no_mods_tag")]
    pub no_mods_tag: Option<i64>,
    #[sea_orm(column_name = "version_tags", column_type = "Json")]
    pub version_tags: TagMap,
    #[sea_orm(column_name = "role_tags", column_type = "Json")]
    pub role_tags: TagMap,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::guild_settings::Entity",
        from = "Column::GuildId",
        to = "super::guild_settings::Column::GuildId"
    )]
    GuildSettings,
}

impl Related<super::guild_settings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GuildSettings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
