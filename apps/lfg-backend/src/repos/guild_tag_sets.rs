//! Repository functions for the per-guild tag taxonomy.

use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, Set};

use crate::entities::guild_tag_sets::{self, TagMap};
use crate::errors::GroupError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuildTagSet {
    pub guild_id: i64,
    pub no_mods_tag: Option<i64>,
    pub version_tags: TagMap,
    pub role_tags: TagMap,
}

impl GuildTagSet {
    pub fn empty(guild_id: i64) -> Self {
        Self {
            guild_id,
            ..Self::default()
        }
    }

    /// Every tag id the taxonomy currently knows about, across buckets.
    pub fn known_ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.no_mods_tag.into_iter().collect();
        ids.extend(self.version_tags.values());
        ids.extend(self.role_tags.values());
        ids
    }
}

impl From<guild_tag_sets::Model> for GuildTagSet {
    fn from(model: guild_tag_sets::Model) -> Self {
        Self {
            guild_id: model.guild_id,
            no_mods_tag: model.no_mods_tag,
            version_tags: model.version_tags,
            role_tags: model.role_tags,
        }
    }
}

pub async fn find_by_guild<C: ConnectionTrait>(
    conn: &C,
    guild_id: i64,
) -> Result<Option<GuildTagSet>, GroupError> {
    let tag_set = guild_tag_sets::Entity::find_by_id(guild_id).one(conn).await?;
    Ok(tag_set.map(GuildTagSet::from))
}

pub async fn save<C: ConnectionTrait>(
    conn: &C,
    tag_set: &GuildTagSet,
) -> Result<(), GroupError> {
    let exists = guild_tag_sets::Entity::find_by_id(tag_set.guild_id)
        .one(conn)
        .await?
        .is_some();

    let active = guild_tag_sets::ActiveModel {
        guild_id: Set(tag_set.guild_id),
        no_mods_tag: Set(tag_set.no_mods_tag),
        version_tags: Set(tag_set.version_tags.clone()),
        role_tags: Set(tag_set.role_tags.clone()),
    };

    if exists {
        active.update(conn).await?;
    } else {
        guild_tag_sets::Entity::insert(active)
            .exec_without_returning(conn)
            .await?;
    }
    Ok(())
}
