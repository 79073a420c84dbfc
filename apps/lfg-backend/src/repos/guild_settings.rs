//! Repository functions for per-guild settings.

use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, Set};

use crate::entities::guild_settings;
use crate::errors::GroupError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuildSettings {
    pub guild_id: i64,
    pub forum_channel_id: Option<i64>,
    pub anchor_thread_id: Option<i64>,
    pub create_button_id: Option<i64>,
    pub waiting_room_id: Option<i64>,
    pub mention_role_id: Option<i64>,
    pub steam_api_key: Option<String>,
}

impl GuildSettings {
    pub fn empty(guild_id: i64) -> Self {
        Self {
            guild_id,
            ..Self::default()
        }
    }
}

impl From<guild_settings::Model> for GuildSettings {
    fn from(model: guild_settings::Model) -> Self {
        Self {
            guild_id: model.guild_id,
            forum_channel_id: model.forum_channel_id,
            anchor_thread_id: model.anchor_thread_id,
            create_button_id: model.create_button_id,
            waiting_room_id: model.waiting_room_id,
            mention_role_id: model.mention_role_id,
            steam_api_key: model.steam_api_key,
        }
    }
}

pub async fn find_by_guild<C: ConnectionTrait>(
    conn: &C,
    guild_id: i64,
) -> Result<Option<GuildSettings>, GroupError> {
    let settings = guild_settings::Entity::find_by_id(guild_id).one(conn).await?;
    Ok(settings.map(GuildSettings::from))
}

/// Insert-or-update the guild settings row. Provisioned ids are only ever
/// written with fresh values; callers never pass a cleared field.
pub async fn save<C: ConnectionTrait>(
    conn: &C,
    settings: &GuildSettings,
) -> Result<(), GroupError> {
    let exists = guild_settings::Entity::find_by_id(settings.guild_id)
        .one(conn)
        .await?
        .is_some();

    let active = guild_settings::ActiveModel {
        guild_id: Set(settings.guild_id),
        forum_channel_id: Set(settings.forum_channel_id),
        anchor_thread_id: Set(settings.anchor_thread_id),
        create_button_id: Set(settings.create_button_id),
        waiting_room_id: Set(settings.waiting_room_id),
        mention_role_id: Set(settings.mention_role_id),
        steam_api_key: Set(settings.steam_api_key.clone()),
    };

    if exists {
        active.update(conn).await?;
    } else {
        guild_settings::Entity::insert(active)
            .exec_without_returning(conn)
            .await?;
    }
    Ok(())
}
