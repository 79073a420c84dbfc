//! Repository functions for per-owner access settings.

use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, Set};

use crate::entities::user_settings;
use crate::errors::GroupError;

/// Owner settings domain model. `limit_mode` stays raw here; the
/// access-control service owns the decoded enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSettings {
    pub discord_id: i64,
    pub limit_mode: i16,
    pub group_password: Option<String>,
    pub user_limit: i32,
    pub steam_friend_code: Option<String>,
}

impl UserSettings {
    /// Defaults for an owner with no stored row yet: open mode, no cap.
    pub fn defaults(discord_id: i64) -> Self {
        Self {
            discord_id,
            limit_mode: 0,
            group_password: None,
            user_limit: 0,
            steam_friend_code: None,
        }
    }
}

impl From<user_settings::Model> for UserSettings {
    fn from(model: user_settings::Model) -> Self {
        Self {
            discord_id: model.discord_id,
            limit_mode: model.limit_mode,
            group_password: model.group_password,
            user_limit: model.user_limit,
            steam_friend_code: model.steam_friend_code,
        }
    }
}

pub async fn find_by_owner<C: ConnectionTrait>(
    conn: &C,
    discord_id: i64,
) -> Result<Option<UserSettings>, GroupError> {
    let settings = user_settings::Entity::find_by_id(discord_id).one(conn).await?;
    Ok(settings.map(UserSettings::from))
}

/// Insert-or-update the full settings row.
pub async fn save<C: ConnectionTrait>(
    conn: &C,
    settings: &UserSettings,
) -> Result<(), GroupError> {
    let exists = user_settings::Entity::find_by_id(settings.discord_id)
        .one(conn)
        .await?
        .is_some();

    let active = user_settings::ActiveModel {
        discord_id: Set(settings.discord_id),
        limit_mode: Set(settings.limit_mode),
        group_password: Set(settings.group_password.clone()),
        user_limit: Set(settings.user_limit),
        steam_friend_code: Set(settings.steam_friend_code.clone()),
    };

    if exists {
        active.update(conn).await?;
    } else {
        user_settings::Entity::insert(active)
            .exec_without_returning(conn)
            .await?;
    }
    Ok(())
}
