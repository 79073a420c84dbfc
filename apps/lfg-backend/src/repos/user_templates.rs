//! Repository functions for per-owner group templates.

use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, Set};

use crate::entities::user_templates;
use crate::errors::GroupError;

/// Durable "last used values" per owner. Every string field is `None`
/// until the owner's first successful create; upstream prompting depends
/// on that distinction, so none of these default to empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserTemplate {
    pub discord_id: i64,
    pub voice_name: Option<String>,
    pub group_name: Option<String>,
    pub group_description: Option<String>,
    pub mod_code: Option<String>,
    pub room_password: Option<String>,
    pub create_count: i64,
}

impl UserTemplate {
    pub fn empty(discord_id: i64) -> Self {
        Self {
            discord_id,
            ..Self::default()
        }
    }
}

impl From<user_templates::Model> for UserTemplate {
    fn from(model: user_templates::Model) -> Self {
        Self {
            discord_id: model.discord_id,
            voice_name: model.voice_name,
            group_name: model.group_name,
            group_description: model.group_description,
            mod_code: model.mod_code,
            room_password: model.room_password,
            create_count: model.create_count,
        }
    }
}

pub async fn find_by_owner<C: ConnectionTrait>(
    conn: &C,
    discord_id: i64,
) -> Result<Option<UserTemplate>, GroupError> {
    let template = user_templates::Entity::find_by_id(discord_id).one(conn).await?;
    Ok(template.map(UserTemplate::from))
}

/// Insert-or-update the full template row.
pub async fn save<C: ConnectionTrait>(
    conn: &C,
    template: &UserTemplate,
) -> Result<(), GroupError> {
    let exists = user_templates::Entity::find_by_id(template.discord_id)
        .one(conn)
        .await?
        .is_some();

    let active = user_templates::ActiveModel {
        discord_id: Set(template.discord_id),
        voice_name: Set(template.voice_name.clone()),
        group_name: Set(template.group_name.clone()),
        group_description: Set(template.group_description.clone()),
        mod_code: Set(template.mod_code.clone()),
        room_password: Set(template.room_password.clone()),
        create_count: Set(template.create_count),
    };

    if exists {
        active.update(conn).await?;
    } else {
        user_templates::Entity::insert(active)
            .exec_without_returning(conn)
            .await?;
    }
    Ok(())
}
