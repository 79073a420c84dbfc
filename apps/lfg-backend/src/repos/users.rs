//! Repository functions for owner records.

use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, Set};

use crate::entities::users;
use crate::errors::GroupError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub discord_id: i64,
    pub name: Option<String>,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            discord_id: model.discord_id,
            name: model.name,
        }
    }
}

pub async fn find_by_id<C: ConnectionTrait>(
    conn: &C,
    discord_id: i64,
) -> Result<Option<User>, GroupError> {
    let user = users::Entity::find_by_id(discord_id).one(conn).await?;
    Ok(user.map(User::from))
}

/// Insert the owner row on first sighting; refresh the display name on
/// later sightings when one is supplied.
pub async fn ensure<C: ConnectionTrait>(
    conn: &C,
    discord_id: i64,
    name: Option<&str>,
) -> Result<User, GroupError> {
    match users::Entity::find_by_id(discord_id).one(conn).await? {
        Some(existing) => {
            if let Some(name) = name {
                if existing.name.as_deref() != Some(name) {
                    let mut active: users::ActiveModel = existing.into();
                    active.name = Set(Some(name.to_string()));
                    let updated = active.update(conn).await?;
                    return Ok(User::from(updated));
                }
            }
            Ok(User::from(existing))
        }
        None => {
            let model = users::ActiveModel {
                discord_id: Set(discord_id),
                name: Set(name.map(str::to_string)),
            };
            users::Entity::insert(model).exec_without_returning(conn).await?;
            Ok(User {
                discord_id,
                name: name.map(str::to_string),
            })
        }
    }
}
