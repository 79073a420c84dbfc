//! Repository functions for the active-group row.

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use time::OffsetDateTime;

use crate::entities::active_groups;
use crate::errors::GroupError;

/// Active group domain model: the source of truth tying the voice room,
/// the listing, and the anchor message to one owner in one guild.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveGroup {
    pub owner_id: i64,
    pub guild_id: i64,
    pub voice_room_id: i64,
    pub listing_id: i64,
    pub anchor_message_id: i64,
    pub created_at: OffsetDateTime,
}

impl From<active_groups::Model> for ActiveGroup {
    fn from(model: active_groups::Model) -> Self {
        Self {
            owner_id: model.owner_id,
            guild_id: model.guild_id,
            voice_room_id: model.voice_room_id,
            listing_id: model.listing_id,
            anchor_message_id: model.anchor_message_id,
            created_at: model.created_at,
        }
    }
}

pub async fn find_by_owner<C: ConnectionTrait>(
    conn: &C,
    owner_id: i64,
    guild_id: i64,
) -> Result<Option<ActiveGroup>, GroupError> {
    let group = active_groups::Entity::find_by_id((owner_id, guild_id))
        .one(conn)
        .await?;
    Ok(group.map(ActiveGroup::from))
}

pub async fn find_by_voice_room<C: ConnectionTrait>(
    conn: &C,
    guild_id: i64,
    voice_room_id: i64,
) -> Result<Option<ActiveGroup>, GroupError> {
    let group = active_groups::Entity::find()
        .filter(active_groups::Column::GuildId.eq(guild_id))
        .filter(active_groups::Column::VoiceRoomId.eq(voice_room_id))
        .one(conn)
        .await?;
    Ok(group.map(ActiveGroup::from))
}

/// Insert the row. A second row for the same (owner, guild) violates the
/// composite primary key and is reported as `DuplicateGroup`.
pub async fn insert<C: ConnectionTrait>(
    conn: &C,
    owner_id: i64,
    guild_id: i64,
    voice_room_id: i64,
    listing_id: i64,
    anchor_message_id: i64,
) -> Result<ActiveGroup, GroupError> {
    let created_at = OffsetDateTime::now_utc();
    let row = active_groups::ActiveModel {
        owner_id: Set(owner_id),
        guild_id: Set(guild_id),
        voice_room_id: Set(voice_room_id),
        listing_id: Set(listing_id),
        anchor_message_id: Set(anchor_message_id),
        created_at: Set(created_at),
    };

    active_groups::Entity::insert(row)
        .exec_without_returning(conn)
        .await
        .map_err(|err| {
            if matches!(err.sql_err(), Some(sea_orm::SqlErr::UniqueConstraintViolation(_))) {
                GroupError::DuplicateGroup
            } else {
                err.into()
            }
        })?;

    Ok(ActiveGroup {
        owner_id,
        guild_id,
        voice_room_id,
        listing_id,
        anchor_message_id,
        created_at,
    })
}

/// Point the row at a freshly posted anchor message.
pub async fn set_anchor_message<C: ConnectionTrait>(
    conn: &C,
    owner_id: i64,
    guild_id: i64,
    anchor_message_id: i64,
) -> Result<(), GroupError> {
    let active = active_groups::ActiveModel {
        owner_id: Set(owner_id),
        guild_id: Set(guild_id),
        anchor_message_id: Set(anchor_message_id),
        ..Default::default()
    };
    active.update(conn).await?;
    Ok(())
}

/// Delete the row. Deleting an absent row is a no-op.
pub async fn delete<C: ConnectionTrait>(
    conn: &C,
    owner_id: i64,
    guild_id: i64,
) -> Result<(), GroupError> {
    active_groups::Entity::delete_many()
        .filter(active_groups::Column::OwnerId.eq(owner_id))
        .filter(active_groups::Column::GuildId.eq(guild_id))
        .exec(conn)
        .await?;
    Ok(())
}
