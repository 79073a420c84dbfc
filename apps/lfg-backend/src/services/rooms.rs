//! Session-resource (voice room) wrappers.
//!
//! Thin, idempotent operations over the platform: plain CRUD plus the
//! ensure-exists path used by guild provisioning. Deletion and rename
//! tolerate a room that is already gone.

use tracing::{debug, info};

use crate::errors::GroupError;
use crate::platform::{ChatPlatform, PlatformError, RoomInfo};

pub async fn create(
    platform: &dyn ChatPlatform,
    guild_id: i64,
    name: &str,
    user_limit: u32,
) -> Result<i64, GroupError> {
    let room_id = platform.create_voice_room(guild_id, name, user_limit).await?;
    info!(guild_id, room_id, name, user_limit, "voice room created");
    Ok(room_id)
}

/// Delete the room, treating "already gone" as success.
pub async fn delete(
    platform: &dyn ChatPlatform,
    guild_id: i64,
    room_id: i64,
) -> Result<(), GroupError> {
    match platform.delete_voice_room(guild_id, room_id).await {
        Ok(()) => {
            info!(guild_id, room_id, "voice room deleted");
            Ok(())
        }
        Err(PlatformError::NotFound) => {
            debug!(guild_id, room_id, "voice room already gone");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

/// Rename the room, treating "already gone" as success; the occupancy
/// path owns cleanup of vanished rooms.
pub async fn rename(
    platform: &dyn ChatPlatform,
    guild_id: i64,
    room_id: i64,
    name: &str,
) -> Result<(), GroupError> {
    match platform.rename_voice_room(guild_id, room_id, name).await {
        Ok(()) | Err(PlatformError::NotFound) => Ok(()),
        Err(err) => Err(err.into()),
    }
}

pub async fn info(
    platform: &dyn ChatPlatform,
    guild_id: i64,
    room_id: i64,
) -> Result<Option<RoomInfo>, GroupError> {
    Ok(platform.voice_room(guild_id, room_id).await?)
}

/// Whether the room currently has no occupants. A vanished room counts as
/// empty; callers treat that as reclaimable.
pub async fn is_empty(
    platform: &dyn ChatPlatform,
    guild_id: i64,
    room_id: i64,
) -> Result<bool, GroupError> {
    let room = platform.voice_room(guild_id, room_id).await?;
    Ok(room.map_or(true, |room| room.is_empty()))
}

/// Reuse the stored waiting room when it still exists, otherwise create a
/// fresh uncapped one.
pub async fn ensure_waiting_room(
    platform: &dyn ChatPlatform,
    guild_id: i64,
    stored_id: Option<i64>,
    name: &str,
) -> Result<i64, GroupError> {
    if let Some(room_id) = stored_id {
        if platform.voice_room(guild_id, room_id).await?.is_some() {
            return Ok(room_id);
        }
    }
    let room_id = platform.create_voice_room(guild_id, name, 0).await?;
    info!(guild_id, room_id, name, "waiting room provisioned");
    Ok(room_id)
}
