//! Listing-resource (forum thread) wrappers.

use tracing::{debug, info};

use crate::errors::{GroupError, MissingResource};
use crate::platform::{AnchorContent, ChatPlatform, PlatformError};

pub async fn create(
    platform: &dyn ChatPlatform,
    guild_id: i64,
    forum_id: i64,
    title: &str,
    body: &str,
) -> Result<i64, GroupError> {
    let listing_id = platform.create_listing(guild_id, forum_id, title, body).await?;
    info!(guild_id, listing_id, title, "listing created");
    Ok(listing_id)
}

/// Delete the listing, treating "already gone" as success.
pub async fn delete(
    platform: &dyn ChatPlatform,
    guild_id: i64,
    listing_id: i64,
) -> Result<(), GroupError> {
    match platform.delete_listing(guild_id, listing_id).await {
        Ok(()) => {
            info!(guild_id, listing_id, "listing deleted");
            Ok(())
        }
        Err(PlatformError::NotFound) => {
            debug!(guild_id, listing_id, "listing already gone");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

pub async fn update(
    platform: &dyn ChatPlatform,
    guild_id: i64,
    listing_id: i64,
    title: &str,
    body: &str,
) -> Result<(), GroupError> {
    platform
        .update_listing(guild_id, listing_id, title, body)
        .await
        .map_err(|err| match err {
            PlatformError::NotFound => GroupError::ResourceMissing(MissingResource::Listing),
            other => other.into(),
        })
}

pub async fn apply_tags(
    platform: &dyn ChatPlatform,
    guild_id: i64,
    listing_id: i64,
    tag_ids: &[i64],
) -> Result<(), GroupError> {
    Ok(platform.apply_listing_tags(guild_id, listing_id, tag_ids).await?)
}

pub async fn post_anchor(
    platform: &dyn ChatPlatform,
    guild_id: i64,
    listing_id: i64,
    content: &AnchorContent,
) -> Result<i64, GroupError> {
    Ok(platform.post_anchor_message(guild_id, listing_id, content).await?)
}

/// Edit the anchor message in place, or repost it when it has vanished.
/// Returns the new message id when a repost happened.
pub async fn refresh_anchor(
    platform: &dyn ChatPlatform,
    guild_id: i64,
    listing_id: i64,
    message_id: i64,
    content: &AnchorContent,
) -> Result<Option<i64>, GroupError> {
    match platform
        .edit_anchor_message(guild_id, listing_id, message_id, content)
        .await
    {
        Ok(()) => Ok(None),
        Err(PlatformError::NotFound) => {
            info!(guild_id, listing_id, message_id, "anchor message vanished, reposting");
            let new_id = platform.post_anchor_message(guild_id, listing_id, content).await?;
            Ok(Some(new_id))
        }
        Err(err) => Err(err.into()),
    }
}

/// Reuse the stored anchor thread when it still exists, otherwise create
/// a fresh one in the forum.
pub async fn ensure_anchor_thread(
    platform: &dyn ChatPlatform,
    guild_id: i64,
    forum_id: i64,
    stored_id: Option<i64>,
    title: &str,
    body: &str,
) -> Result<i64, GroupError> {
    if let Some(listing_id) = stored_id {
        if platform.listing_exists(guild_id, listing_id).await? {
            return Ok(listing_id);
        }
    }
    let listing_id = create(platform, guild_id, forum_id, title, body).await?;
    info!(guild_id, listing_id, "anchor thread provisioned");
    Ok(listing_id)
}

/// Reuse the stored create-button message when it still exists, otherwise
/// post a fresh prompt.
pub async fn ensure_button_message(
    platform: &dyn ChatPlatform,
    guild_id: i64,
    listing_id: i64,
    stored_id: Option<i64>,
    text: &str,
) -> Result<i64, GroupError> {
    if let Some(message_id) = stored_id {
        if platform.message_exists(guild_id, listing_id, message_id).await? {
            return Ok(message_id);
        }
    }
    let message_id = platform.post_prompt(guild_id, listing_id, text).await?;
    info!(guild_id, listing_id, message_id, "create button provisioned");
    Ok(message_id)
}
