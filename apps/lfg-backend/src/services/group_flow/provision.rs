use tracing::info;

use super::GroupFlowService;
use crate::errors::GroupError;
use crate::platform::ForumTag;
use crate::repos::guild_settings::{self, GuildSettings};
use crate::repos::guild_tag_sets::{self, GuildTagSet};
use crate::services::{listings, rooms, tags};

const ANCHOR_THREAD_TITLE: &str = "Start a group";
const ANCHOR_THREAD_BODY: &str =
    "Press the button below to open your own group, or browse the listings in this forum.";
const CREATE_BUTTON_PROMPT: &str = "Create a group";

impl GroupFlowService {
    /// Bring a guild's shared infrastructure up to date: forum channel,
    /// anchor thread with the create button, waiting room and the tag
    /// taxonomy. Every step reuses the stored resource when it still
    /// exists, so re-running after a restart or a manual deletion only
    /// recreates what is actually missing.
    ///
    /// Stored ids are only ever replaced with fresh ones, never cleared.
    pub async fn provision_guild(&self, guild_id: i64) -> Result<GuildSettings, GroupError> {
        let mut guild = guild_settings::find_by_guild(&self.db, guild_id)
            .await?
            .unwrap_or_else(|| GuildSettings::empty(guild_id));
        let tag_set = guild_tag_sets::find_by_guild(&self.db, guild_id)
            .await?
            .unwrap_or_else(|| GuildTagSet::empty(guild_id));

        let platform = self.platform.as_ref();

        let forum_id = match guild.forum_channel_id {
            Some(id) if platform.forum_exists(guild_id, id).await? => id,
            _ => {
                let id = platform.create_forum(guild_id, &self.config.forum_name).await?;
                info!(guild_id, forum_id = id, "forum channel provisioned");
                id
            }
        };
        guild.forum_channel_id = Some(forum_id);

        let anchor_thread_id = listings::ensure_anchor_thread(
            platform,
            guild_id,
            forum_id,
            guild.anchor_thread_id,
            ANCHOR_THREAD_TITLE,
            ANCHOR_THREAD_BODY,
        )
        .await?;
        guild.anchor_thread_id = Some(anchor_thread_id);

        let create_button_id = listings::ensure_button_message(
            platform,
            guild_id,
            anchor_thread_id,
            guild.create_button_id,
            CREATE_BUTTON_PROMPT,
        )
        .await?;
        guild.create_button_id = Some(create_button_id);

        let waiting_room_id = rooms::ensure_waiting_room(
            platform,
            guild_id,
            guild.waiting_room_id,
            &self.config.waiting_room_name,
        )
        .await?;
        guild.waiting_room_id = Some(waiting_room_id);

        let tag_set =
            tags::ensure_tag_set(platform, guild_id, forum_id, &self.config, tag_set).await?;

        guild_settings::save(&self.db, &guild).await?;
        guild_tag_sets::save(&self.db, &tag_set).await?;

        info!(guild_id, forum_id, waiting_room_id, "guild provisioned");
        Ok(guild)
    }

    /// Live forum tags that no taxonomy bucket accounts for yet, so an
    /// administrator can map them to roles.
    pub async fn list_unknown_tags(&self, guild_id: i64) -> Result<Vec<ForumTag>, GroupError> {
        let guild = guild_settings::find_by_guild(&self.db, guild_id)
            .await?
            .unwrap_or_else(|| GuildSettings::empty(guild_id));
        let forum_id = guild
            .forum_channel_id
            .ok_or_else(|| GroupError::config("guild has no forum channel provisioned"))?;
        let tag_set = guild_tag_sets::find_by_guild(&self.db, guild_id)
            .await?
            .unwrap_or_else(|| GuildTagSet::empty(guild_id));
        tags::unknown_tags(self.platform.as_ref(), guild_id, forum_id, &tag_set).await
    }
}
