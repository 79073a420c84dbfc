use tracing::info;

use super::{GroupFields, GroupFlowService};
use crate::errors::GroupError;
use crate::platform::AnchorContent;
use crate::repos::guild_settings::GuildSettings;
use crate::repos::guild_tag_sets::GuildTagSet;
use crate::repos::user_settings::{self, UserSettings};
use crate::repos::user_templates::{self, UserTemplate};
use crate::repos::groups;
use crate::services::resolver::{self, ResolveRequest, Want};
use crate::services::{listings, rooms, tags};

impl GroupFlowService {
    /// Re-render the bundle from updated template fields. Provided fields
    /// overwrite, blank fields preserve prior values, tags are re-resolved
    /// (merging any explicitly selected extras), and a vanished anchor
    /// message is reposted with the row updated to match.
    pub async fn update_group(
        &self,
        owner_id: i64,
        guild_id: i64,
        fields: GroupFields,
        extra_tags: &[i64],
    ) -> Result<(), GroupError> {
        let resolved = resolver::resolve(
            &self.db,
            owner_id,
            guild_id,
            ResolveRequest {
                group: Want::Fetch,
                template: Want::Fetch,
                settings: Want::Fetch,
                guild: Want::Fetch,
                tag_set: Want::Fetch,
                ..Default::default()
            },
        )
        .await?;
        let group = resolved.group.ok_or(GroupError::NoActiveGroup)?;
        let mut template = resolved
            .template
            .unwrap_or_else(|| UserTemplate::empty(owner_id));
        let mut settings = resolved
            .settings
            .unwrap_or_else(|| UserSettings::defaults(owner_id));
        let guild = resolved.guild.unwrap_or_else(|| GuildSettings::empty(guild_id));
        let tag_set = resolved.tag_set.unwrap_or_else(|| GuildTagSet::empty(guild_id));

        fields.merge_into(&mut template, &mut settings);
        let title = template
            .group_name
            .clone()
            .ok_or(GroupError::MissingTemplateField("group_name"))?;
        let body = template.group_description.clone().unwrap_or_default();
        let forum_id = guild
            .forum_channel_id
            .ok_or_else(|| GroupError::config("guild has no forum channel provisioned"))?;

        user_templates::save(&self.db, &template).await?;
        user_settings::save(&self.db, &settings).await?;

        let platform = self.platform.as_ref();
        listings::update(platform, guild_id, group.listing_id, &title, &body).await?;
        if let Some(voice_name) = &template.voice_name {
            rooms::rename(platform, guild_id, group.voice_room_id, voice_name).await?;
        }

        let live_tags = platform.forum_tags(guild_id, forum_id).await?;
        let roles = platform.member_roles(guild_id, owner_id).await?;
        let tag_ids = tags::resolve_tags(&template, &roles, &tag_set, &live_tags, extra_tags);
        listings::apply_tags(platform, guild_id, group.listing_id, &tag_ids).await?;

        let anchor = AnchorContent {
            owner_id,
            voice_room_id: group.voice_room_id,
            title,
            body,
            user_limit: settings.user_limit,
            mention_role_id: guild.mention_role_id,
        };
        if let Some(new_anchor_id) = listings::refresh_anchor(
            platform,
            guild_id,
            group.listing_id,
            group.anchor_message_id,
            &anchor,
        )
        .await?
        {
            groups::set_anchor_message(&self.db, owner_id, guild_id, new_anchor_id).await?;
        }

        info!(owner_id, guild_id, listing_id = group.listing_id, "group updated");
        Ok(())
    }
}
