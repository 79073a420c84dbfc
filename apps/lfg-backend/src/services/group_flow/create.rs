use tracing::{info, warn};

use super::{CreatedGroup, GroupFields, GroupFlowService};
use crate::errors::GroupError;
use crate::platform::AnchorContent;
use crate::repos::guild_settings::GuildSettings;
use crate::repos::guild_tag_sets::GuildTagSet;
use crate::repos::user_settings::{self, UserSettings};
use crate::repos::user_templates::{self, UserTemplate};
use crate::repos::{groups, users};
use crate::services::access_control::{self, AccessMode};
use crate::services::resolver::{self, ResolveRequest, Want};
use crate::services::{listings, rooms, tags};

impl GroupFlowService {
    /// Create the full group bundle: voice room, listing, tags, anchor
    /// message and the active-group row.
    ///
    /// There is no platform-level transaction across these resources, so
    /// the sequence runs as a saga: once the room exists, any later
    /// failure deletes whatever was already created before the error is
    /// surfaced. The per-(owner, guild) lock is held throughout so a
    /// racing duplicate create waits and then fails the row check.
    pub async fn create_group(
        &self,
        owner_id: i64,
        guild_id: i64,
        owner_name: Option<&str>,
        fields: GroupFields,
    ) -> Result<CreatedGroup, GroupError> {
        let lock = self.create_lock(owner_id, guild_id);
        let result = {
            let _guard = lock.lock().await;
            self.create_group_locked(owner_id, guild_id, owner_name, fields)
                .await
        };
        drop(lock);
        self.release_create_lock(owner_id, guild_id);
        result
    }

    async fn create_group_locked(
        &self,
        owner_id: i64,
        guild_id: i64,
        owner_name: Option<&str>,
        fields: GroupFields,
    ) -> Result<CreatedGroup, GroupError> {
        if groups::find_by_owner(&self.db, owner_id, guild_id).await?.is_some() {
            return Err(GroupError::DuplicateGroup);
        }
        users::ensure(&self.db, owner_id, owner_name).await?;

        let resolved = resolver::resolve(
            &self.db,
            owner_id,
            guild_id,
            ResolveRequest {
                template: Want::Fetch,
                settings: Want::Fetch,
                guild: Want::Fetch,
                tag_set: Want::Fetch,
                allow_list: Want::Fetch,
                deny_list: Want::Fetch,
                ..Default::default()
            },
        )
        .await?;
        let mut template = resolved
            .template
            .unwrap_or_else(|| UserTemplate::empty(owner_id));
        let mut settings = resolved
            .settings
            .unwrap_or_else(|| UserSettings::defaults(owner_id));
        let guild = resolved.guild.unwrap_or_else(|| GuildSettings::empty(guild_id));
        let tag_set = resolved.tag_set.unwrap_or_else(|| GuildTagSet::empty(guild_id));
        let allow_list = resolved.allow_list.unwrap_or_default();
        let deny_list = resolved.deny_list.unwrap_or_default();

        fields.merge_into(&mut template, &mut settings);
        let voice_name = template
            .voice_name
            .clone()
            .ok_or(GroupError::MissingTemplateField("voice_name"))?;
        let group_name = template
            .group_name
            .clone()
            .ok_or(GroupError::MissingTemplateField("group_name"))?;
        let body = template.group_description.clone().unwrap_or_default();

        let forum_id = guild
            .forum_channel_id
            .ok_or_else(|| GroupError::config("guild has no forum channel provisioned"))?;
        let waiting_room_id = guild
            .waiting_room_id
            .ok_or_else(|| GroupError::config("guild has no waiting room provisioned"))?;
        let mode = AccessMode::from_i16(settings.limit_mode)?;

        let platform = self.platform.as_ref();
        let room_id =
            rooms::create(platform, guild_id, &voice_name, settings.user_limit.max(0) as u32)
                .await?;

        let mut created_listing: Option<i64> = None;
        let outcome: Result<(i64, i64), GroupError> = async {
            access_control::reconcile(
                platform, guild_id, room_id, owner_id, mode, &allow_list, &deny_list,
            )
            .await?;

            let listing_id =
                listings::create(platform, guild_id, forum_id, &group_name, &body).await?;
            created_listing = Some(listing_id);

            let live_tags = platform.forum_tags(guild_id, forum_id).await?;
            let roles = platform.member_roles(guild_id, owner_id).await?;
            let tag_ids = tags::resolve_tags(&template, &roles, &tag_set, &live_tags, &[]);
            listings::apply_tags(platform, guild_id, listing_id, &tag_ids).await?;

            let anchor = AnchorContent {
                owner_id,
                voice_room_id: room_id,
                title: group_name.clone(),
                body: body.clone(),
                user_limit: settings.user_limit,
                mention_role_id: guild.mention_role_id,
            };
            let anchor_id = listings::post_anchor(platform, guild_id, listing_id, &anchor).await?;

            groups::insert(&self.db, owner_id, guild_id, room_id, listing_id, anchor_id).await?;
            Ok((listing_id, anchor_id))
        }
        .await;

        let (listing_id, anchor_message_id) = match outcome {
            Ok(ids) => ids,
            Err(err) => {
                warn!(owner_id, guild_id, error = %err, "create failed, compensating");
                if let Some(listing_id) = created_listing {
                    if let Err(comp) = listings::delete(platform, guild_id, listing_id).await {
                        warn!(guild_id, listing_id, error = %comp, "compensating listing delete failed");
                    }
                }
                if let Err(comp) = rooms::delete(platform, guild_id, room_id).await {
                    warn!(guild_id, room_id, error = %comp, "compensating room delete failed");
                }
                return Err(err);
            }
        };

        template.create_count += 1;
        user_templates::save(&self.db, &template).await?;
        user_settings::save(&self.db, &settings).await?;

        // Freshly created rooms start empty; arm reclamation right away.
        self.handle_occupancy_change(guild_id, room_id).await?;

        let mut owner_moved = false;
        if platform.member_voice_room(guild_id, owner_id).await? == Some(waiting_room_id) {
            platform.move_member(guild_id, owner_id, Some(room_id)).await?;
            owner_moved = true;
            self.handle_occupancy_change(guild_id, room_id).await?;
        }

        info!(owner_id, guild_id, room_id, listing_id, owner_moved, "group created");
        Ok(CreatedGroup {
            voice_room_id: room_id,
            listing_id,
            anchor_message_id,
            owner_moved,
        })
    }
}
