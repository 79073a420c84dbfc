use tracing::{debug, info};

use super::GroupFlowService;
use crate::errors::GroupError;
use crate::repos::user_settings::{self, UserSettings};
use crate::repos::user_templates::{self, UserTemplate};
use crate::repos::groups;
use crate::services::resolver::{self, ResolveRequest, Want};
use crate::services::{listings, rooms};

impl GroupFlowService {
    /// Tear the bundle down. Idempotent: no row means nothing to do, and
    /// resources that are already gone are tolerated.
    ///
    /// Before the room goes away its current name and cap are snapshotted
    /// back into the owner's template and settings, so the next create
    /// starts from the values the group actually ended with.
    pub async fn delete_group(&self, owner_id: i64, guild_id: i64) -> Result<(), GroupError> {
        let Some(group) = groups::find_by_owner(&self.db, owner_id, guild_id).await? else {
            debug!(owner_id, guild_id, "delete with no active group, nothing to do");
            return Ok(());
        };

        let resolved = resolver::resolve(
            &self.db,
            owner_id,
            guild_id,
            ResolveRequest {
                template: Want::Fetch,
                settings: Want::Fetch,
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

        let platform = self.platform.as_ref();
        if let Some(room) = rooms::info(platform, guild_id, group.voice_room_id).await? {
            template.voice_name = Some(room.name);
            settings.user_limit = room.user_limit as i32;
        }

        rooms::delete(platform, guild_id, group.voice_room_id).await?;
        listings::delete(platform, guild_id, group.listing_id).await?;

        user_templates::save(&self.db, &template).await?;
        user_settings::save(&self.db, &settings).await?;
        groups::delete(&self.db, owner_id, guild_id).await?;
        self.scheduler.cancel(group.voice_room_id);

        info!(owner_id, guild_id, room_id = group.voice_room_id, "group deleted");
        Ok(())
    }
}
