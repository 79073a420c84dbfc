use tracing::{debug, warn};

use super::GroupFlowService;
use crate::errors::GroupError;
use crate::repos::groups;
use crate::services::rooms;

impl GroupFlowService {
    /// React to a membership change in `room_id`. Rooms that are not a
    /// group's voice room are ignored. An empty room arms the idle-timeout
    /// reclamation; a re-occupied room disarms it. A room that vanished
    /// out from under its group tears the group down immediately.
    ///
    /// Emptiness is re-checked when the timer fires, so a member who
    /// leaves and comes back within the window keeps the group alive.
    pub async fn handle_occupancy_change(
        &self,
        guild_id: i64,
        room_id: i64,
    ) -> Result<(), GroupError> {
        let Some(group) = groups::find_by_voice_room(&self.db, guild_id, room_id).await? else {
            return Ok(());
        };

        let Some(room) = rooms::info(self.platform.as_ref(), guild_id, room_id).await? else {
            warn!(guild_id, room_id, owner_id = group.owner_id, "voice room vanished, tearing group down");
            return self.delete_group(group.owner_id, guild_id).await;
        };

        if room.is_empty() {
            let cond = {
                let service = self.clone();
                async move {
                    rooms::is_empty(service.platform.as_ref(), guild_id, room_id)
                        .await
                        .unwrap_or(false)
                }
            };
            let action = {
                let service = self.clone();
                let owner_id = group.owner_id;
                async move {
                    if let Err(err) = service.delete_group(owner_id, guild_id).await {
                        warn!(owner_id, guild_id, room_id, error = %err, "idle reclamation failed");
                    }
                }
            };
            if self.scheduler.start(room_id, self.config.idle_timeout, cond, action) {
                debug!(guild_id, room_id, "room empty, reclamation armed");
            }
        } else if self.scheduler.cancel(room_id) {
            debug!(guild_id, room_id, "room occupied, reclamation disarmed");
        }

        Ok(())
    }
}
