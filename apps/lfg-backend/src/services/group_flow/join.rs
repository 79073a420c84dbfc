use tracing::info;

use super::GroupFlowService;
use crate::errors::{GroupError, MissingResource};
use crate::repos::guild_settings::GuildSettings;
use crate::repos::user_settings::UserSettings;
use crate::services::access_control::{self, AccessMode, JoinDecision};
use crate::services::resolver::{self, ResolveRequest, Want};
use crate::services::rooms;

/// Non-error outcomes of a join request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    Admitted,
    /// Password mode: the requester must answer the password challenge;
    /// the decision is finalized by `submit_join_password`.
    ChallengeRequired,
}

impl GroupFlowService {
    /// Admission check for a member asking to join `room_id`. The
    /// requester has to be waiting in the guild's waiting room, the room
    /// must have space, and the owner's access mode decides the rest.
    pub async fn handle_join_request(
        &self,
        requester_id: i64,
        guild_id: i64,
        room_id: i64,
        owner_id: i64,
    ) -> Result<JoinOutcome, GroupError> {
        self.admission(requester_id, guild_id, room_id, owner_id, None).await
    }

    /// Second step of the password challenge. Deny for password mode is
    /// reported here, asynchronously relative to the original request.
    pub async fn submit_join_password(
        &self,
        requester_id: i64,
        guild_id: i64,
        room_id: i64,
        owner_id: i64,
        supplied_password: &str,
    ) -> Result<JoinOutcome, GroupError> {
        self.admission(requester_id, guild_id, room_id, owner_id, Some(supplied_password))
            .await
    }

    async fn admission(
        &self,
        requester_id: i64,
        guild_id: i64,
        room_id: i64,
        owner_id: i64,
        supplied_password: Option<&str>,
    ) -> Result<JoinOutcome, GroupError> {
        let resolved = resolver::resolve(
            &self.db,
            owner_id,
            guild_id,
            ResolveRequest {
                settings: Want::Fetch,
                guild: Want::Fetch,
                allow_list: Want::Fetch,
                deny_list: Want::Fetch,
                ..Default::default()
            },
        )
        .await?;
        let settings = resolved
            .settings
            .unwrap_or_else(|| UserSettings::defaults(owner_id));
        let guild = resolved.guild.unwrap_or_else(|| GuildSettings::empty(guild_id));
        let allow_list = resolved.allow_list.unwrap_or_default();
        let deny_list = resolved.deny_list.unwrap_or_default();

        let waiting_room_id = guild
            .waiting_room_id
            .ok_or_else(|| GroupError::config("guild has no waiting room provisioned"))?;

        let platform = self.platform.as_ref();
        if platform.member_voice_room(guild_id, requester_id).await? != Some(waiting_room_id) {
            return Err(GroupError::NotInWaitingRoom);
        }

        let room = rooms::info(platform, guild_id, room_id)
            .await?
            .ok_or(GroupError::ResourceMissing(MissingResource::VoiceRoom))?;
        if room.is_full() {
            return Err(GroupError::RoomFull);
        }

        let mode = AccessMode::from_i16(settings.limit_mode)?;
        let decision = access_control::decide(
            requester_id,
            mode,
            &allow_list,
            &deny_list,
            supplied_password,
            settings.group_password.as_deref(),
        );

        match decision {
            JoinDecision::Allow => {
                platform.move_member(guild_id, requester_id, Some(room_id)).await?;
                self.handle_occupancy_change(guild_id, room_id).await?;
                info!(requester_id, guild_id, room_id, ?mode, "member admitted");
                Ok(JoinOutcome::Admitted)
            }
            JoinDecision::ChallengeRequired => Ok(JoinOutcome::ChallengeRequired),
            JoinDecision::Deny(reason) => Err(GroupError::AccessDenied(reason)),
        }
    }
}
