//! Access-control decisions and reconciliation.
//!
//! Four mutually exclusive modes per owner. `decide` is the pure admission
//! check; `reconcile` applies a mode to the live voice room, both the
//! platform ACL and the currently-present members. Mode changes reconcile
//! before the new mode is persisted, so a stored mode never outlives its
//! enforcement.

use tracing::info;

use crate::errors::{DenyReason, GroupError, MissingResource};
use crate::platform::{ChatPlatform, RoomAcl};

/// Admission policy modes, stored as 0..3 in `user_settings.limit_mode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    Open,
    AllowList,
    DenyList,
    Password,
}

impl AccessMode {
    pub const fn as_i16(self) -> i16 {
        match self {
            AccessMode::Open => 0,
            AccessMode::AllowList => 1,
            AccessMode::DenyList => 2,
            AccessMode::Password => 3,
        }
    }

    pub fn from_i16(value: i16) -> Result<Self, GroupError> {
        match value {
            0 => Ok(AccessMode::Open),
            1 => Ok(AccessMode::AllowList),
            2 => Ok(AccessMode::DenyList),
            3 => Ok(AccessMode::Password),
            other => Err(GroupError::Db(format!(
                "invalid limit_mode {other} stored for owner settings"
            ))),
        }
    }
}

/// Outcome of an admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinDecision {
    Allow,
    Deny(DenyReason),
    /// Password mode with no password supplied yet: the decision is
    /// finalized later via `submit_join_password`.
    ChallengeRequired,
}

/// Pure admission decision for one requester.
///
/// Password comparison is exact: case-sensitive, no normalization.
pub fn decide(
    requester_id: i64,
    mode: AccessMode,
    allow_list: &[i64],
    deny_list: &[i64],
    supplied_password: Option<&str>,
    stored_password: Option<&str>,
) -> JoinDecision {
    match mode {
        AccessMode::Open => JoinDecision::Allow,
        AccessMode::AllowList => {
            if allow_list.contains(&requester_id) {
                JoinDecision::Allow
            } else {
                JoinDecision::Deny(DenyReason::NotOnAllowList)
            }
        }
        AccessMode::DenyList => {
            if deny_list.contains(&requester_id) {
                JoinDecision::Deny(DenyReason::OnDenyList)
            } else {
                JoinDecision::Allow
            }
        }
        AccessMode::Password => match supplied_password {
            None => JoinDecision::ChallengeRequired,
            Some(supplied) => {
                if stored_password == Some(supplied) {
                    JoinDecision::Allow
                } else {
                    JoinDecision::Deny(DenyReason::WrongPassword)
                }
            }
        },
    }
}

/// The platform ACL a mode translates to. The owner keeps manage rights in
/// every mode; password mode has no per-member grant to express, so it
/// resets to the default policy.
pub fn acl_for_mode(
    mode: AccessMode,
    owner_id: i64,
    allow_list: &[i64],
    deny_list: &[i64],
) -> RoomAcl {
    match mode {
        AccessMode::Open | AccessMode::Password => RoomAcl::Default { owner_id },
        AccessMode::AllowList => RoomAcl::AllowList {
            owner_id,
            allowed: allow_list.to_vec(),
        },
        AccessMode::DenyList => RoomAcl::DenyList {
            owner_id,
            denied: deny_list.to_vec(),
        },
    }
}

/// Apply `mode` to the live room: push the ACL, then move out every
/// present non-owner member who would not be admitted under the new mode.
/// Evicted members are disconnected, never banned. Open mode resets the
/// ACL without evicting anyone; password mode evicts all non-owners.
pub async fn reconcile(
    platform: &dyn ChatPlatform,
    guild_id: i64,
    room_id: i64,
    owner_id: i64,
    mode: AccessMode,
    allow_list: &[i64],
    deny_list: &[i64],
) -> Result<(), GroupError> {
    let acl = acl_for_mode(mode, owner_id, allow_list, deny_list);
    platform
        .apply_room_acl(guild_id, room_id, &acl)
        .await
        .map_err(|err| match err {
            crate::platform::PlatformError::NotFound => {
                GroupError::ResourceMissing(MissingResource::VoiceRoom)
            }
            other => other.into(),
        })?;

    let Some(room) = platform.voice_room(guild_id, room_id).await? else {
        return Err(GroupError::ResourceMissing(MissingResource::VoiceRoom));
    };

    let mut evicted = 0usize;
    for member in room.members {
        if member == owner_id {
            continue;
        }
        let keep = match mode {
            AccessMode::Open => true,
            AccessMode::AllowList => allow_list.contains(&member),
            AccessMode::DenyList => !deny_list.contains(&member),
            AccessMode::Password => false,
        };
        if !keep {
            platform.move_member(guild_id, member, None).await?;
            evicted += 1;
        }
    }

    info!(guild_id, room_id, ?mode, evicted, "room reconciled");
    Ok(())
}
