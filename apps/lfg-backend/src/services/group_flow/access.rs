use tracing::info;

use super::GroupFlowService;
use crate::errors::GroupError;
use crate::repos::access_lists::{self, ListKind};
use crate::repos::user_settings::{self, UserSettings};
use crate::services::access_control::{self, AccessMode};
use crate::services::resolver::{self, ResolveRequest, Want};

impl GroupFlowService {
    /// Switch the owner's access mode, reconciling the live room first so
    /// the stored mode never gets ahead of its enforcement. Reconciliation
    /// evicts present members the new mode would not admit. Fails with
    /// `NoActiveGroup` when the owner has no group in this guild.
    ///
    /// `password` is only read in password mode; passing one in any other
    /// mode is ignored, and switching away from password mode clears it.
    pub async fn change_access_mode(
        &self,
        owner_id: i64,
        guild_id: i64,
        mode: AccessMode,
        password: Option<String>,
    ) -> Result<(), GroupError> {
        let resolved = resolver::resolve(
            &self.db,
            owner_id,
            guild_id,
            ResolveRequest {
                group: Want::Fetch,
                settings: Want::Fetch,
                allow_list: Want::Fetch,
                deny_list: Want::Fetch,
                ..Default::default()
            },
        )
        .await?;
        let group = resolved.group.ok_or(GroupError::NoActiveGroup)?;
        let mut settings = resolved
            .settings
            .unwrap_or_else(|| UserSettings::defaults(owner_id));
        let allow_list = resolved.allow_list.unwrap_or_default();
        let deny_list = resolved.deny_list.unwrap_or_default();

        access_control::reconcile(
            self.platform.as_ref(),
            guild_id,
            group.voice_room_id,
            owner_id,
            mode,
            &allow_list,
            &deny_list,
        )
        .await?;

        settings.limit_mode = mode.as_i16();
        settings.group_password = match mode {
            AccessMode::Password => password,
            _ => None,
        };
        user_settings::save(&self.db, &settings).await?;

        info!(owner_id, guild_id, ?mode, "access mode changed");
        Ok(())
    }

    /// Flip one subject on the owner's allow or deny list, then re-apply
    /// the active mode to the live room when that list is the one in
    /// force. An owner with no group just edits the stored list.
    ///
    /// Returns whether the subject is on the list after the toggle.
    pub async fn toggle_list_entry(
        &self,
        owner_id: i64,
        guild_id: i64,
        kind: ListKind,
        subject_id: i64,
    ) -> Result<bool, GroupError> {
        let present = access_lists::contains(&self.db, kind, owner_id, subject_id).await?;
        if present {
            access_lists::remove(&self.db, kind, owner_id, subject_id).await?;
        } else {
            access_lists::add(&self.db, kind, owner_id, subject_id).await?;
        }
        let now_present = !present;

        let resolved = resolver::resolve(
            &self.db,
            owner_id,
            guild_id,
            ResolveRequest {
                group: Want::Fetch,
                settings: Want::Fetch,
                allow_list: Want::Fetch,
                deny_list: Want::Fetch,
                ..Default::default()
            },
        )
        .await?;

        if let Some(group) = resolved.group {
            let settings = resolved
                .settings
                .unwrap_or_else(|| UserSettings::defaults(owner_id));
            let mode = AccessMode::from_i16(settings.limit_mode)?;
            let governs = matches!(
                (mode, kind),
                (AccessMode::AllowList, ListKind::Allow) | (AccessMode::DenyList, ListKind::Deny)
            );
            if governs {
                access_control::reconcile(
                    self.platform.as_ref(),
                    guild_id,
                    group.voice_room_id,
                    owner_id,
                    mode,
                    &resolved.allow_list.unwrap_or_default(),
                    &resolved.deny_list.unwrap_or_default(),
                )
                .await?;
            }
        }

        info!(owner_id, guild_id, subject_id, now_present, "list entry toggled");
        Ok(now_present)
    }
}
