//! Selective context resolution.
//!
//! Every workflow entrypoint receives partially-filled context: some rows
//! the caller already holds, some it wants loaded, and plenty it does not
//! care about. `Want` makes the three states explicit per field, so a
//! field the caller did not ask for is never fetched, and a value the
//! caller already holds is never re-read.

use sea_orm::ConnectionTrait;

use crate::errors::GroupError;
use crate::repos::access_lists::{self, ListKind};
use crate::repos::groups::{self, ActiveGroup};
use crate::repos::guild_settings::{self, GuildSettings};
use crate::repos::guild_tag_sets::{self, GuildTagSet};
use crate::repos::user_settings::{self, UserSettings};
use crate::repos::user_templates::{self, UserTemplate};

/// Tri-state request for one resolvable field.
///
/// `Skip` fields are omitted from the result entirely, not fetched.
/// `Have` passes a value the caller holds straight through. `Fetch` loads
/// from the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Want<T> {
    Skip,
    Have(T),
    Fetch,
}

impl<T> Default for Want<T> {
    fn default() -> Self {
        Want::Skip
    }
}

impl<T> Want<T> {
    fn is_skip(&self) -> bool {
        matches!(self, Want::Skip)
    }
}

/// Which fields to resolve. Defaults to skipping everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolveRequest {
    pub group: Want<ActiveGroup>,
    pub template: Want<UserTemplate>,
    pub settings: Want<UserSettings>,
    pub guild: Want<GuildSettings>,
    pub tag_set: Want<GuildTagSet>,
    pub allow_list: Want<Vec<i64>>,
    pub deny_list: Want<Vec<i64>>,
}

/// Resolution result. A `None` field was either skipped or fetched and
/// absent from the store; callers that asked for a field know which.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolved {
    pub group: Option<ActiveGroup>,
    pub template: Option<UserTemplate>,
    pub settings: Option<UserSettings>,
    pub guild: Option<GuildSettings>,
    pub tag_set: Option<GuildTagSet>,
    pub allow_list: Option<Vec<i64>>,
    pub deny_list: Option<Vec<i64>>,
}

pub async fn resolve<C: ConnectionTrait>(
    conn: &C,
    owner_id: i64,
    guild_id: i64,
    request: ResolveRequest,
) -> Result<Resolved, GroupError> {
    let mut resolved = Resolved::default();

    if !request.group.is_skip() {
        resolved.group = match request.group {
            Want::Have(value) => Some(value),
            _ => groups::find_by_owner(conn, owner_id, guild_id).await?,
        };
    }
    if !request.template.is_skip() {
        resolved.template = match request.template {
            Want::Have(value) => Some(value),
            _ => user_templates::find_by_owner(conn, owner_id).await?,
        };
    }
    if !request.settings.is_skip() {
        resolved.settings = match request.settings {
            Want::Have(value) => Some(value),
            _ => user_settings::find_by_owner(conn, owner_id).await?,
        };
    }
    if !request.guild.is_skip() {
        resolved.guild = match request.guild {
            Want::Have(value) => Some(value),
            _ => guild_settings::find_by_guild(conn, guild_id).await?,
        };
    }
    if !request.tag_set.is_skip() {
        resolved.tag_set = match request.tag_set {
            Want::Have(value) => Some(value),
            _ => guild_tag_sets::find_by_guild(conn, guild_id).await?,
        };
    }
    if !request.allow_list.is_skip() {
        resolved.allow_list = Some(match request.allow_list {
            Want::Have(value) => value,
            _ => access_lists::entries(conn, ListKind::Allow, owner_id).await?,
        });
    }
    if !request.deny_list.is_skip() {
        resolved.deny_list = Some(match request.deny_list {
            Want::Have(value) => value,
            _ => access_lists::entries(conn, ListKind::Deny, owner_id).await?,
        });
    }

    Ok(resolved)
}
