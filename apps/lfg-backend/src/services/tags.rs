//! Listing-tag resolution and taxonomy upkeep.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::config::GroupConfig;
use crate::errors::GroupError;
use crate::platform::{ChatPlatform, ForumTag};
use crate::repos::guild_tag_sets::GuildTagSet;
use crate::repos::user_templates::UserTemplate;

/// Platform ceiling on tags per listing. Enforced here, centrally, so no
/// caller has to remember to truncate.
pub const MAX_APPLIED_TAGS: usize = 5;

/// Template mod-code value marking a vanilla, no-mods group.
pub const NO_MODS_CODE: &str = "0";

/// Version buckets: a group with an in-room password runs the beta build.
pub const VERSION_STABLE: &str = "stable";
pub const VERSION_BETA: &str = "beta";

/// Resolve the tag set a listing should carry, capped at
/// [`MAX_APPLIED_TAGS`]. Order-stable: mod tag, version tag, one tag per
/// requester role with a mapping (in role order), then explicit extras.
/// Ids that do not resolve in the live taxonomy are treated as absent.
pub fn resolve_tags(
    template: &UserTemplate,
    requester_roles: &[i64],
    tag_set: &GuildTagSet,
    live_tags: &[ForumTag],
    extra_tags: &[i64],
) -> Vec<i64> {
    let live: HashSet<i64> = live_tags.iter().map(|tag| tag.id).collect();
    let mut applied: Vec<i64> = Vec::new();
    let mut push = |tag_id: i64| {
        if live.contains(&tag_id) && !applied.contains(&tag_id) {
            applied.push(tag_id);
        }
    };

    if template.mod_code.as_deref() == Some(NO_MODS_CODE) {
        if let Some(tag_id) = tag_set.no_mods_tag {
            push(tag_id);
        }
    }

    let bucket = match template.room_password.as_deref() {
        Some(password) if !password.is_empty() => VERSION_BETA,
        _ => VERSION_STABLE,
    };
    if let Some(tag_id) = tag_set.version_tags.get(bucket) {
        push(tag_id);
    }

    for role_id in requester_roles {
        if let Some(tag_id) = tag_set.role_tags.get(&role_id.to_string()) {
            push(tag_id);
        }
    }

    for &tag_id in extra_tags {
        push(tag_id);
    }

    if applied.len() > MAX_APPLIED_TAGS {
        debug!(
            resolved = applied.len(),
            cap = MAX_APPLIED_TAGS,
            "truncating applied tags"
        );
        applied.truncate(MAX_APPLIED_TAGS);
    }
    applied
}

/// Resolve one named tag: stored id if still live, else exact-name match
/// against the live taxonomy, else a freshly created tag. The name match
/// prevents duplicate creation when two provisioning runs race.
async fn resolve_named_tag(
    platform: &dyn ChatPlatform,
    guild_id: i64,
    forum_id: i64,
    live_tags: &[ForumTag],
    stored_id: Option<i64>,
    name: &str,
) -> Result<i64, GroupError> {
    if let Some(id) = stored_id {
        if live_tags.iter().any(|tag| tag.id == id) {
            return Ok(id);
        }
    }
    if let Some(existing) = live_tags.iter().find(|tag| tag.name == name) {
        return Ok(existing.id);
    }
    let id = platform.create_forum_tag(guild_id, forum_id, name).await?;
    info!(guild_id, forum_id, name, tag_id = id, "created forum tag");
    Ok(id)
}

/// Bring the stored taxonomy in line with the live forum: ensure the mod
/// tag and every configured version tag exist, and drop role mappings
/// whose role or tag has vanished. Returns the reconciled set; the caller
/// persists it.
pub async fn ensure_tag_set(
    platform: &dyn ChatPlatform,
    guild_id: i64,
    forum_id: i64,
    config: &GroupConfig,
    mut tag_set: GuildTagSet,
) -> Result<GuildTagSet, GroupError> {
    let live_tags = platform.forum_tags(guild_id, forum_id).await?;

    let no_mods = resolve_named_tag(
        platform,
        guild_id,
        forum_id,
        &live_tags,
        tag_set.no_mods_tag,
        &config.no_mods_tag_name,
    )
    .await?;
    tag_set.no_mods_tag = Some(no_mods);

    for version in &config.version_names {
        let resolved = resolve_named_tag(
            platform,
            guild_id,
            forum_id,
            &live_tags,
            tag_set.version_tags.get(version),
            version,
        )
        .await?;
        tag_set.version_tags.insert(version.clone(), resolved);
    }

    let mut kept_roles = crate::entities::guild_tag_sets::TagMap::default();
    for (role_key, tag_id) in &tag_set.role_tags.0 {
        let Ok(role_id) = role_key.parse::<i64>() else {
            continue;
        };
        if !platform.role_exists(guild_id, role_id).await? {
            continue;
        }
        if !live_tags.iter().any(|tag| tag.id == *tag_id) {
            continue;
        }
        kept_roles.insert(role_key.clone(), *tag_id);
    }
    tag_set.role_tags = kept_roles;

    Ok(tag_set)
}

/// Live tags not present in any known taxonomy bucket, for administrative
/// assignment to roles.
pub async fn unknown_tags(
    platform: &dyn ChatPlatform,
    guild_id: i64,
    forum_id: i64,
    tag_set: &GuildTagSet,
) -> Result<Vec<ForumTag>, GroupError> {
    let known: HashSet<i64> = tag_set.known_ids().into_iter().collect();
    let live = platform.forum_tags(guild_id, forum_id).await?;
    Ok(live
        .into_iter()
        .filter(|tag| !known.contains(&tag.id))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::guild_tag_sets::TagMap;

    fn live(ids: &[i64]) -> Vec<ForumTag> {
        ids.iter()
            .map(|&id| ForumTag {
                id,
                name: format!("tag-{id}"),
            })
            .collect()
    }

    fn tag_set() -> GuildTagSet {
        let mut version_tags = TagMap::default();
        version_tags.insert(VERSION_STABLE, 2);
        version_tags.insert(VERSION_BETA, 3);
        let mut role_tags = TagMap::default();
        role_tags.insert("100", 4);
        role_tags.insert("101", 5);
        role_tags.insert("102", 6);
        GuildTagSet {
            guild_id: 1,
            no_mods_tag: Some(1),
            version_tags,
            role_tags,
        }
    }

    fn template() -> UserTemplate {
        UserTemplate {
            discord_id: 7,
            mod_code: Some(NO_MODS_CODE.to_string()),
            room_password: None,
            ..UserTemplate::empty(7)
        }
    }

    #[test]
    fn precedence_is_mod_version_roles_extras() {
        let resolved = resolve_tags(
            &template(),
            &[100, 101],
            &tag_set(),
            &live(&[1, 2, 3, 4, 5, 6, 7, 8]),
            &[7],
        );
        assert_eq!(resolved, vec![1, 2, 4, 5, 7]);
    }

    #[test]
    fn caps_at_five_preserving_order() {
        let resolved = resolve_tags(
            &template(),
            &[100, 101, 102],
            &tag_set(),
            &live(&[1, 2, 3, 4, 5, 6, 7, 8]),
            &[7, 8],
        );
        assert_eq!(resolved.len(), MAX_APPLIED_TAGS);
        assert_eq!(resolved, vec![1, 2, 4, 5, 6]);
    }

    #[test]
    fn room_password_selects_beta_bucket() {
        let mut with_password = template();
        with_password.room_password = Some("hunter2".to_string());
        let resolved = resolve_tags(&with_password, &[], &tag_set(), &live(&[1, 2, 3]), &[]);
        assert_eq!(resolved, vec![1, 3]);
    }

    #[test]
    fn dead_tag_ids_are_treated_as_absent() {
        // Only the stable version tag is still live.
        let resolved = resolve_tags(&template(), &[100], &tag_set(), &live(&[2]), &[9]);
        assert_eq!(resolved, vec![2]);
    }

    #[test]
    fn mod_tag_skipped_without_no_mods_code() {
        let mut modded = template();
        modded.mod_code = Some("ABC123".to_string());
        let resolved = resolve_tags(&modded, &[], &tag_set(), &live(&[1, 2, 3]), &[]);
        assert_eq!(resolved, vec![2]);
    }
}
