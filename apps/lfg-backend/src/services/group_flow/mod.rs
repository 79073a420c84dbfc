//! Group lifecycle orchestration - sequences rooms, listings, tags, access
//! control and persistence into the create / update / delete / join /
//! mode-change workflows, and owns the one-group-per-owner invariant.

mod access;
mod create;
mod delete;
mod join;
mod occupancy;
mod provision;
mod update;

use std::sync::Arc;

use dashmap::DashMap;
use sea_orm::DatabaseConnection;
use tokio::sync::Mutex;

use crate::config::GroupConfig;
use crate::platform::ChatPlatform;
use crate::repos::user_settings::UserSettings;
use crate::repos::user_templates::UserTemplate;
use crate::services::scheduler::ReclaimScheduler;

pub use join::JoinOutcome;

/// Group flow service. Cheap to clone; every clone shares the scheduler
/// registry and the per-owner create locks.
#[derive(Clone)]
pub struct GroupFlowService {
    db: DatabaseConnection,
    platform: Arc<dyn ChatPlatform>,
    scheduler: ReclaimScheduler,
    config: Arc<GroupConfig>,
    create_locks: Arc<DashMap<(i64, i64), Arc<Mutex<()>>>>,
}

impl GroupFlowService {
    pub fn new(db: DatabaseConnection, platform: Arc<dyn ChatPlatform>, config: GroupConfig) -> Self {
        Self {
            db,
            platform,
            scheduler: ReclaimScheduler::new(),
            config: Arc::new(config),
            create_locks: Arc::new(DashMap::new()),
        }
    }

    pub fn scheduler(&self) -> &ReclaimScheduler {
        &self.scheduler
    }

    /// Mutual-exclusion token for one (owner, guild) pair, held for the
    /// duration of the create saga so two near-simultaneous creates cannot
    /// both pass the "no existing row" check.
    fn create_lock(&self, owner_id: i64, guild_id: i64) -> Arc<Mutex<()>> {
        self.create_locks
            .entry((owner_id, guild_id))
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Drop the lock entry once no create is using it, so the map does not
    /// accumulate one entry per owner ever seen. A racing create holds its
    /// own clone of the `Arc`, which keeps the strong count above one and
    /// the entry in place.
    fn release_create_lock(&self, owner_id: i64, guild_id: i64) {
        self.create_locks
            .remove_if(&(owner_id, guild_id), |_, entry| Arc::strong_count(entry) == 1);
    }
}

/// Form input for create and update. `None` means the field was not
/// submitted; blank strings preserve the previously stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupFields {
    pub voice_name: Option<String>,
    pub group_name: Option<String>,
    pub group_description: Option<String>,
    pub mod_code: Option<String>,
    pub room_password: Option<String>,
    pub user_limit: Option<i32>,
}

impl GroupFields {
    fn merge_into(&self, template: &mut UserTemplate, settings: &mut UserSettings) {
        fn merge(target: &mut Option<String>, input: &Option<String>) {
            if let Some(value) = input {
                if !value.trim().is_empty() {
                    *target = Some(value.clone());
                }
            }
        }
        merge(&mut template.voice_name, &self.voice_name);
        merge(&mut template.group_name, &self.group_name);
        merge(&mut template.group_description, &self.group_description);
        merge(&mut template.mod_code, &self.mod_code);
        merge(&mut template.room_password, &self.room_password);
        if let Some(limit) = self.user_limit {
            settings.user_limit = limit.max(0);
        }
    }
}

/// What a successful create hands back to the command layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedGroup {
    pub voice_room_id: i64,
    pub listing_id: i64,
    pub anchor_message_id: i64,
    /// Whether the owner was already waiting and got moved in. When false
    /// the room is reclaimed unless someone joins within the idle timeout.
    pub owner_moved: bool,
}
