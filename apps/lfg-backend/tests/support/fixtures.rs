use std::sync::Arc;

use sea_orm::DatabaseConnection;

use lfg_backend::repos::guild_settings::{self, GuildSettings};
use lfg_backend::{ChatPlatform, GroupConfig, GroupFields, GroupFlowService};

use super::db::test_db;
use super::platform::FakePlatform;

pub const GUILD: i64 = 500;
pub const OWNER: i64 = 42;
pub const MEMBER: i64 = 77;

/// One test universe: in-memory database, fake platform and a service
/// wired over both.
pub struct TestWorld {
    pub service: GroupFlowService,
    pub platform: Arc<FakePlatform>,
    pub db: DatabaseConnection,
    pub guild_id: i64,
    pub forum_id: i64,
    pub waiting_room_id: i64,
}

impl TestWorld {
    /// World with nothing provisioned yet; `provision_guild` tests start
    /// here.
    pub async fn bare() -> Self {
        Self::bare_with(GroupConfig::default()).await
    }

    pub async fn bare_with(config: GroupConfig) -> Self {
        let db = test_db().await;
        let platform = Arc::new(FakePlatform::new());
        let service = GroupFlowService::new(
            db.clone(),
            platform.clone() as Arc<dyn ChatPlatform>,
            config,
        );
        Self {
            service,
            platform,
            db,
            guild_id: GUILD,
            forum_id: 0,
            waiting_room_id: 0,
        }
    }

    /// World with the guild already provisioned: forum, waiting room and
    /// a stored guild settings row.
    pub async fn provisioned() -> Self {
        Self::provisioned_with(GroupConfig::default()).await
    }

    pub async fn provisioned_with(config: GroupConfig) -> Self {
        let mut world = Self::bare_with(config).await;
        let forum_id = world
            .platform
            .create_forum(GUILD, "looking-for-group")
            .await
            .expect("create forum");
        let waiting_room_id = world
            .platform
            .create_voice_room(GUILD, "group-waiting-room", 0)
            .await
            .expect("create waiting room");

        let guild = GuildSettings {
            forum_channel_id: Some(forum_id),
            waiting_room_id: Some(waiting_room_id),
            ..GuildSettings::empty(GUILD)
        };
        guild_settings::save(&world.db, &guild)
            .await
            .expect("seed guild settings");

        world.forum_id = forum_id;
        world.waiting_room_id = waiting_room_id;
        world
    }

    /// Put a member into the guild's waiting room.
    pub fn seat_in_waiting_room(&self, user_id: i64) {
        self.platform.seat_member(user_id, self.waiting_room_id);
    }
}

/// Minimal valid create input.
pub fn fields(voice_name: &str, group_name: &str) -> GroupFields {
    GroupFields {
        voice_name: Some(voice_name.to_string()),
        group_name: Some(group_name.to_string()),
        ..GroupFields::default()
    }
}
