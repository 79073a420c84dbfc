//! The chat-platform seam.
//!
//! Everything the core needs from the remote platform (voice rooms,
//! forum listings, the tag taxonomy, member and role lookups) sits behind
//! [`ChatPlatform`]. Production wires in a gateway-backed implementation;
//! tests use an in-memory fake. The trait deliberately mirrors the remote
//! API's granularity so the orchestrator's saga steps map one-to-one onto
//! remote calls.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// The addressed resource does not exist (any more).
    #[error("resource not found")]
    NotFound,
    /// Transport or remote-side failure; the transport layer has already
    /// applied its own timeout.
    #[error("transport failure: {0}")]
    Transport(String),
}

pub type PlatformResult<T> = Result<T, PlatformError>;

/// Snapshot of a voice room: name, cap and current occupants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomInfo {
    pub id: i64,
    pub name: String,
    /// 0 means uncapped.
    pub user_limit: u32,
    pub members: Vec<i64>,
}

impl RoomInfo {
    pub fn is_full(&self) -> bool {
        self.user_limit > 0 && self.members.len() >= self.user_limit as usize
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// A live forum tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForumTag {
    pub id: i64,
    pub name: String,
}

/// Platform-side access policy for a voice room. The owner keeps manage
/// rights in every variant; `Default` is also what password mode applies,
/// since password admission has no per-member grant to express.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomAcl {
    Default { owner_id: i64 },
    AllowList { owner_id: i64, allowed: Vec<i64> },
    DenyList { owner_id: i64, denied: Vec<i64> },
}

/// Renderable state for the anchor message. The command layer owns the
/// actual embed; the core only carries the facts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorContent {
    pub owner_id: i64,
    pub voice_room_id: i64,
    pub title: String,
    pub body: String,
    pub user_limit: i32,
    pub mention_role_id: Option<i64>,
}

#[async_trait]
pub trait ChatPlatform: Send + Sync {
    // Voice rooms (session resources)

    async fn create_voice_room(
        &self,
        guild_id: i64,
        name: &str,
        user_limit: u32,
    ) -> PlatformResult<i64>;

    async fn delete_voice_room(&self, guild_id: i64, room_id: i64) -> PlatformResult<()>;

    async fn rename_voice_room(
        &self,
        guild_id: i64,
        room_id: i64,
        name: &str,
    ) -> PlatformResult<()>;

    /// `Ok(None)` when the room is gone; errors are transport-level only.
    async fn voice_room(&self, guild_id: i64, room_id: i64) -> PlatformResult<Option<RoomInfo>>;

    async fn apply_room_acl(
        &self,
        guild_id: i64,
        room_id: i64,
        acl: &RoomAcl,
    ) -> PlatformResult<()>;

    /// Move a connected member; `room_id = None` disconnects them.
    async fn move_member(
        &self,
        guild_id: i64,
        user_id: i64,
        room_id: Option<i64>,
    ) -> PlatformResult<()>;

    /// Which voice room the member currently occupies, if any.
    async fn member_voice_room(&self, guild_id: i64, user_id: i64)
        -> PlatformResult<Option<i64>>;

    async fn member_roles(&self, guild_id: i64, user_id: i64) -> PlatformResult<Vec<i64>>;

    async fn role_exists(&self, guild_id: i64, role_id: i64) -> PlatformResult<bool>;

    // Forum listings (discussion resources)

    async fn forum_exists(&self, guild_id: i64, forum_id: i64) -> PlatformResult<bool>;

    async fn create_forum(&self, guild_id: i64, name: &str) -> PlatformResult<i64>;

    async fn create_listing(
        &self,
        guild_id: i64,
        forum_id: i64,
        title: &str,
        body: &str,
    ) -> PlatformResult<i64>;

    async fn delete_listing(&self, guild_id: i64, listing_id: i64) -> PlatformResult<()>;

    async fn update_listing(
        &self,
        guild_id: i64,
        listing_id: i64,
        title: &str,
        body: &str,
    ) -> PlatformResult<()>;

    async fn listing_exists(&self, guild_id: i64, listing_id: i64) -> PlatformResult<bool>;

    async fn apply_listing_tags(
        &self,
        guild_id: i64,
        listing_id: i64,
        tag_ids: &[i64],
    ) -> PlatformResult<()>;

    // Listing messages

    async fn post_anchor_message(
        &self,
        guild_id: i64,
        listing_id: i64,
        content: &AnchorContent,
    ) -> PlatformResult<i64>;

    /// `NotFound` when the message vanished; callers recreate it.
    async fn edit_anchor_message(
        &self,
        guild_id: i64,
        listing_id: i64,
        message_id: i64,
        content: &AnchorContent,
    ) -> PlatformResult<()>;

    /// Plain prompt message, used for the persistent create-group button.
    async fn post_prompt(
        &self,
        guild_id: i64,
        listing_id: i64,
        text: &str,
    ) -> PlatformResult<i64>;

    async fn message_exists(
        &self,
        guild_id: i64,
        listing_id: i64,
        message_id: i64,
    ) -> PlatformResult<bool>;

    // Tag taxonomy

    async fn forum_tags(&self, guild_id: i64, forum_id: i64) -> PlatformResult<Vec<ForumTag>>;

    async fn create_forum_tag(
        &self,
        guild_id: i64,
        forum_id: i64,
        name: &str,
    ) -> PlatformResult<i64>;
}
