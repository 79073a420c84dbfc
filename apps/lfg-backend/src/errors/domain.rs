//! Domain-level error type used across services and repos.
//!
//! This error type is UI- and transport-agnostic. The command layer decides
//! how to render each kind; `GroupError::user_visible` tells it whether a
//! failure is safe to echo back to the member who triggered it, or should be
//! reported as a generic internal failure.

use sea_orm::DbErr;
use thiserror::Error;

use crate::platform::PlatformError;

/// Why a join request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    NotOnAllowList,
    OnDenyList,
    WrongPassword,
}

/// Which externally-held resource turned out to be gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingResource {
    VoiceRoom,
    Listing,
    AnchorMessage,
    WaitingRoom,
    Forum,
}

/// Central error type for the group lifecycle core.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GroupError {
    /// Create called while an active group row already exists for this
    /// owner in this guild.
    #[error("owner already has an active group in this guild")]
    DuplicateGroup,

    /// Update or mode change with no active group row to operate on.
    #[error("no active group for this owner in this guild")]
    NoActiveGroup,

    /// A template field was blank and had no previously stored value.
    #[error("required field `{0}` is blank and has no stored value")]
    MissingTemplateField(&'static str),

    /// Join request from a member who is not in the waiting room.
    #[error("requester is not in the waiting room")]
    NotInWaitingRoom,

    /// Join request against a voice room at capacity.
    #[error("voice room is at capacity")]
    RoomFull,

    /// Join request refused by the access-control decision.
    #[error("access denied: {0:?}")]
    AccessDenied(DenyReason),

    /// A session or listing resource vanished out-of-band.
    #[error("{0:?} no longer exists on the platform")]
    ResourceMissing(MissingResource),

    /// Transport or platform-side failure. Logged and surfaced as a generic
    /// failure; no automatic retry inside this core.
    #[error("platform call failed: {0}")]
    ExternalService(String),

    /// Database failure.
    #[error("database error: {0}")]
    Db(String),

    /// Missing or malformed configuration, including an unprovisioned guild.
    #[error("configuration error: {0}")]
    Config(String),
}

impl GroupError {
    /// Whether the failure is addressed to the member who caused it.
    ///
    /// User-visible kinds get an ephemeral explanation upstream; everything
    /// else is rendered as a generic internal failure.
    pub fn user_visible(&self) -> bool {
        matches!(
            self,
            GroupError::DuplicateGroup
                | GroupError::NoActiveGroup
                | GroupError::MissingTemplateField(_)
                | GroupError::NotInWaitingRoom
                | GroupError::RoomFull
                | GroupError::AccessDenied(_)
        )
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config(detail.into())
    }
}

impl From<DbErr> for GroupError {
    fn from(err: DbErr) -> Self {
        GroupError::Db(err.to_string())
    }
}

impl From<PlatformError> for GroupError {
    fn from(err: PlatformError) -> Self {
        match err {
            // Callers that know which resource they were touching map
            // `NotFound` to a specific `ResourceMissing` before this point;
            // this fallback covers the rest.
            PlatformError::NotFound => GroupError::ExternalService("resource not found".into()),
            PlatformError::Transport(detail) => GroupError::ExternalService(detail),
        }
    }
}
