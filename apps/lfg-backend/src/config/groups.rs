use std::env;
use std::time::Duration;

/// Tunables for the group lifecycle core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupConfig {
    /// How long an empty voice room survives before reclamation.
    pub idle_timeout: Duration,
    /// Version buckets the taxonomy maintains a tag for.
    pub version_names: Vec<String>,
    /// Display name of the "no mods" tag.
    pub no_mods_tag_name: String,
    /// Names used when provisioning a guild from scratch.
    pub waiting_room_name: String,
    pub forum_name: String,
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self {
            idle_timeout: Duration::from_secs(60),
            version_names: vec!["stable".to_string(), "beta".to_string()],
            no_mods_tag_name: "no-mods".to_string(),
            waiting_room_name: "group-waiting-room".to_string(),
            forum_name: "looking-for-group".to_string(),
        }
    }
}

impl GroupConfig {
    /// Defaults with the idle timeout overridable via
    /// `LFG_IDLE_TIMEOUT_SECS`. A malformed value falls back to the default.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(secs) = env::var("LFG_IDLE_TIMEOUT_SECS") {
            if let Ok(secs) = secs.parse::<u64>() {
                config.idle_timeout = Duration::from_secs(secs);
            }
        }
        config
    }
}
