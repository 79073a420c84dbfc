use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};

/// Schema mirroring the production tables, in sqlite dialect. JSON maps
/// and timestamps land in TEXT columns; sqlite affinity takes care of the
/// rest.
const SCHEMA: &[&str] = &[
    "CREATE TABLE users (
        discord_id BIGINT PRIMARY KEY,
        name TEXT
    )",
    "CREATE TABLE user_settings (
        discord_id BIGINT PRIMARY KEY,
        limit_mode SMALLINT NOT NULL,
        group_password TEXT,
        user_limit INTEGER NOT NULL,
        steam_friend_code TEXT
    )",
    "CREATE TABLE user_templates (
        discord_id BIGINT PRIMARY KEY,
        voice_name TEXT,
        group_name TEXT,
        group_description TEXT,
        mod_code TEXT,
        room_password TEXT,
        create_count BIGINT NOT NULL
    )",
    "CREATE TABLE guild_settings (
        guild_id BIGINT PRIMARY KEY,
        forum_channel_id BIGINT,
        anchor_thread_id BIGINT,
        create_button_id BIGINT,
        waiting_room_id BIGINT,
        mention_role_id BIGINT,
        steam_api_key TEXT
    )",
    "CREATE TABLE guild_tag_sets (
        guild_id BIGINT PRIMARY KEY,
        no_mods_tag BIGINT,
        version_tags TEXT NOT NULL,
        role_tags TEXT NOT NULL
    )",
    "CREATE TABLE allow_list (
        subject_id BIGINT NOT NULL,
        owner_id BIGINT NOT NULL,
        PRIMARY KEY (subject_id, owner_id)
    )",
    "CREATE TABLE deny_list (
        subject_id BIGINT NOT NULL,
        owner_id BIGINT NOT NULL,
        PRIMARY KEY (subject_id, owner_id)
    )",
    "CREATE TABLE active_groups (
        owner_id BIGINT NOT NULL,
        guild_id BIGINT NOT NULL,
        voice_room_id BIGINT NOT NULL,
        listing_id BIGINT NOT NULL,
        anchor_message_id BIGINT NOT NULL,
        created_at TEXT NOT NULL,
        PRIMARY KEY (owner_id, guild_id)
    )",
];

/// Fresh in-memory database with the full schema.
///
/// The pool is pinned to a single connection: each sqlite `:memory:`
/// connection is its own database, so a second pooled connection would see
/// empty tables.
pub async fn test_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options.max_connections(1).sqlx_logging(false);

    let conn = Database::connect(options)
        .await
        .expect("connect to in-memory sqlite");
    for statement in SCHEMA {
        conn.execute_unprepared(statement)
            .await
            .expect("create test schema");
    }
    conn
}
