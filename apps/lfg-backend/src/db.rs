//! Database connection bootstrap.

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::errors::GroupError;

pub async fn connect_db(url: &str) -> Result<DatabaseConnection, GroupError> {
    let mut options = ConnectOptions::new(url.to_string());
    options
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(false);

    let conn = Database::connect(options).await?;
    Ok(conn)
}
