use std::env;

use crate::errors::GroupError;

/// Database profile enum for different environments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbProfile {
    /// Production database profile
    Prod,
    /// Test database profile - enforces safety rules
    Test,
}

/// Builds a database URL from environment variables for the given profile
pub fn db_url(profile: DbProfile) -> Result<String, GroupError> {
    let host = env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string());
    let port = env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string());
    let db_name = db_name(profile)?;
    let username = must_var("LFG_DB_USER")?;
    let password = must_var("LFG_DB_PASSWORD")?;

    Ok(format!(
        "postgresql://{username}:{password}@{host}:{port}/{db_name}"
    ))
}

/// Get database name based on profile
fn db_name(profile: DbProfile) -> Result<String, GroupError> {
    match profile {
        DbProfile::Prod => must_var("LFG_PROD_DB"),
        DbProfile::Test => {
            let db_name = must_var("LFG_TEST_DB")?;
            // Enforce safety: test DB must end with "_test"
            if !db_name.ends_with("_test") {
                return Err(GroupError::config(format!(
                    "Test profile requires database name to end with '_test', but got: '{db_name}'"
                )));
            }
            Ok(db_name)
        }
    }
}

/// Get required environment variable or return error
fn must_var(name: &str) -> Result<String, GroupError> {
    env::var(name).map_err(|_| GroupError::config(format!("missing environment variable {name}")))
}
