//! Account bootstrap command handler

use std::io::Write;

use crate::config::{Config, SecurityConfig};
use crate::db::Store;
use crate::models::user::parse_display_name;

const DEFAULT_NAME: &str = "Admin";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminOutcome {
    Created,
    Updated,
}

pub async fn cmd_admin(
    config: &Config,
    username: &str,
    password: &str,
    name: Option<&str>,
) -> anyhow::Result<()> {
    let store = Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;

    admin(
        &store,
        &config.security,
        username,
        password,
        name,
        &mut std::io::stdout(),
    )
    .await?;
    Ok(())
}

/// Create the single account, or overwrite the credentials of the existing one.
pub async fn admin(
    store: &Store,
    security: &SecurityConfig,
    username: &str,
    password: &str,
    name: Option<&str>,
    out: &mut impl Write,
) -> anyhow::Result<AdminOutcome> {
    if username.trim().is_empty() || password.is_empty() {
        anyhow::bail!("Username and password cannot be empty");
    }
    // Login compares usernames verbatim.
    if username.trim() != username {
        anyhow::bail!("Username cannot start or end with whitespace");
    }
    let name = name.map(parse_display_name).transpose()?;

    let outcome = if let Some(existing) = store.first_user().await? {
        writeln!(out, "Updating user...")?;
        store
            .update_user_credentials(existing.id, username, password, name.as_deref(), security)
            .await?;
        AdminOutcome::Updated
    } else {
        writeln!(out, "Creating user...")?;
        store
            .create_user(name.as_deref().unwrap_or(DEFAULT_NAME), username, password, security)
            .await?;
        AdminOutcome::Created
    };

    writeln!(out, "Done.")?;
    Ok(outcome)
}
