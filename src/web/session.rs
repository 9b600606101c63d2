//! Session keys, flash messages and the logged-in user lookup.

use tower_sessions::Session;

use super::pages::PageContext;
use super::{AppState, WebError};
use crate::models::user::User;

const USER_ID_KEY: &str = "user_id";
const FLASH_KEY: &str = "_flashes";

/// Queue a message for the next rendered page.
pub async fn flash(session: &Session, message: impl Into<String>) -> Result<(), WebError> {
    let mut messages = session
        .get::<Vec<String>>(FLASH_KEY)
        .await?
        .unwrap_or_default();
    messages.push(message.into());
    session.insert(FLASH_KEY, messages).await?;
    Ok(())
}

/// Pop every queued flash message.
pub async fn take_flashes(session: &Session) -> Result<Vec<String>, WebError> {
    Ok(session
        .remove::<Vec<String>>(FLASH_KEY)
        .await?
        .unwrap_or_default())
}

pub async fn log_in(session: &Session, user_id: i32) -> Result<(), WebError> {
    session.cycle_id().await?;
    session.insert(USER_ID_KEY, user_id).await?;
    Ok(())
}

/// Drops the authenticated user. Pending flash messages survive.
pub async fn log_out(session: &Session) -> Result<(), WebError> {
    session.remove::<i32>(USER_ID_KEY).await?;
    Ok(())
}

/// Resolve the session's user id to an account. A stale id whose account no
/// longer exists is removed from the session.
pub async fn current_user(state: &AppState, session: &Session) -> Result<Option<User>, WebError> {
    let Some(user_id) = session.get::<i32>(USER_ID_KEY).await? else {
        return Ok(None);
    };

    let user = state
        .auth()
        .session_user(user_id)
        .await
        .map_err(|e| WebError::internal(format!("Failed to load session user: {e}")))?;

    if user.is_none() {
        tracing::debug!(user_id, "Session refers to a missing user, clearing it");
        log_out(session).await?;
    }

    Ok(user)
}

async fn owner_name(state: &AppState) -> Result<Option<String>, WebError> {
    Ok(state
        .auth()
        .owner()
        .await
        .map_err(|e| WebError::internal(format!("Failed to load owner: {e}")))?
        .map(|u| u.name))
}

/// Build the layout context, looking up the owner name.
pub async fn page_context(state: &AppState, session: &Session) -> Result<PageContext, WebError> {
    let owner_name = owner_name(state).await?;
    page_context_with_owner(state, session, owner_name).await
}

/// Layout context for routes behind `require_login`, which has already
/// resolved the session user.
pub async fn member_page_context(
    state: &AppState,
    session: &Session,
) -> Result<PageContext, WebError> {
    Ok(PageContext {
        owner_name: owner_name(state).await?,
        authenticated: true,
        flashes: take_flashes(session).await?,
    })
}

/// Build the layout context when the caller already knows the owner name.
pub async fn page_context_with_owner(
    state: &AppState,
    session: &Session,
    owner_name: Option<String>,
) -> Result<PageContext, WebError> {
    let authenticated = current_user(state, session).await?.is_some();
    let flashes = take_flashes(session).await?;

    Ok(PageContext {
        owner_name,
        authenticated,
        flashes,
    })
}
