use actix_session::Session;

use crate::errors::AppError;
use crate::models::user::User;

/// The signed-in user as recorded in the session cookie.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub email: String,
    pub full_name: String,
}

impl CurrentUser {
    /// Name to greet the user with; falls back to "User" like the header menu.
    pub fn display_name(&self) -> &str {
        if self.full_name.trim().is_empty() {
            "User"
        } else {
            &self.full_name
        }
    }

    pub fn avatar_initial(&self) -> String {
        self.display_name()
            .chars()
            .next()
            .unwrap_or('?')
            .to_uppercase()
            .to_string()
    }
}

pub fn get_user_id(session: &Session) -> Option<i64> {
    session.get::<i64>("user_id").unwrap_or(None)
}

/// Load the current user from the session, or fail as unauthenticated.
pub fn require_user(session: &Session) -> Result<CurrentUser, AppError> {
    let id = get_user_id(session)
        .ok_or_else(|| AppError::Session("Not authenticated".to_string()))?;
    let email = session
        .get::<String>("email")
        .map_err(|e| AppError::Session(format!("Failed to read email: {e}")))?
        .unwrap_or_default();
    let full_name = session
        .get::<String>("full_name")
        .map_err(|e| AppError::Session(format!("Failed to read name: {e}")))?
        .unwrap_or_default();
    Ok(CurrentUser { id, email, full_name })
}

/// Start a session for `user`, replacing any previous one.
pub fn sign_in(session: &Session, user: &User) -> Result<(), AppError> {
    session.renew();
    session
        .insert("user_id", user.id)
        .and_then(|_| session.insert("email", &user.email))
        .and_then(|_| session.insert("full_name", &user.full_name))
        .map_err(|e| AppError::Session(format!("Failed to store session: {e}")))
}

pub fn set_flash(session: &Session, message: &str) {
    let _ = session.insert("flash", message);
}

pub fn take_flash(session: &Session) -> Option<String> {
    let flash = session.get::<String>("flash").unwrap_or(None);
    if flash.is_some() {
        session.remove("flash");
    }
    flash
}
