// Template context structures for askama templates, organized by page.

use actix_session::Session;

use crate::auth::csrf;
use crate::auth::session::{CurrentUser, take_flash};

pub const APP_NAME: &str = "Recap";

/// Common context shared by all signed-in pages.
/// Templates access these as `ctx.display_name`, `ctx.csrf_token`, etc.
pub struct PageContext {
    pub app_name: String,
    pub display_name: String,
    pub email: String,
    pub avatar_initial: String,
    pub flash: Option<String>,
    pub csrf_token: String,
}

impl PageContext {
    pub fn build(session: &Session, user: &CurrentUser) -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            display_name: user.display_name().to_string(),
            email: user.email.clone(),
            avatar_initial: user.avatar_initial(),
            flash: take_flash(session),
            csrf_token: csrf::get_or_create_token(session),
        }
    }

    /// Show `message` on this render instead of a queued flash.
    pub fn with_flash(mut self, message: impl Into<String>) -> Self {
        self.flash = Some(message.into());
        self
    }
}

mod api;
mod common;
mod dashboard;

pub use self::api::{
    ApiErrorResponse, ApiReminderRequest, ApiSaveSummaryRequest, ApiSaveSummaryResponse,
    ApiSummarizeRequest, ApiSummarizeResponse,
};
pub use self::common::{LandingTemplate, LoginTemplate, SignupTemplate};
pub use self::dashboard::{DashboardTab, DashboardTemplate, PendingSummary};
