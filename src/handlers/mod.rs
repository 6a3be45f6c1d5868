pub mod api_v1;
pub mod auth_handlers;
pub mod dashboard;
pub mod helpers;
pub mod reminder_handlers;
pub mod summary_handlers;

use actix_web::{HttpResponse, web};

/// Transcripts can be long; the extractor defaults are far smaller.
const MAX_BODY_BYTES: usize = 4 * 1024 * 1024;

/// Register every route. Shared by the server binary and the HTTP tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::FormConfig::default().limit(MAX_BODY_BYTES))
        .app_data(web::JsonConfig::default().limit(MAX_BODY_BYTES))
        // Public routes
        .route("/", web::get().to(auth_handlers::landing))
        .route("/login", web::get().to(auth_handlers::login_page))
        .route("/login", web::post().to(auth_handlers::login_submit))
        .route("/signup", web::get().to(auth_handlers::signup_page))
        .route("/signup", web::post().to(auth_handlers::signup_submit))
        // JSON API
        .service(
            web::scope("/api/v1")
                .wrap(actix_web::middleware::from_fn(crate::auth::middleware::require_auth))
                .configure(api_v1::configure),
        )
        // Protected pages
        .service(
            web::scope("")
                .wrap(actix_web::middleware::from_fn(crate::auth::middleware::require_auth))
                .route("/dashboard", web::get().to(dashboard::index))
                .route("/logout", web::post().to(auth_handlers::logout))
                .route("/summarize", web::post().to(dashboard::summarize))
                .route("/summaries", web::post().to(summary_handlers::save))
                .route("/summaries/{id}/delete", web::post().to(summary_handlers::delete))
                .route("/reminders", web::post().to(reminder_handlers::create))
                .route("/reminders/{id}/toggle", web::post().to(reminder_handlers::toggle))
                .route("/reminders/{id}/delete", web::post().to(reminder_handlers::delete)),
        );
}

/// Fallback for unknown paths. Register last.
pub async fn not_found() -> HttpResponse {
    let html = include_str!("../../templates/errors/404.html");
    HttpResponse::NotFound()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
