pub mod reminders;
pub mod summaries;

use actix_web::{
    Error, HttpResponse,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    web,
    middleware::Next,
};

use crate::templates_structs::ApiErrorResponse;

/// CSRF protection for REST API mutation endpoints.
///
/// Rejects POST/PUT/DELETE requests without `Content-Type: application/json`.
/// Browsers cannot send cross-origin JSON with cookies via a simple form
/// POST, so the header check stands in for a token. GET requests are exempt.
pub async fn require_json_content_type(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let method = req.method().clone();

    if method == actix_web::http::Method::POST
        || method == actix_web::http::Method::PUT
        || method == actix_web::http::Method::DELETE
    {
        let content_type = req
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if !content_type.starts_with("application/json") {
            let response = HttpResponse::BadRequest().json(ApiErrorResponse {
                error: "Content-Type must be application/json for mutation requests".to_string(),
                details: None,
            });
            return Ok(req.into_response(response).map_into_right_body());
        }
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}

pub(crate) fn api_error(status: actix_web::http::StatusCode, error: &str, details: Option<String>) -> HttpResponse {
    HttpResponse::build(status).json(ApiErrorResponse {
        error: error.to_string(),
        details,
    })
}

/// Configure API v1 routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("")
            .wrap(actix_web::middleware::from_fn(require_json_content_type))
            .route("/summarize", web::post().to(summaries::summarize))
            .route("/summaries", web::get().to(summaries::list))
            .route("/summaries", web::post().to(summaries::create))
            .route("/summaries/{id}", web::delete().to(summaries::delete))
            .route("/reminders", web::get().to(reminders::list))
            .route("/reminders", web::post().to(reminders::create))
            .route("/reminders/{id}/toggle", web::post().to(reminders::toggle))
            .route("/reminders/{id}", web::delete().to(reminders::delete)),
    );
}
