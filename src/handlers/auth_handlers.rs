use actix_session::Session;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;
use sqlx::PgPool;

use crate::auth::session::{get_user_id, set_flash, sign_in, take_flash};
use crate::auth::{csrf, password, rate_limit::RateLimiter, validate};
use crate::errors::{AppError, render, see_other};
use crate::models::user;
use crate::templates_structs::{APP_NAME, LandingTemplate, LoginTemplate, SignupTemplate};

#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub csrf_token: String,
}

#[derive(Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub csrf_token: String,
}

#[derive(Deserialize)]
pub struct CsrfOnly {
    pub csrf_token: String,
}

/// Public landing page; signed-in users go straight to the dashboard.
pub async fn landing(session: Session) -> Result<HttpResponse, AppError> {
    if get_user_id(&session).is_some() {
        return Ok(see_other("/dashboard"));
    }
    render(LandingTemplate { app_name: APP_NAME.to_string() })
}

fn login_template(session: &Session, email: &str, error: Option<String>) -> LoginTemplate {
    LoginTemplate {
        app_name: APP_NAME.to_string(),
        error,
        notice: take_flash(session),
        email: email.to_string(),
        csrf_token: csrf::get_or_create_token(session),
    }
}

pub async fn login_page(session: Session) -> Result<HttpResponse, AppError> {
    if get_user_id(&session).is_some() {
        return Ok(see_other("/dashboard"));
    }
    render(login_template(&session, "", None))
}

pub async fn login_submit(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    session: Session,
    form: web::Form<LoginForm>,
    limiter: web::Data<RateLimiter>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    // Rate-limit check BEFORE any database access
    let ip = req
        .peer_addr()
        .map(|addr| addr.ip())
        .unwrap_or(std::net::IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED));

    if limiter.is_blocked(ip) {
        log::warn!("Blocked sign-in attempt from {ip}");
        let error = "Too many failed login attempts. Please try again later.".to_string();
        return render(login_template(&session, &form.email, Some(error)));
    }

    let found = user::find_by_email(&pool, &form.email).await?;
    let verified = match &found {
        Some(u) => password::verify_password(&form.password, &u.password)?,
        None => false,
    };

    match found {
        Some(u) if verified => {
            limiter.clear(ip);
            sign_in(&session, &u)?;
            log::info!("User {} signed in", u.id);
            Ok(see_other("/dashboard"))
        }
        _ => {
            limiter.record_failure(ip);
            let error = "Invalid email or password".to_string();
            render(login_template(&session, &form.email, Some(error)))
        }
    }
}

pub async fn signup_page(session: Session) -> Result<HttpResponse, AppError> {
    if get_user_id(&session).is_some() {
        return Ok(see_other("/dashboard"));
    }
    render(SignupTemplate {
        app_name: APP_NAME.to_string(),
        errors: vec![],
        email: String::new(),
        full_name: String::new(),
        csrf_token: csrf::get_or_create_token(&session),
    })
}

pub async fn signup_submit(
    pool: web::Data<PgPool>,
    session: Session,
    form: web::Form<SignupForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let mut errors: Vec<String> = [
        validate::validate_optional(&form.full_name, "Full name", 100),
        validate::validate_email(&form.email),
        validate::validate_password(&form.password),
    ]
    .into_iter()
    .flatten()
    .collect();

    if errors.is_empty() {
        let new = user::NewUser {
            email: form.email.clone(),
            full_name: form.full_name.clone(),
            password: password::hash_password(&form.password)?,
        };
        match user::create(&pool, &new).await {
            Ok(id) => {
                log::info!("Created account {id}");
                let created = user::find_by_id(&pool, id).await?.ok_or(AppError::NotFound)?;
                sign_in(&session, &created)?;
                set_flash(&session, "Welcome! Your account is ready.");
                return Ok(see_other("/dashboard"));
            }
            Err(e) if user::is_unique_violation(&e) => {
                errors.push("This email address is already in use.".to_string());
            }
            Err(e) => return Err(e.into()),
        }
    }

    render(SignupTemplate {
        app_name: APP_NAME.to_string(),
        errors,
        email: form.email.clone(),
        full_name: form.full_name.clone(),
        csrf_token: csrf::get_or_create_token(&session),
    })
}

pub async fn logout(
    session: Session,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    session.purge();
    Ok(see_other("/"))
}
