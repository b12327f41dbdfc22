use actix_web::{web, HttpResponse};
use std::sync::Arc;
use validator::Validate;

use crate::models::{LoginRequest, SessionUser, UpdateSessionRequest};
use crate::routes::{ApiError, AppState};
use crate::services::{SessionContext, SessionError};

/// Configure session routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/session", web::get().to(current_session))
        .route("/session", web::put().to(update_session))
        .route("/session", web::delete().to(logout))
        .route("/session/login", web::post().to(login))
        .route("/session/menu", web::get().to(menu));
}

/// Run `f` against the session on the blocking pool
///
/// The file store writes, renames and removes synchronously; none of that
/// may run on an async worker.
async fn with_session<F, R>(state: &AppState, f: F) -> Result<R, ApiError>
where
    F: FnOnce(&mut SessionContext) -> Result<R, SessionError> + Send + 'static,
    R: Send + 'static,
{
    let session = Arc::clone(&state.session);
    let result = web::block(move || {
        let mut ctx = session.lock().map_err(|_| SessionError::Poisoned)?;
        f(&mut *ctx)
    })
    .await?;
    Ok(result?)
}

/// Current user, or `null` when logged out
async fn current_session(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let user = with_session(&state, |ctx| Ok(ctx.current().cloned())).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// Mock login
///
/// POST /api/v1/session/login
///
/// Request body:
/// ```json
/// { "email": "maria.lopez@university.edu" }
/// ```
async fn login(state: web::Data<AppState>, req: web::Json<LoginRequest>) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let profile = state
        .catalog
        .find_by_email(&req.email)
        .ok_or_else(|| ApiError::NotFound(format!("no account for {}", req.email)))?;
    let user = SessionUser::from_profile(profile, req.email.trim());

    let user = with_session(&state, move |ctx| ctx.login(user).cloned()).await?;
    Ok(HttpResponse::Ok().json(user))
}

async fn update_session(
    state: web::Data<AppState>,
    req: web::Json<UpdateSessionRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let UpdateSessionRequest { name, email } = req.into_inner();
    let user = with_session(&state, move |ctx| {
        ctx.update(|user| {
            if let Some(name) = name {
                user.name = name;
            }
            if let Some(email) = email {
                user.email = email;
            }
        })
        .cloned()
    })
    .await?;
    Ok(HttpResponse::Ok().json(user))
}

async fn logout(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    with_session(&state, |ctx| ctx.logout()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Navigation for the logged-in user's role
async fn menu(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let role = with_session(&state, |ctx| Ok(ctx.current().map(|user| user.role)))
        .await?
        .ok_or(ApiError::Unauthorized)?;
    Ok(HttpResponse::Ok().json(role.menu()))
}
