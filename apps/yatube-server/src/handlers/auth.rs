//! Account handlers: registration, login and logout.

use actix_web::{
    HttpResponse,
    cookie::{Cookie, SameSite, time::Duration},
    web,
};
use std::sync::Arc;

use yatube_core::domain::User;
use yatube_core::ports::{PasswordService, TokenService};
use yatube_shared::ApiResponse;
use yatube_shared::dto::{AuthResponse, LoginRequest, RegisterUserRequest, UserResponse};

use crate::middleware::auth::{ACCESS_TOKEN_COOKIE, Identity};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;
use crate::urls;

const MAX_USERNAME_LEN: usize = 150;
const MIN_PASSWORD_LEN: usize = 8;

fn validate_registration(req: &RegisterUserRequest) -> Vec<String> {
    let mut errors = Vec::new();

    if req.username.is_empty() || req.username.chars().count() > MAX_USERNAME_LEN {
        errors.push(format!("Username must be between 1 and {MAX_USERNAME_LEN} characters"));
    } else if !req
        .username
        .chars()
        .all(|c| c.is_alphanumeric() || "@.+-_".contains(c))
    {
        errors.push("Username may contain only letters, digits and @/./+/-/_".to_string());
    }
    if !req.email.contains('@') {
        errors.push("Invalid email address".to_string());
    }
    if req.password.chars().count() < MIN_PASSWORD_LEN {
        errors.push(format!("Password must be at least {MIN_PASSWORD_LEN} characters"));
    }

    errors
}

fn session_cookie(token: &str, lifetime_seconds: i64) -> Cookie<'static> {
    Cookie::build(ACCESS_TOKEN_COOKIE, token.to_string())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(lifetime_seconds))
        .finish()
}

fn issue_token(
    token_service: &dyn TokenService,
    user: &User,
) -> AppResult<(String, AuthResponse)> {
    let token = token_service
        .generate_token(user.id, &user.username, vec!["user".to_string()])
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let response = AuthResponse {
        access_token: token.clone(),
        token_type: "Bearer".to_string(),
        expires_in: token_service.expiration_seconds().max(0) as u64,
    };
    Ok((token, response))
}

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<RegisterUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let errors = validate_registration(&req);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    if state.users.find_by_username(&req.username).await?.is_some() {
        return Err(AppError::Conflict("Username already taken".to_string()));
    }
    if state.users.find_by_email(&req.email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let password_hash = password_service
        .hash(&req.password)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let user = state
        .users
        .create(User::new(req.username, req.email, password_hash))
        .await?;
    tracing::info!(user_id = %user.id, username = %user.username, "User registered");

    let (token, response) = issue_token(token_service.get_ref().as_ref(), &user)?;

    Ok(HttpResponse::Created()
        .cookie(session_cookie(&token, token_service.expiration_seconds()))
        .json(response))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let user = state
        .users
        .find_by_username(&req.username)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let valid = password_service
        .verify(&req.password, &user.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    if !valid {
        tracing::debug!(username = %req.username, "Rejected login");
        return Err(AppError::Unauthorized);
    }

    let (token, response) = issue_token(token_service.get_ref().as_ref(), &user)?;

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(&token, token_service.expiration_seconds()))
        .json(response))
}

/// POST /api/auth/logout
pub async fn logout() -> HttpResponse {
    HttpResponse::Ok()
        .cookie(session_cookie("", 0))
        .json(ApiResponse::message("Logged out"))
}

/// GET /api/auth/me
pub async fn me(identity: Identity) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::ok(UserResponse {
        id: identity.user_id.to_string(),
        profile_url: urls::profile(&identity.username),
        username: identity.username,
    }))
}
