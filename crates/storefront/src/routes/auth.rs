//! Authentication routes.
//!
//! Login, signup, and logout all drive the cart and wishlist stores through
//! the identity transition: the stores discard in-memory state and load the
//! new user's persisted collections. Logout clears memory only; persisted
//! keys survive for the next login.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

use crate::error::Result;
use crate::models::User;
use crate::state::AppState;

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Signup request body.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// POST /auth/login
///
/// # Errors
///
/// Returns 401 for a credential mismatch.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<User>> {
    let user = state.sessions().login(&body.email, &body.password)?;
    state.cart().set_user(Some(&user.id));
    state.wishlist().set_user(Some(&user.id));
    Ok(Json(user))
}

/// POST /auth/signup
///
/// # Errors
///
/// Returns 409 for a duplicate email, 400 for a malformed one.
pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> Result<(StatusCode, Json<User>)> {
    let user = state
        .sessions()
        .signup(&body.name, &body.email, &body.password)?;
    // A fresh account has no persisted collections; this starts them empty.
    state.cart().set_user(Some(&user.id));
    state.wishlist().set_user(Some(&user.id));
    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /auth/logout
///
/// # Errors
///
/// Returns an error if the persisted session cannot be removed.
pub async fn logout(State(state): State<AppState>) -> Result<StatusCode> {
    state.sessions().logout()?;
    state.cart().set_user(None);
    state.wishlist().set_user(None);
    Ok(StatusCode::NO_CONTENT)
}

/// GET /auth/me
///
/// # Errors
///
/// Returns 401 when no session is active.
pub async fn me(State(state): State<AppState>) -> Result<Json<User>> {
    let user = super::require_user(&state)?;
    Ok(Json(user))
}
