// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User endpoints: signup, signin, signout and the caller's own identity.

use axum::{extract::State, http::HeaderMap, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    auth::{Auth, AuthError, AuthenticatedUser, BasicCredentials, BearerToken, Role},
    error::ApiError,
    models::{SigninResponse, SignoutResponse, SignupUserRequest, SignupUserResponse},
    services::NewIdentity,
    state::AppState,
};

/// Header carrying the session token on a successful signin.
pub const ACCESS_TOKEN_HEADER: &str = "access-token";

/// Response for GET /user/me
#[derive(Debug, Serialize, ToSchema)]
pub struct UserMeResponse {
    pub user_id: String,
    pub user_name: String,
    pub role: Role,
    pub session_id: String,
    pub expires_at: DateTime<Utc>,
}

impl From<AuthenticatedUser> for UserMeResponse {
    fn from(user: AuthenticatedUser) -> Self {
        Self {
            user_id: user.identity.id.clone(),
            user_name: user.identity.username.clone(),
            role: user.role(),
            session_id: user.session_id,
            expires_at: user.expires_at,
        }
    }
}

fn require(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::bad_request(format!("{field} is required")));
    }
    Ok(())
}

fn validate_signup(request: &SignupUserRequest) -> Result<(), ApiError> {
    require("user_name", &request.user_name)?;
    require("email_address", &request.email_address)?;
    require("password", &request.password)?;
    require("first_name", &request.first_name)?;
    require("last_name", &request.last_name)?;
    if !request.email_address.contains('@') {
        return Err(ApiError::bad_request("email_address is not a valid email"));
    }
    Ok(())
}

impl From<SignupUserRequest> for NewIdentity {
    fn from(request: SignupUserRequest) -> Self {
        Self {
            username: request.user_name,
            email: request.email_address,
            password: request.password,
            first_name: request.first_name,
            last_name: request.last_name,
            about_me: request.about_me,
            dob: request.dob,
            contact_number: request.contact_number,
            country: request.country,
        }
    }
}

/// Register a new member.
#[utoipa::path(
    post,
    path = "/user/signup",
    request_body = SignupUserRequest,
    tag = "Users",
    responses(
        (status = 201, description = "User registered", body = SignupUserResponse),
        (status = 400, description = "Missing required field"),
        (status = 409, description = "Username (SGR-001) or email (SGR-002) already taken"),
    )
)]
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupUserRequest>,
) -> Result<(StatusCode, Json<SignupUserResponse>), ApiError> {
    validate_signup(&request)?;

    let identity = state.users.signup(request.into())?;
    tracing::info!(user_id = %identity.id, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(SignupUserResponse {
            id: identity.id.clone(),
            status: "USER SUCCESSFULLY REGISTERED".to_string(),
        }),
    ))
}

/// Sign in with `authorization: Basic base64(username:password)`.
#[utoipa::path(
    post,
    path = "/user/signin",
    tag = "Users",
    security(("basic" = [])),
    responses(
        (status = 200, description = "Signed in; token also in the access-token header", body = SigninResponse),
        (status = 400, description = "Malformed authorization header"),
        (status = 401, description = "Unknown username (ATH-001) or wrong password (ATH-002)"),
    )
)]
pub async fn signin(
    State(state): State<AppState>,
    credentials: BasicCredentials,
) -> Result<([(&'static str, String); 1], Json<SigninResponse>), ApiError> {
    let (identity, session) =
        state
            .users
            .signin(&credentials.username, &credentials.password, Utc::now())?;
    tracing::info!(user_id = %identity.id, session_id = %session.id, "user signed in");

    Ok((
        [(ACCESS_TOKEN_HEADER, session.token.clone())],
        Json(SigninResponse {
            id: identity.id.clone(),
            message: "SIGNED IN SUCCESSFULLY".to_string(),
            access_token: session.token,
            expires_at: session.expires_at,
        }),
    ))
}

/// Close the caller's session.
#[utoipa::path(
    post,
    path = "/user/signout",
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Signed out", body = SignoutResponse),
        (status = 401, description = "No active session for the token (SGR-001)"),
    )
)]
pub async fn signout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<SignoutResponse>, ApiError> {
    let BearerToken(token) =
        BearerToken::from_headers(&headers).ok_or(AuthError::SignOutRestricted)?;

    let session = state.users.signout(&token, Utc::now())?;
    tracing::info!(user_id = %session.identity.id, session_id = %session.id, "user signed out");

    Ok(Json(SignoutResponse {
        id: session.identity.id.clone(),
        message: "SIGNED OUT SUCCESSFULLY".to_string(),
    }))
}

/// Identity behind the caller's session.
#[utoipa::path(
    get,
    path = "/user/me",
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Current user", body = UserMeResponse),
        (status = 401, description = "Not signed in, signed out or expired"),
    )
)]
pub async fn get_current_user(Auth(user): Auth) -> Json<UserMeResponse> {
    Json(user.into())
}
