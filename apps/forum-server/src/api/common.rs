// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;

use crate::{
    auth::BearerToken, error::ApiError, models::UserDetailsResponse, state::AppState,
};

/// Profile of any member, visible to every signed-in caller.
#[utoipa::path(
    get,
    path = "/userprofile/{user_id}",
    params(
        ("user_id" = String, Path, description = "Identifier of the member to view")
    ),
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, body = UserDetailsResponse),
        (status = 401, description = "Not signed in (ATHR-001) or signed out (ATHR-002)"),
        (status = 404, description = "No such user (USR-001)"),
    )
)]
pub async fn user_profile(
    BearerToken(token): BearerToken,
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserDetailsResponse>, ApiError> {
    let identity = state.users.get_profile(&token, &user_id, Utc::now())?;
    Ok(Json(UserDetailsResponse::from(identity.as_ref())))
}
