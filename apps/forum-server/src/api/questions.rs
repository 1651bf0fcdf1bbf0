// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;

use crate::{
    auth::BearerToken,
    error::ApiError,
    models::{QuestionDetailsResponse, QuestionRequest, QuestionResponse},
    state::AppState,
};

#[utoipa::path(
    post,
    path = "/question/create",
    request_body = QuestionRequest,
    tag = "Questions",
    security(("bearer" = [])),
    responses(
        (status = 201, body = QuestionResponse),
        (status = 400, description = "Empty content"),
        (status = 401, description = "Not signed in, signed out or expired"),
    )
)]
pub async fn create_question(
    BearerToken(token): BearerToken,
    State(state): State<AppState>,
    Json(request): Json<QuestionRequest>,
) -> Result<(StatusCode, Json<QuestionResponse>), ApiError> {
    if request.content.trim().is_empty() {
        return Err(ApiError::bad_request("content is required"));
    }

    let question = state
        .questions
        .create_question(&token, request.content, Utc::now())?;
    tracing::info!(question_id = %question.id, owner = %question.owner_user_id, "question created");

    Ok((
        StatusCode::CREATED,
        Json(QuestionResponse {
            id: question.id,
            status: "QUESTION CREATED".to_string(),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/question/all",
    tag = "Questions",
    security(("bearer" = [])),
    responses(
        (status = 200, body = [QuestionDetailsResponse]),
        (status = 401, description = "Not signed in, signed out or expired"),
    )
)]
pub async fn list_questions(
    BearerToken(token): BearerToken,
    State(state): State<AppState>,
) -> Result<Json<Vec<QuestionDetailsResponse>>, ApiError> {
    let questions = state.questions.list_questions(&token, Utc::now())?;
    Ok(Json(questions.into_iter().map(Into::into).collect()))
}
