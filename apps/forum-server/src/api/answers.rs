// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;

use crate::{
    auth::BearerToken,
    error::ApiError,
    models::{
        AnswerDeleteResponse, AnswerDetailsResponse, AnswerEditRequest, AnswerEditResponse,
        AnswerRequest, AnswerResponse,
    },
    state::AppState,
};

fn require_content(content: &str) -> Result<(), ApiError> {
    if content.trim().is_empty() {
        return Err(ApiError::bad_request("answer content is required"));
    }
    Ok(())
}

#[utoipa::path(
    post,
    path = "/question/{question_id}/answer/create",
    params(
        ("question_id" = String, Path, description = "Question to answer")
    ),
    request_body = AnswerRequest,
    tag = "Answers",
    security(("bearer" = [])),
    responses(
        (status = 201, body = AnswerResponse),
        (status = 401, description = "Not signed in, signed out or expired"),
        (status = 404, description = "No such question (QUES-001)"),
    )
)]
pub async fn create_answer(
    BearerToken(token): BearerToken,
    State(state): State<AppState>,
    Path(question_id): Path<String>,
    Json(request): Json<AnswerRequest>,
) -> Result<(StatusCode, Json<AnswerResponse>), ApiError> {
    require_content(&request.answer)?;

    let answer = state
        .answers
        .create_answer(&token, &question_id, request.answer, Utc::now())?;
    tracing::info!(answer_id = %answer.id, question_id = %answer.question_id, "answer created");

    Ok((
        StatusCode::CREATED,
        Json(AnswerResponse {
            id: answer.id,
            status: "ANSWER CREATED".to_string(),
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/answer/edit/{answer_id}",
    params(
        ("answer_id" = String, Path, description = "Answer to edit")
    ),
    request_body = AnswerEditRequest,
    tag = "Answers",
    security(("bearer" = [])),
    responses(
        (status = 200, body = AnswerEditResponse),
        (status = 401, description = "Not signed in, signed out or expired"),
        (status = 403, description = "Caller does not own the answer (ATHR-003)"),
        (status = 404, description = "No such answer (ANS-001)"),
        (status = 409, description = "Answer changed concurrently"),
    )
)]
pub async fn edit_answer(
    BearerToken(token): BearerToken,
    State(state): State<AppState>,
    Path(answer_id): Path<String>,
    Json(request): Json<AnswerEditRequest>,
) -> Result<Json<AnswerEditResponse>, ApiError> {
    require_content(&request.content)?;

    let answer = state
        .answers
        .edit_answer(&token, &answer_id, request.content, Utc::now())?;
    tracing::info!(answer_id = %answer.id, version = answer.version, "answer edited");

    Ok(Json(AnswerEditResponse {
        id: answer.id,
        status: "ANSWER EDITED".to_string(),
        version: answer.version,
    }))
}

#[utoipa::path(
    delete,
    path = "/answer/delete/{answer_id}",
    params(
        ("answer_id" = String, Path, description = "Answer to delete")
    ),
    tag = "Answers",
    security(("bearer" = [])),
    responses(
        (status = 200, body = AnswerDeleteResponse),
        (status = 401, description = "Not signed in, signed out or expired"),
        (status = 403, description = "Caller is neither owner nor admin (ATHR-003)"),
        (status = 404, description = "No such answer (ANS-001)"),
        (status = 409, description = "Answer changed concurrently"),
    )
)]
pub async fn delete_answer(
    BearerToken(token): BearerToken,
    State(state): State<AppState>,
    Path(answer_id): Path<String>,
) -> Result<Json<AnswerDeleteResponse>, ApiError> {
    let answer = state.answers.delete_answer(&token, &answer_id, Utc::now())?;
    tracing::info!(answer_id = %answer.id, "answer deleted");

    Ok(Json(AnswerDeleteResponse {
        id: answer.id,
        status: "ANSWER DELETED".to_string(),
    }))
}

#[utoipa::path(
    get,
    path = "/answer/all/{question_id}",
    params(
        ("question_id" = String, Path, description = "Question whose answers to list")
    ),
    tag = "Answers",
    security(("bearer" = [])),
    responses(
        (status = 200, body = [AnswerDetailsResponse]),
        (status = 401, description = "Not signed in, signed out or expired"),
        (status = 404, description = "No such question (QUES-001)"),
    )
)]
pub async fn list_answers(
    BearerToken(token): BearerToken,
    State(state): State<AppState>,
    Path(question_id): Path<String>,
) -> Result<Json<Vec<AnswerDetailsResponse>>, ApiError> {
    let answers = state.answers.list_answers(&token, &question_id, Utc::now())?;
    Ok(Json(answers.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;
    use crate::services::NewIdentity;

    struct Members {
        state: AppState,
        question_id: String,
        u1: String,
        u2: String,
        admin: String,
    }

    fn token_for(state: &AppState, username: &str, role: Role) -> String {
        state
            .users
            .register(NewIdentity::sample(username), role)
            .unwrap();
        let (_, session) = state.users.signin(username, "password1", Utc::now()).unwrap();
        session.token
    }

    fn members() -> Members {
        let state = AppState::default();
        let u1 = token_for(&state, "u1", Role::NonAdmin);
        let u2 = token_for(&state, "u2", Role::NonAdmin);
        let admin = token_for(&state, "u3", Role::Admin);
        let question = state
            .questions
            .create_question(&u1, "Q1".to_string(), Utc::now())
            .unwrap();

        Members {
            state,
            question_id: question.id,
            u1,
            u2,
            admin,
        }
    }

    async fn post_answer(m: &Members, token: &str, text: &str) -> String {
        let (_, Json(created)) = create_answer(
            BearerToken(token.to_string()),
            State(m.state.clone()),
            Path(m.question_id.clone()),
            Json(AnswerRequest {
                answer: text.to_string(),
            }),
        )
        .await
        .expect("answer creation succeeds");
        created.id
    }

    #[tokio::test]
    async fn owner_can_edit_and_list_shows_new_content() {
        let m = members();
        let a1 = post_answer(&m, &m.u1, "A1").await;

        let Json(edited) = edit_answer(
            BearerToken(m.u1.clone()),
            State(m.state.clone()),
            Path(a1.clone()),
            Json(AnswerEditRequest {
                content: "A1 revised".to_string(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(edited.status, "ANSWER EDITED");
        assert_eq!(edited.version, 2);

        let Json(listed) = list_answers(
            BearerToken(m.u2.clone()),
            State(m.state.clone()),
            Path(m.question_id.clone()),
        )
        .await
        .unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].answer_content, "A1 revised");
    }

    #[tokio::test]
    async fn non_owner_edit_is_forbidden() {
        let m = members();
        let a1 = post_answer(&m, &m.u1, "A1").await;

        let err = edit_answer(
            BearerToken(m.u2.clone()),
            State(m.state.clone()),
            Path(a1),
            Json(AnswerEditRequest {
                content: "mine now".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
        assert_eq!(err.code, "ATHR-003");
        assert_eq!(err.message, "Only the answer owner can edit the answer");
    }

    #[tokio::test]
    async fn admin_deletes_foreign_answer() {
        let m = members();
        let a1 = post_answer(&m, &m.u1, "A1").await;
        let a2 = post_answer(&m, &m.u2, "A2").await;

        let err = delete_answer(BearerToken(m.u2.clone()), State(m.state.clone()), Path(a1.clone()))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);

        let Json(deleted) =
            delete_answer(BearerToken(m.admin.clone()), State(m.state.clone()), Path(a1.clone()))
                .await
                .unwrap();
        assert_eq!(deleted.id, a1);
        assert_eq!(deleted.status, "ANSWER DELETED");

        let err = delete_answer(BearerToken(m.u1.clone()), State(m.state.clone()), Path(a1))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.code, "ANS-001");

        let Json(listed) = list_answers(
            BearerToken(m.u1.clone()),
            State(m.state.clone()),
            Path(m.question_id.clone()),
        )
        .await
        .unwrap();
        let ids: Vec<&str> = listed.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec![a2.as_str()]);
    }

    #[tokio::test]
    async fn answering_missing_question_is_not_found() {
        let m = members();
        let err = create_answer(
            BearerToken(m.u1.clone()),
            State(m.state.clone()),
            Path("missing".to_string()),
            Json(AnswerRequest {
                answer: "orphan".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.code, "QUES-001");
    }
}
