// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    body::Body,
    http::Request,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{Http, HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::Role,
    models::{
        AnswerDeleteResponse, AnswerDetailsResponse, AnswerEditRequest, AnswerEditResponse,
        AnswerRequest, AnswerResponse, QuestionDetailsResponse, QuestionRequest,
        QuestionResponse, SigninResponse, SignoutResponse, SignupUserRequest,
        SignupUserResponse, UserDetailsResponse,
    },
    state::AppState,
};

pub mod answers;
pub mod common;
pub mod health;
pub mod questions;
pub mod users;

pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/health", get(health::health))
        .route("/user/signup", post(users::signup))
        .route("/user/signin", post(users::signin))
        .route("/user/signout", post(users::signout))
        .route("/user/me", get(users::get_current_user))
        .route("/userprofile/{user_id}", get(common::user_profile))
        .route("/question/create", post(questions::create_question))
        .route("/question/all", get(questions::list_questions))
        .route(
            "/question/{question_id}/answer/create",
            post(answers::create_answer),
        )
        .route("/answer/edit/{answer_id}", put(answers::edit_answer))
        .route("/answer/delete/{answer_id}", delete(answers::delete_answer))
        .route("/answer/all/{question_id}", get(answers::list_answers))
        .with_state(state);

    Router::new()
        .merge(routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("-");
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id
                )
            }),
        )
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CorsLayer::permissive())
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
            components.add_security_scheme(
                "basic",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Basic)),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        users::signup,
        users::signin,
        users::signout,
        users::get_current_user,
        common::user_profile,
        questions::create_question,
        questions::list_questions,
        answers::create_answer,
        answers::edit_answer,
        answers::delete_answer,
        answers::list_answers
    ),
    components(
        schemas(
            Role,
            SignupUserRequest,
            SignupUserResponse,
            SigninResponse,
            SignoutResponse,
            UserDetailsResponse,
            users::UserMeResponse,
            QuestionRequest,
            QuestionResponse,
            QuestionDetailsResponse,
            AnswerRequest,
            AnswerEditRequest,
            AnswerResponse,
            AnswerEditResponse,
            AnswerDeleteResponse,
            AnswerDetailsResponse,
            health::HealthResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Users", description = "Signup, signin, signout and profiles"),
        (name = "Questions", description = "Posting and listing questions"),
        (name = "Answers", description = "Answer lifecycle"),
        (name = "Health", description = "Liveness")
    )
)]
struct ApiDoc;
