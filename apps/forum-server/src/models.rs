// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response bodies for the REST API. All types derive
//! `ToSchema` for the OpenAPI document.
//!
//! ## Model Categories
//!
//! - **Users**: signup, signin, signout and profile views
//! - **Questions**: posting and listing questions
//! - **Answers**: posting, editing, deleting and listing answers
//!
//! Profile views never carry the password hash or salt.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::Role;
use crate::storage::{Answer, Identity, Question};

// =============================================================================
// User Models
// =============================================================================

/// Signup request body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SignupUserRequest {
    pub user_name: String,
    pub email_address: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub about_me: Option<String>,
    #[serde(default)]
    pub dob: Option<String>,
    #[serde(default)]
    pub contact_number: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct SignupUserResponse {
    pub id: String,
    pub status: String,
}

/// Signin response. The token is also sent in the `access-token` header.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct SigninResponse {
    pub id: String,
    pub message: String,
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct SignoutResponse {
    pub id: String,
    pub message: String,
}

/// Public profile of a member.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct UserDetailsResponse {
    pub user_name: String,
    pub email_address: String,
    pub first_name: String,
    pub last_name: String,
    pub about_me: Option<String>,
    pub dob: Option<String>,
    pub contact_number: Option<String>,
    pub country: Option<String>,
    pub role: Role,
}

impl From<&Identity> for UserDetailsResponse {
    fn from(identity: &Identity) -> Self {
        Self {
            user_name: identity.username.clone(),
            email_address: identity.email.clone(),
            first_name: identity.first_name.clone(),
            last_name: identity.last_name.clone(),
            about_me: identity.about_me.clone(),
            dob: identity.dob.clone(),
            contact_number: identity.contact_number.clone(),
            country: identity.country.clone(),
            role: identity.role,
        }
    }
}

// =============================================================================
// Question Models
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QuestionRequest {
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct QuestionResponse {
    pub id: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct QuestionDetailsResponse {
    pub id: String,
    pub content: String,
    pub owner_user_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<Question> for QuestionDetailsResponse {
    fn from(question: Question) -> Self {
        Self {
            id: question.id,
            content: question.content,
            owner_user_id: question.owner_user_id,
            created_at: question.created_at,
        }
    }
}

// =============================================================================
// Answer Models
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnswerRequest {
    pub answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnswerEditRequest {
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct AnswerResponse {
    pub id: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct AnswerEditResponse {
    pub id: String,
    pub status: String,
    pub version: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct AnswerDeleteResponse {
    pub id: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct AnswerDetailsResponse {
    pub id: String,
    pub question_id: String,
    pub answer_content: String,
    pub owner_user_id: String,
    pub created_at: DateTime<Utc>,
    pub version: u64,
}

impl From<Answer> for AnswerDetailsResponse {
    fn from(answer: Answer) -> Self {
        Self {
            id: answer.id,
            question_id: answer.question_id,
            answer_content: answer.content,
            owner_user_id: answer.owner_user_id,
            created_at: answer.created_at,
            version: answer.version,
        }
    }
}
