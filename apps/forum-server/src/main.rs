// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::process::ExitCode;

use forum_rust_server::{
    api::router,
    auth::Role,
    config::{json_logs, ServerConfig, DEFAULT_LOG_FILTER, LOG_FORMAT_ENV},
    services::NewIdentity,
    state::{random_signing_key, AppState},
};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let format = std::env::var(LOG_FORMAT_ENV).ok();

    if json_logs(format.as_deref()) {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .with_target(false)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
    tracing::info!("shutdown signal received");
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let signing_key = match config.signing_key {
        Some(key) => key,
        None => match random_signing_key() {
            Ok(key) => {
                tracing::warn!("TOKEN_SIGNING_KEY not set, using a random per-process key");
                key
            }
            Err(_) => {
                tracing::error!("failed to generate a token signing key");
                return ExitCode::FAILURE;
            }
        },
    };

    let state = AppState::new(&signing_key);

    if let Some(admin) = config.seed_admin {
        let seeded = state.users.register(
            NewIdentity {
                username: admin.username.clone(),
                email: admin.email,
                password: admin.password,
                first_name: "Forum".to_string(),
                last_name: "Admin".to_string(),
                about_me: None,
                dob: None,
                contact_number: None,
                country: None,
            },
            Role::Admin,
        );
        match seeded {
            Ok(identity) => tracing::info!(user_id = %identity.id, username = %admin.username, "seeded admin"),
            Err(err) => {
                tracing::error!(error = %err, "failed to seed admin");
                return ExitCode::FAILURE;
            }
        }
    }

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!(addr = %config.bind_addr, error = %err, "failed to bind");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(addr = %config.bind_addr, "Forum server listening (docs at /docs)");

    if let Err(err) = axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %err, "server failed");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
