// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::process::ExitCode;
use std::sync::Arc;

use social_auth_server::api::router;
use social_auth_server::auth::{KeyStore, SystemClock};
use social_auth_server::config::{LogFormat, ServerConfig};
use social_auth_server::logging;
use social_auth_server::state::AppState;
use social_auth_server::storage::KeyPaths;
use social_auth_server::store::UserStore;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    logging::init(LogFormat::from_env());

    let config = ServerConfig::from_env();

    // The key pair must exist before the listener accepts anything.
    let key_store = KeyStore::new(KeyPaths::new(&config.keys_dir));
    let keys = match key_store.load_or_create() {
        Ok(keys) => keys,
        Err(e) => {
            error!(
                dir = %config.keys_dir.display(),
                error = %e,
                "Cannot obtain a signing key pair, refusing to start"
            );
            return ExitCode::FAILURE;
        }
    };

    let state = AppState::new(keys, Arc::new(SystemClock), UserStore::new());
    let app = router(state, config.cors_origin.clone());

    let addr = match config.bind_addr() {
        Ok(addr) => addr,
        Err(e) => {
            error!(host = %config.host, port = config.port, error = %e, "Failed to parse bind address");
            return ExitCode::FAILURE;
        }
    };

    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(%addr, error = %e, "Failed to bind");
            return ExitCode::FAILURE;
        }
    };

    info!(%addr, "Social auth server listening (docs at /docs)");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(error = %e, "Server failed");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
