/*
 * Responsibility
 * - load Config → build collaborators → assemble the Router
 * - apply middleware (gateway inside, transport layers outside)
 * - serve with axum::serve()
 */
use std::{panic, process, sync::Arc};

use anyhow::Result;
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::{self, v1::handlers::whoami::whoami};
use crate::config::Config;
use crate::middleware;
use crate::middleware::auth::Gateway;
use crate::services::auth::build_auth;
use crate::services::resolver::PathResolver;
use crate::state::AppState;

fn init_tracing() {
    // RUST_LOG wins when set, e.g.
    // RUST_LOG=info,auth_gateway=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        env = ?config.app_env,
        addr = %config.addr,
        namespace = %config.namespace,
        service_prefix = %config.service_prefix,
        auth = ?config.auth_provider,
        "starting gateway"
    );

    let state = build_state(&config);
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_state(config: &Config) -> AppState {
    let gateway = Gateway::new(
        config.gateway_config(),
        build_auth(config),
        Arc::new(PathResolver::new()),
    );

    AppState::new(Arc::new(gateway))
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .nest("/api/v1", api::v1::routes())
        .fallback(whoami);
    let router = middleware::auth::apply(router, state.clone()).with_state(state);

    middleware::http::apply(router, config)
}
