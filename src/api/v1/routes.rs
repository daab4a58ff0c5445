/*
 * Responsibility
 * - URL layout of v1
 * - the gateway is applied in app.rs, around these routes and the fallback
 */
use axum::{Router, routing::get};

use crate::state::AppState;

use crate::api::v1::handlers::{health::health, whoami::whoami};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/whoami", get(whoami))
}
