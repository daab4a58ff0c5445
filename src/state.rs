/*
 * Responsibility
 * - shared context bound to the Router (AppState)
 * - Clone is cheap (Arc inside); the gateway is immutable once built
 */
use std::sync::Arc;

use crate::middleware::auth::Gateway;

#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<Gateway>,
}

impl AppState {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }
}
