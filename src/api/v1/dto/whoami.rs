use serde::Serialize;

use crate::services::resolver::Endpoint;

/// What the wrapped service sees after the gateway let a request through.
#[derive(Debug, Serialize)]
pub struct WhoAmIResponse {
    pub namespace: Option<String>,
    pub authenticated: bool,
    pub endpoint: Option<Endpoint>,
}
