/*!
 * Request authorization
 *
 * Public API:
 * - apply (layer the gateway over a router)
 * - Gateway / GatewayConfig
 * - Decision
 */

mod decision;
mod gateway;

pub use decision::Decision;
pub use gateway::{
    Gateway, GatewayConfig, NAMESPACE_HEADER, apply, resource_endpoint, resource_name,
};
