/*
 * Responsibility
 * - public interface of the middleware layers
 * - auth::apply (authorization gateway), http::apply (transport concerns)
 */
pub mod auth;
pub mod http;
