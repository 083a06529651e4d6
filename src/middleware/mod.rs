/*
 * Responsibility
 * - Public interface of the middleware layer
 * - auth: bearer token verification; http / security_headers: cross-cutting layers
 */
pub mod auth;
pub mod http;
pub mod security_headers;
