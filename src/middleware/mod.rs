/*
 * Responsibility
 * - Public interface of the middleware layers
 * - auth: policy matcher, authentication gate, authorization guard
 */
pub mod auth;
pub mod cors;
pub mod http;
pub mod security_headers;
