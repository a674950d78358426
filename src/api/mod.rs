/// API error types and handling
pub mod errors;
/// HTTP handlers, one module per resource
pub mod handlers;
/// Routes configuration and setup
pub mod routes;
/// HTTP server implementation
pub mod server;
