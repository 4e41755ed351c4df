pub mod cors;
pub mod http_handlers;
pub mod routes;
