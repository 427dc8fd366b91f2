//! HTTP transport: route handlers, page rendering, and the server loop.

mod page;
mod routes;
mod server;

pub use routes::routes;
pub use server::{ServerConfig, serve};
