pub mod handlers;
pub mod routes;
pub mod server;
pub mod share;

pub use server::{create_app, run_server, start_server};
