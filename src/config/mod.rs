use thiserror::Error;

mod database;
mod logging;
mod server;

pub use database::{Database, DbPoolConfig};
pub use logging::Logging;
pub use server::Server;

#[derive(Debug, Error)]
#[error("Failed to load configuration")]
pub struct ParseError;
