use error_stack::{Result, ResultExt};
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};

use crate::config;

#[derive(Debug, Error)]
#[error("Failed to initialize tracing")]
pub struct TracingInitError;

pub fn init(config: &config::Logging) -> Result<(), TracingInitError> {
  let targets = std::env::var("RUST_LOG").unwrap_or_else(|_| config.targets.clone());
  let registry = tracing_subscriber::Registry::default()
    .with(make_env_filter(&targets))
    .with(tracing_subscriber::fmt::layer())
    .with(tracing_error::ErrorLayer::default());

  tracing::subscriber::set_global_default(registry)
    .change_context(TracingInitError)
    .attach_printable("already initialized tracing")?;

  Ok(())
}

fn make_env_filter(targets: &str) -> EnvFilter {
  let default_level = if cfg!(debug_assertions) {
    LevelFilter::DEBUG
  } else {
    LevelFilter::INFO
  };

  EnvFilter::builder()
    .with_default_directive(default_level.into())
    .parse_lossy(targets)
}
