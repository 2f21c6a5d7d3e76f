use error_stack::{Report, Result, ResultExt};
use std::sync::Arc;
use tera::Tera;
use thiserror::Error;

use crate::{
  config, database,
  http::templates,
  store::{PgStore, Store},
};

/// Everything a request handler needs, shared between workers.
#[derive(Debug, Clone)]
pub struct App {
  pub config: Arc<config::Server>,
  pub store: Arc<dyn Store>,
  pub templates: Arc<Tera>,
}

#[derive(Debug, Error)]
#[error("Failed to initialize App struct")]
pub struct AppError;

impl App {
  /// Connects to the configured Postgres databases.
  #[tracing::instrument(skip_all)]
  pub async fn new(cfg: config::Server) -> Result<Self, AppError> {
    let Some(db) = cfg.db.as_ref() else {
      return Err(Report::new(AppError).attach_printable("database is not configured"));
    };

    let primary_db = database::Pool::new(db, &db.primary)
      .await
      .change_context(AppError)?;

    let replica_db = if let Some(replica) = db.replica.as_ref() {
      Some(
        database::Pool::new(db, replica)
          .await
          .change_context(AppError)?,
      )
    } else {
      None
    };

    Self::with_store(cfg, Arc::new(PgStore::new(primary_db, replica_db)))
  }

  pub fn with_store(cfg: config::Server, store: Arc<dyn Store>) -> Result<Self, AppError> {
    let templates = templates::load()
      .change_context(AppError)
      .attach_printable("could not compile page templates")?;

    Ok(Self {
      config: Arc::new(cfg),
      store,
      templates: Arc::new(templates),
    })
  }
}
