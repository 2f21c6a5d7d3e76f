use cfp::{config::Server as Config, database::Pool};
use clap::Parser;
use error_stack::{Report, Result, ResultExt};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("Failed to migrate the database")]
pub struct MigrateError;

/// Apply pending database migrations to the primary database
#[derive(Debug, Parser)]
pub struct MigrateCommand {}

pub fn run(_args: &MigrateCommand) -> Result<(), MigrateError> {
  let config = Config::load().change_context(MigrateError)?;
  cfp::logging::init(&config.logging).change_context(MigrateError)?;

  let Some(db) = config.db.as_ref() else {
    return Err(Report::new(MigrateError).attach_printable("database is not configured"));
  };

  super::runtime()
    .change_context(MigrateError)
    .attach_printable("could not build tokio runtime")?
    .block_on(async {
      let pool = Pool::new(db, &db.primary).await.change_context(MigrateError)?;
      pool.migrate().await.change_context(MigrateError)?;
      tracing::info!("database is up to date");
      Ok(())
    })
}
