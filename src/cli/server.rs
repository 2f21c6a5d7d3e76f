use actix_web::{web, HttpServer};
use cfp::{config::Server as Config, store::MemoryStore, App};
use clap::Parser;
use error_stack::{Result, ResultExt};
use std::net::IpAddr;
use std::num::NonZeroUsize;
use std::sync::Arc;
use thiserror::Error;
use tracing_actix_web::TracingLogger;

#[derive(Debug, Error)]
#[error("Failed to start the HTTP server")]
pub struct StartServerError;

/// Serve the call for proposals site over HTTP
#[derive(Debug, Parser)]
pub struct ServerCommand {
  #[clap(long)]
  pub address: Option<IpAddr>,
  #[clap(long)]
  pub port: Option<u16>,
  #[clap(long)]
  pub workers: Option<NonZeroUsize>,
  /// Keep everything in memory instead of connecting to Postgres.
  #[clap(long)]
  pub in_memory: bool,
}

pub fn run(args: ServerCommand) -> Result<(), StartServerError> {
  let mut config = Config::load().change_context(StartServerError)?;
  args.override_config(&mut config);

  cfp::logging::init(&config.logging).change_context(StartServerError)?;
  actix_web::rt::System::new().block_on(serve(config, args.in_memory))
}

async fn serve(config: Config, in_memory: bool) -> Result<(), StartServerError> {
  let address = (config.ip, config.port);
  let workers = config.workers();

  let app = if in_memory {
    tracing::warn!("using an in-memory store, nothing will be persisted");
    App::with_store(config, Arc::new(MemoryStore::new()))
  } else {
    App::new(config).await
  }
  .change_context(StartServerError)?;
  let app = web::Data::new(app);

  tracing::info!("listening on {}:{} with {workers} workers", address.0, address.1);
  HttpServer::new(move || {
    actix_web::App::new()
      .app_data(app.clone())
      .wrap(TracingLogger::default())
      .configure(cfp::http::controllers::configure)
  })
  .workers(workers)
  .bind(address)
  .change_context(StartServerError)
  .attach_printable_lazy(|| format!("could not bind to {}:{}", address.0, address.1))?
  .run()
  .await
  .change_context(StartServerError)
}

impl ServerCommand {
  fn override_config(&self, config: &mut Config) {
    // override server configurations if set by the cli
    if let Some(address) = self.address {
      config.ip = address;
    }

    if let Some(port) = self.port {
      config.port = port;
    }

    if let Some(workers) = self.workers {
      config.workers = Some(workers);
    }
  }
}
