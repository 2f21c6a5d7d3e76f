use clap::Parser;
use error_stack::{Result, ResultExt};
use thiserror::Error;

mod migrate;
mod schedule;
mod server;

#[derive(Debug, Error)]
#[error("Failed to run command")]
pub struct CliError;

/// Command line options for the call for proposals site.
#[derive(Debug, Parser)]
#[command(about = "Call for proposals web application", version, author, long_about)]
pub struct Cli {
  #[clap(subcommand)]
  pub subcommand: Subcommand,
}

impl Cli {
  pub fn run(self) -> Result<(), CliError> {
    match self.subcommand {
      Subcommand::Server(args) => self::server::run(args).change_context(CliError),
      Subcommand::Migrate(args) => self::migrate::run(&args).change_context(CliError),
      Subcommand::Schedule(args) => self::schedule::run(&args).change_context(CliError),
    }
  }
}

#[derive(Debug, Parser)]
pub enum Subcommand {
  Server(self::server::ServerCommand),
  Migrate(self::migrate::MigrateCommand),
  Schedule(self::schedule::ScheduleCommand),
}

/// Builds the runtime used by the one-off database commands.
fn runtime() -> std::io::Result<tokio::runtime::Runtime> {
  tokio::runtime::Builder::new_current_thread()
    .enable_all()
    .build()
}

#[cfg(test)]
mod tests {
  use super::*;
  use cfp::types::enums::{Day, Room, Session};

  #[test]
  fn test_parse_schedule() {
    let cli = Cli::try_parse_from([
      "cfp", "schedule", "12", "--day", "friday", "--session", "session_3", "--room", "empire",
    ])
    .unwrap();
    let Subcommand::Schedule(args) = cli.subcommand else {
      panic!("expected schedule command");
    };
    assert_eq!(args.id.get(), 12);
    assert_eq!(args.day, Day::Friday);
    assert_eq!(args.session, Session::Third);
    assert_eq!(args.room, Some(Room::Empire));
    assert_eq!(args.quickie_slot, None);
  }

  #[test]
  fn test_parse_server() {
    let cli = Cli::try_parse_from(["cfp", "server", "--port", "9000", "--in-memory"]).unwrap();
    let Subcommand::Server(args) = cli.subcommand else {
      panic!("expected server command");
    };
    assert_eq!(args.port, Some(9000));
    assert!(args.in_memory);
  }
}
