use cfp::{
  config::Server as Config,
  database::Pool,
  schema::Schedule,
  store::{PgStore, Store},
  types::{
    enums::{Day, QuickieSlot, Room, Session},
    id::{marker::ProposalMarker, Id},
  },
};
use clap::Parser;
use error_stack::{Report, Result, ResultExt};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("Failed to schedule proposal")]
pub struct ScheduleError;

/// Put a proposal on the schedule
#[derive(Debug, Parser)]
pub struct ScheduleCommand {
  pub id: Id<ProposalMarker>,
  #[clap(long)]
  pub day: Day,
  #[clap(long)]
  pub session: Session,
  #[clap(long)]
  pub room: Option<Room>,
  #[clap(long)]
  pub quickie_slot: Option<QuickieSlot>,
}

pub fn run(args: &ScheduleCommand) -> Result<(), ScheduleError> {
  let config = Config::load().change_context(ScheduleError)?;
  cfp::logging::init(&config.logging).change_context(ScheduleError)?;

  let Some(db) = config.db.as_ref() else {
    return Err(Report::new(ScheduleError).attach_printable("database is not configured"));
  };

  let schedule = Schedule {
    day: args.day,
    session: args.session,
    room: args.room,
    quickie_slot: args.quickie_slot,
  };

  super::runtime()
    .change_context(ScheduleError)
    .attach_printable("could not build tokio runtime")?
    .block_on(async {
      let primary = Pool::new(db, &db.primary).await.change_context(ScheduleError)?;
      let store = PgStore::new(primary, None);

      let found = store
        .schedule_proposal(args.id, &schedule)
        .await
        .change_context(ScheduleError)?;

      if !found {
        return Err(
          Report::new(ScheduleError).attach_printable(format!("proposal {} does not exist", args.id)),
        );
      }

      tracing::info!(id = %args.id, ?schedule, "proposal scheduled");
      Ok(())
    })
}
