use chrono::NaiveDateTime;
use sqlx::FromRow;

use crate::{
  database::{error::ErrorExt, Connection, Result},
  types::{
    enums::{Day, QuickieSlot, Room, Session, SessionType},
    id::{
      marker::{ProposalMarker, UserMarker},
      Id,
    },
  },
};

#[derive(Debug, Clone, FromRow, PartialEq, Eq)]
pub struct Proposal {
  pub id: Id<ProposalMarker>,
  pub created_at: NaiveDateTime,
  pub proposer_id: Id<UserMarker>,
  pub title: String,
  pub session_type: SessionType,
  pub text: String,
  pub day: Option<Day>,
  pub session: Option<Session>,
  pub room: Option<Room>,
  pub quickie_slot: Option<QuickieSlot>,
}

/// Where and when a proposal is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
  pub day: Day,
  pub session: Session,
  pub room: Option<Room>,
  pub quickie_slot: Option<QuickieSlot>,
}

impl Proposal {
  /// A proposal is scheduled once it has both a day and a session.
  #[must_use]
  pub fn is_scheduled(&self) -> bool {
    self.day.is_some() && self.session.is_some()
  }

  pub fn apply_schedule(&mut self, schedule: &Schedule) {
    self.day = Some(schedule.day);
    self.session = Some(schedule.session);
    self.room = schedule.room;
    self.quickie_slot = schedule.quickie_slot;
  }

  #[tracing::instrument(skip(conn, title, text))]
  pub async fn insert(
    conn: &mut Connection,
    proposer_id: Id<UserMarker>,
    title: &str,
    session_type: SessionType,
    text: &str,
  ) -> Result<Self> {
    sqlx::query_as::<_, Self>(
      r#"INSERT INTO "proposals" (proposer_id, title, session_type, text)
         VALUES ($1, $2, $3, $4)
         RETURNING *"#,
    )
    .bind(proposer_id)
    .bind(title)
    .bind(session_type)
    .bind(text)
    .fetch_one(conn)
    .await
    .into_db_error()
  }

  #[tracing::instrument(skip(conn))]
  pub async fn scheduled(conn: &mut Connection) -> Result<Vec<Self>> {
    sqlx::query_as::<_, Self>(
      r#"SELECT * FROM "proposals"
         WHERE day IS NOT NULL AND session IS NOT NULL
         ORDER BY id"#,
    )
    .fetch_all(conn)
    .await
    .into_db_error()
  }

  #[tracing::instrument(skip(conn))]
  pub async fn update_schedule(
    conn: &mut Connection,
    id: Id<ProposalMarker>,
    schedule: &Schedule,
  ) -> Result<bool> {
    let result = sqlx::query(
      r#"UPDATE "proposals"
         SET day = $2, session = $3, room = $4, quickie_slot = $5
         WHERE id = $1"#,
    )
    .bind(id)
    .bind(schedule.day)
    .bind(schedule.session)
    .bind(schedule.room)
    .bind(schedule.quickie_slot)
    .execute(conn)
    .await
    .into_db_error()?;

    Ok(result.rows_affected() > 0)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_is_scheduled() {
    let mut proposal = crate::test_utils::proposal(1, 1);
    assert!(!proposal.is_scheduled());

    proposal.day = Some(Day::Thursday);
    assert!(!proposal.is_scheduled());

    proposal.apply_schedule(&Schedule {
      day: Day::Friday,
      session: Session::Second,
      room: None,
      quickie_slot: Some(QuickieSlot::Third),
    });
    assert!(proposal.is_scheduled());
    assert_eq!(proposal.day, Some(Day::Friday));
    assert_eq!(proposal.quickie_slot, Some(QuickieSlot::Third));
  }
}
