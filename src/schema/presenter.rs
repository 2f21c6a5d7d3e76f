use sqlx::FromRow;

use crate::{
  database::{error::ErrorExt, Connection, Result},
  types::id::{
    marker::{PresenterMarker, ProposalMarker},
    Id,
  },
};

/// A person presenting a proposal. Presenters need not have an account.
#[derive(Debug, Clone, FromRow, PartialEq, Eq)]
pub struct Presenter {
  pub id: Id<PresenterMarker>,
  pub email: String,
  pub name: String,
  pub bio: String,
  pub country: String,
  pub state: String,
}

#[derive(Debug, Clone, Copy, FromRow, PartialEq, Eq)]
pub struct ProposalPresenter {
  pub proposal_id: Id<ProposalMarker>,
  pub presenter_id: Id<PresenterMarker>,
  pub is_lead: bool,
}

impl Presenter {
  #[tracing::instrument(skip_all)]
  pub async fn insert(
    conn: &mut Connection,
    email: &str,
    name: &str,
    bio: &str,
    country: &str,
    state: &str,
  ) -> Result<Self> {
    sqlx::query_as::<_, Self>(
      r#"INSERT INTO "presenters" (email, name, bio, country, state)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING *"#,
    )
    .bind(email)
    .bind(name)
    .bind(bio)
    .bind(country)
    .bind(state)
    .fetch_one(conn)
    .await
    .into_db_error()
  }

  #[tracing::instrument(skip(conn, ids), fields(ids = ids.len()))]
  pub async fn by_ids(conn: &mut Connection, ids: &[Id<PresenterMarker>]) -> Result<Vec<Self>> {
    let ids = ids.iter().map(|v| v.as_i64()).collect::<Vec<_>>();
    sqlx::query_as::<_, Self>(r#"SELECT * FROM "presenters" WHERE id = ANY($1) ORDER BY id"#)
      .bind(ids)
      .fetch_all(conn)
      .await
      .into_db_error()
  }
}

impl ProposalPresenter {
  #[tracing::instrument(skip(conn))]
  pub async fn insert(
    conn: &mut Connection,
    proposal_id: Id<ProposalMarker>,
    presenter_id: Id<PresenterMarker>,
    is_lead: bool,
  ) -> Result<Self> {
    sqlx::query_as::<_, Self>(
      r#"INSERT INTO "proposal_presenters" (proposal_id, presenter_id, is_lead)
         VALUES ($1, $2, $3)
         RETURNING *"#,
    )
    .bind(proposal_id)
    .bind(presenter_id)
    .bind(is_lead)
    .fetch_one(conn)
    .await
    .into_db_error()
  }

  #[tracing::instrument(skip(conn, ids), fields(ids = ids.len()))]
  pub async fn by_proposals(
    conn: &mut Connection,
    ids: &[Id<ProposalMarker>],
  ) -> Result<Vec<Self>> {
    let ids = ids.iter().map(|v| v.as_i64()).collect::<Vec<_>>();
    sqlx::query_as::<_, Self>(
      r#"SELECT * FROM "proposal_presenters"
         WHERE proposal_id = ANY($1)
         ORDER BY proposal_id, presenter_id"#,
    )
    .bind(ids)
    .fetch_all(conn)
    .await
    .into_db_error()
  }
}
