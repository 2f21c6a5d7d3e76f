use async_trait::async_trait;

use super::{CreateUser, Store};
use crate::{
  database::{self, ErrorExt, ErrorExt2, PoolConnection, Result},
  schema::{Presenter, Proposal, ProposalPresenter, Schedule, User},
  types::{
    form::proposals::submit,
    id::{
      marker::{PresenterMarker, ProposalMarker, UserMarker},
      Id,
    },
  },
};

/// [`Store`] backed by a writable primary database and an
/// optional read-only replica.
#[derive(Debug, Clone)]
pub struct PgStore {
  primary: database::Pool,
  replica: Option<database::Pool>,
}

impl PgStore {
  #[must_use]
  pub fn new(primary: database::Pool, replica: Option<database::Pool>) -> Self {
    Self { primary, replica }
  }

  #[tracing::instrument(skip_all)]
  async fn db_write(&self) -> Result<PoolConnection> {
    self.primary.get().await
  }

  #[tracing::instrument(skip_all)]
  async fn db_read(&self) -> Result<PoolConnection> {
    if let Some(replica) = self.replica.as_ref() {
      match replica.get().await {
        Ok(conn) => return Ok(conn),
        // fallback
        Err(err) if err.is_unhealthy() => {}
        Err(err) => return Err(err),
      }
    }
    self.primary.get().await
  }
}

#[async_trait]
impl Store for PgStore {
  async fn create_user(&self, form: &CreateUser<'_>) -> Result<Option<User>> {
    let mut conn = self.db_write().await?;
    User::insert(&mut conn, form).await
  }

  async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
    let mut conn = self.db_read().await?;
    User::by_email(&mut conn, email).await
  }

  #[tracing::instrument(skip(self, form))]
  async fn submit_proposal(
    &self,
    proposer_id: Id<UserMarker>,
    form: &submit::Request,
  ) -> Result<Proposal> {
    let mut tx = self.primary.begin().await?;
    let proposal =
      Proposal::insert(&mut tx, proposer_id, &form.title, form.session_type, &form.text).await?;

    for entry in &form.presenters {
      let presenter = Presenter::insert(
        &mut tx,
        &entry.email,
        &entry.name,
        entry.bio(),
        &entry.country,
        &entry.state,
      )
      .await?;
      ProposalPresenter::insert(&mut tx, proposal.id, presenter.id, entry.lead).await?;
    }

    tx.commit().await.into_db_error()?;
    Ok(proposal)
  }

  async fn scheduled_proposals(&self) -> Result<Vec<Proposal>> {
    let mut conn = self.db_read().await?;
    Proposal::scheduled(&mut conn).await
  }

  async fn proposal_presenters(
    &self,
    proposals: &[Id<ProposalMarker>],
  ) -> Result<Vec<ProposalPresenter>> {
    let mut conn = self.db_read().await?;
    ProposalPresenter::by_proposals(&mut conn, proposals).await
  }

  async fn presenters(&self, ids: &[Id<PresenterMarker>]) -> Result<Vec<Presenter>> {
    let mut conn = self.db_read().await?;
    Presenter::by_ids(&mut conn, ids).await
  }

  async fn schedule_proposal(&self, id: Id<ProposalMarker>, schedule: &Schedule) -> Result<bool> {
    let mut conn = self.db_write().await?;
    Proposal::update_schedule(&mut conn, id, schedule).await
  }
}
