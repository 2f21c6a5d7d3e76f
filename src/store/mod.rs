//! Persistence of users, proposals and presenters.
//!
//! Route handlers only ever talk to a [`Store`] so they can be
//! exercised against [`MemoryStore`] without a running Postgres.
use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
  database::Result,
  schema::{Presenter, Proposal, ProposalPresenter, Schedule, User},
  types::{
    enums::Role,
    form::proposals::submit,
    id::{
      marker::{PresenterMarker, ProposalMarker, UserMarker},
      Id,
    },
  },
};

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait Store: Debug + Send + Sync {
  /// Returns `None` if the email address is already registered.
  async fn create_user(&self, form: &CreateUser<'_>) -> Result<Option<User>>;

  async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;

  /// Stores the proposal together with all of its presenters
  /// and their links. Either everything is written or nothing.
  async fn submit_proposal(
    &self,
    proposer_id: Id<UserMarker>,
    form: &submit::Request,
  ) -> Result<Proposal>;

  /// Proposals with a day and a session, ordered by id.
  async fn scheduled_proposals(&self) -> Result<Vec<Proposal>>;

  async fn proposal_presenters(
    &self,
    proposals: &[Id<ProposalMarker>],
  ) -> Result<Vec<ProposalPresenter>>;

  /// Presenters with the given ids, ordered by id.
  async fn presenters(&self, ids: &[Id<PresenterMarker>]) -> Result<Vec<Presenter>>;

  /// Returns `false` if there is no such proposal.
  async fn schedule_proposal(&self, id: Id<ProposalMarker>, schedule: &Schedule) -> Result<bool>;
}

#[derive(Debug)]
pub struct CreateUser<'a> {
  pub email: &'a str,
  /// Already hashed passphrase.
  pub passphrase: &'a str,
  pub name: &'a str,
  pub role: Role,
  pub street_address: &'a str,
  pub town_city: &'a str,
  pub state: Option<&'a str>,
  pub postal_code: &'a str,
  pub country: &'a str,
  pub phone: Option<&'a str>,
}
