use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{CreateUser, Store};
use crate::{
  database::Result,
  schema::{Presenter, Proposal, ProposalPresenter, Schedule, User},
  types::{
    form::proposals::submit,
    id::{
      marker::{PresenterMarker, ProposalMarker, UserMarker},
      Id,
    },
  },
};

#[derive(Debug, Default)]
struct Tables {
  users: Vec<User>,
  proposals: Vec<Proposal>,
  presenters: Vec<Presenter>,
  links: Vec<ProposalPresenter>,
}

/// [`Store`] keeping everything in process memory. Used by tests
/// and by `cfp server --in-memory`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }
}

fn next_id<T: crate::types::id::marker::Marker>(len: usize) -> Id<T> {
  Id::new(len as u64 + 1)
}

#[async_trait]
impl Store for MemoryStore {
  async fn create_user(&self, form: &CreateUser<'_>) -> Result<Option<User>> {
    let mut tables = self.tables.write().await;
    if tables.users.iter().any(|v| v.email == form.email) {
      return Ok(None);
    }

    let user = User {
      id: next_id::<UserMarker>(tables.users.len()),
      created_at: Utc::now().naive_utc(),
      email: form.email.to_string(),
      passphrase: form.passphrase.to_string(),
      name: form.name.to_string(),
      role: form.role,
      street_address: form.street_address.to_string(),
      town_city: form.town_city.to_string(),
      state: form.state.map(ToString::to_string),
      postal_code: form.postal_code.to_string(),
      country: form.country.to_string(),
      phone: form.phone.map(ToString::to_string),
    };
    tables.users.push(user.clone());
    Ok(Some(user))
  }

  async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
    let tables = self.tables.read().await;
    Ok(tables.users.iter().find(|v| v.email == email).cloned())
  }

  async fn submit_proposal(
    &self,
    proposer_id: Id<UserMarker>,
    form: &submit::Request,
  ) -> Result<Proposal> {
    // Holding the write lock for the whole submission makes it atomic.
    let mut tables = self.tables.write().await;
    let proposal = Proposal {
      id: next_id(tables.proposals.len()),
      created_at: Utc::now().naive_utc(),
      proposer_id,
      title: form.title.clone(),
      session_type: form.session_type,
      text: form.text.clone(),
      day: None,
      session: None,
      room: None,
      quickie_slot: None,
    };
    tables.proposals.push(proposal.clone());

    for entry in &form.presenters {
      let presenter = Presenter {
        id: next_id(tables.presenters.len()),
        email: entry.email.clone(),
        name: entry.name.clone(),
        bio: entry.bio().to_string(),
        country: entry.country.clone(),
        state: entry.state.clone(),
      };
      tables.links.push(ProposalPresenter {
        proposal_id: proposal.id,
        presenter_id: presenter.id,
        is_lead: entry.lead,
      });
      tables.presenters.push(presenter);
    }

    Ok(proposal)
  }

  async fn scheduled_proposals(&self) -> Result<Vec<Proposal>> {
    let tables = self.tables.read().await;
    Ok(
      tables
        .proposals
        .iter()
        .filter(|v| v.is_scheduled())
        .cloned()
        .collect(),
    )
  }

  async fn proposal_presenters(
    &self,
    proposals: &[Id<ProposalMarker>],
  ) -> Result<Vec<ProposalPresenter>> {
    let tables = self.tables.read().await;
    let mut links = tables
      .links
      .iter()
      .filter(|v| proposals.contains(&v.proposal_id))
      .copied()
      .collect::<Vec<_>>();
    links.sort_by_key(|v| (v.proposal_id, v.presenter_id));
    Ok(links)
  }

  async fn presenters(&self, ids: &[Id<PresenterMarker>]) -> Result<Vec<Presenter>> {
    let tables = self.tables.read().await;
    Ok(
      tables
        .presenters
        .iter()
        .filter(|v| ids.contains(&v.id))
        .cloned()
        .collect(),
    )
  }

  async fn schedule_proposal(&self, id: Id<ProposalMarker>, schedule: &Schedule) -> Result<bool> {
    let mut tables = self.tables.write().await;
    let Some(proposal) = tables.proposals.iter_mut().find(|v| v.id == id) else {
      return Ok(false);
    };
    proposal.apply_schedule(schedule);
    Ok(true)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::types::enums::{Day, Role, Session, SessionType};
  use crate::types::form::proposals::submit::Presenter as PresenterForm;

  fn user_form(email: &str) -> CreateUser<'_> {
    CreateUser {
      email,
      passphrase: "digest",
      name: "Russel Winder",
      role: Role::User,
      street_address: "41 Buckmaster Road",
      town_city: "London",
      state: None,
      postal_code: "SW11 1EN",
      country: "United Kingdom",
      phone: None,
    }
  }

  fn request() -> submit::Request {
    let presenter = |email: &str, lead| PresenterForm {
      email: email.into(),
      name: "A".into(),
      bio: None,
      country: "UK".into(),
      state: String::new(),
      lead,
    };
    submit::Request {
      title: "ABCDE".into(),
      text: "A".repeat(50),
      session_type: SessionType::Talk,
      presenters: vec![presenter("a@x.com", true), presenter("b@x.com", false)],
    }
  }

  #[tokio::test]
  async fn test_create_user_rejects_duplicate_email() {
    let store = MemoryStore::new();
    let user = store.create_user(&user_form("a@x.com")).await.unwrap();
    assert_eq!(user.unwrap().id, Id::new(1));
    assert!(store.create_user(&user_form("a@x.com")).await.unwrap().is_none());

    let found = store.find_user_by_email("a@x.com").await.unwrap();
    assert_eq!(found.unwrap().name, "Russel Winder");
    assert!(store.find_user_by_email("b@x.com").await.unwrap().is_none());
  }

  #[tokio::test]
  async fn test_submit_and_schedule() {
    let store = MemoryStore::new();
    let proposal = store.submit_proposal(Id::new(1), &request()).await.unwrap();
    assert!(!proposal.is_scheduled());
    assert!(store.scheduled_proposals().await.unwrap().is_empty());

    let links = store.proposal_presenters(&[proposal.id]).await.unwrap();
    assert_eq!(links.len(), 2);
    assert!(links[0].is_lead);
    assert!(!links[1].is_lead);

    let presenters = store
      .presenters(&[links[0].presenter_id])
      .await
      .unwrap();
    assert_eq!(presenters.len(), 1);
    assert_eq!(presenters[0].bio, submit::DEFAULT_BIO);

    let schedule = Schedule {
      day: Day::Thursday,
      session: Session::First,
      room: None,
      quickie_slot: None,
    };
    assert!(store.schedule_proposal(proposal.id, &schedule).await.unwrap());
    assert!(!store.schedule_proposal(Id::new(99), &schedule).await.unwrap());

    let scheduled = store.scheduled_proposals().await.unwrap();
    assert_eq!(scheduled.len(), 1);
    assert_eq!(scheduled[0].day, Some(Day::Thursday));
  }
}
