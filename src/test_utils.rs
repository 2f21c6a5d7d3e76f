use actix_web::cookie::Cookie;
use chrono::NaiveDateTime;
use std::sync::Arc;

use crate::{
  config,
  http::Session,
  schema::{Proposal, User},
  store::{CreateUser, MemoryStore, Store},
  types::{
    enums::{Role, SessionType},
    id::Id,
  },
  util::hash_passphrase,
  App,
};

pub const PASSPHRASE: &str = "a nice lengthy passphrase";

#[must_use]
pub fn proposal(id: u64, proposer_id: u64) -> Proposal {
  Proposal {
    id: Id::new(id),
    created_at: NaiveDateTime::default(),
    proposer_id: Id::new(proposer_id),
    title: "ABCDE".into(),
    session_type: SessionType::Talk,
    text: "A".repeat(50),
    day: None,
    session: None,
    room: None,
    quickie_slot: None,
  }
}

#[must_use]
pub fn app(config: config::Server) -> App {
  App::with_store(config, Arc::new(MemoryStore::new())).unwrap()
}

pub async fn create_user(app: &App, email: &str) -> User {
  let passphrase = hash_passphrase(PASSPHRASE);
  app
    .store
    .create_user(&CreateUser {
      email,
      passphrase: &passphrase,
      name: "Russel Winder",
      role: Role::User,
      street_address: "41 Buckmaster Road",
      town_city: "London",
      state: None,
      postal_code: "SW11 1EN",
      country: "United Kingdom",
      phone: None,
    })
    .await
    .unwrap()
    .unwrap()
}

#[must_use]
pub fn session_cookie(app: &App, email: &str) -> Cookie<'static> {
  Session::cookie(Session::encode(email, app).unwrap())
}
