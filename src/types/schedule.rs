//! JSON projections of the schedule consumed by the schedule viewer.
use serde::Serialize;

use crate::schema::{Presenter, Proposal};
use crate::types::{
  enums::{Day, QuickieSlot, Room, Session},
  id::{
    marker::{PresenterMarker, ProposalMarker},
    Id,
  },
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Presentation {
  pub id: Id<ProposalMarker>,
  pub title: String,
  pub text: String,
  pub day: Day,
  pub session: Session,
  pub room: Option<Room>,
  pub presenters: Vec<Id<PresenterMarker>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub quickie_slot: Option<QuickieSlot>,
}

impl Presentation {
  /// Returns `None` for proposals without a day and a session.
  #[must_use]
  pub fn new(proposal: &Proposal, presenters: Vec<Id<PresenterMarker>>) -> Option<Self> {
    let (Some(day), Some(session)) = (proposal.day, proposal.session) else {
      return None;
    };
    Some(Self {
      id: proposal.id,
      title: proposal.title.clone(),
      text: proposal.text.clone(),
      day,
      session,
      room: proposal.room,
      presenters,
      quickie_slot: proposal.quickie_slot,
    })
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresenterView {
  pub id: Id<PresenterMarker>,
  pub name: String,
  pub bio: String,
  pub country: String,
  pub state: String,
}

impl From<Presenter> for PresenterView {
  fn from(value: Presenter) -> Self {
    Self {
      id: value.id,
      name: value.name,
      bio: value.bio,
      country: value.country,
      state: value.state,
    }
  }
}
