//! Read-only projections of the schedule.
use actix_web::{web, HttpResponse};
use std::collections::{BTreeMap, BTreeSet};

use crate::{
  http::Error,
  schema::{Proposal, ProposalPresenter},
  types::{
    id::{marker::ProposalMarker, Id},
    schedule::{Presentation, PresenterView},
  },
  App,
};

async fn scheduled(app: &App) -> Result<(Vec<Proposal>, Vec<ProposalPresenter>), Error> {
  let proposals = app.store.scheduled_proposals().await?;
  let ids = proposals.iter().map(|v| v.id).collect::<Vec<_>>();
  let links = if ids.is_empty() {
    Vec::new()
  } else {
    app.store.proposal_presenters(&ids).await?
  };
  Ok((proposals, links))
}

#[tracing::instrument(skip_all)]
pub async fn presentations(app: web::Data<App>) -> Result<HttpResponse, Error> {
  let (proposals, links) = scheduled(&app).await?;

  let mut presenters: BTreeMap<Id<ProposalMarker>, Vec<_>> = BTreeMap::new();
  for link in links {
    presenters
      .entry(link.proposal_id)
      .or_default()
      .push(link.presenter_id);
  }

  let presentations = proposals
    .iter()
    .filter_map(|v| Presentation::new(v, presenters.remove(&v.id).unwrap_or_default()))
    .collect::<Vec<_>>();

  Ok(HttpResponse::Ok().json(presentations))
}

#[tracing::instrument(skip_all)]
pub async fn presenters(app: web::Data<App>) -> Result<HttpResponse, Error> {
  let (_, links) = scheduled(&app).await?;

  let ids = links
    .iter()
    .map(|v| v.presenter_id)
    .collect::<BTreeSet<_>>()
    .into_iter()
    .collect::<Vec<_>>();

  let presenters = if ids.is_empty() {
    Vec::new()
  } else {
    app.store.presenters(&ids).await?
  };

  let views = presenters
    .into_iter()
    .map(PresenterView::from)
    .collect::<Vec<_>>();

  Ok(HttpResponse::Ok().json(views))
}
