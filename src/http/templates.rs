use actix_web::HttpResponse;
use serde_json::{json, Map, Value};
use tera::{Context, Tera};

use super::{Error, Session};
use crate::{util::md, App};

/// Pages are compiled into the binary so the server can be
/// started from any working directory.
const TEMPLATES: &[(&str, &str)] = &[
  ("base.html", include_str!("../../templates/base.html")),
  ("failure.html", include_str!("../../templates/failure.html")),
  ("index.html", include_str!("../../templates/index.html")),
  ("login.html", include_str!("../../templates/login.html")),
  ("register.html", include_str!("../../templates/register.html")),
  ("submit.html", include_str!("../../templates/submit.html")),
];

pub fn load() -> Result<Tera, tera::Error> {
  let mut tera = Tera::default();
  tera.add_raw_templates(TEMPLATES.iter().copied())?;
  Ok(tera)
}

/// Renders `template` with `page` merged on top of the values
/// shared by every page.
#[tracing::instrument(skip(app, session, page))]
pub fn render(
  app: &App,
  session: &Session,
  template: &str,
  page: Value,
) -> Result<HttpResponse, Error> {
  let mut base = Map::new();
  base.insert("year".into(), app.config.year.into());
  base.insert("maintenance".into(), app.config.maintenance.into());
  base.insert("call_open".into(), app.config.call_open.into());
  base.insert("reviewing_allowed".into(), app.config.reviewing_allowed.into());
  base.insert("call_reachable".into(), app.config.is_call_reachable().into());
  base.insert(
    "logged_in".into(),
    session.user().map(|v| v.email.clone()).into(),
  );

  let page = match page {
    Value::Object(page) => md(&base, &page),
    _ => base,
  };

  let mut context = Context::new();
  context.insert("page", &page);

  let body = app.templates.render(template, &context)?;
  Ok(
    HttpResponse::Ok()
      .content_type(mime::TEXT_HTML_UTF_8)
      .body(body),
  )
}

/// The page shown when a visitor is not allowed to do something.
pub fn failure(
  app: &App,
  session: &Session,
  title: &str,
  message: &str,
) -> Result<HttpResponse, Error> {
  render(
    app,
    session,
    "failure.html",
    json!({ "title": title, "data": message }),
  )
}
