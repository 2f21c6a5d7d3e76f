use chrono::NaiveDateTime;
use sqlx::FromRow;

use crate::{
  database::{error::ErrorExt, Connection, Result},
  store::CreateUser,
  types::{
    enums::Role,
    id::{marker::UserMarker, Id},
  },
};

#[derive(Debug, Clone, FromRow, PartialEq, Eq)]
pub struct User {
  pub id: Id<UserMarker>,
  pub created_at: NaiveDateTime,
  pub email: String,
  /// Hex encoded SHA-512 digest of the passphrase.
  pub passphrase: String,
  pub name: String,
  pub role: Role,
  pub street_address: String,
  pub town_city: String,
  pub state: Option<String>,
  pub postal_code: String,
  pub country: String,
  pub phone: Option<String>,
}

impl User {
  #[tracing::instrument(skip(conn, condition), fields(condition = "<hidden>"))]
  pub async fn by_email(conn: &mut Connection, condition: &str) -> Result<Option<Self>> {
    sqlx::query_as::<_, Self>(r#"SELECT * FROM "users" WHERE email = $1"#)
      .bind(condition)
      .fetch_optional(conn)
      .await
      .into_db_error()
  }

  /// Inserts a new user unless the email address is taken already.
  #[tracing::instrument(skip_all)]
  pub async fn insert(conn: &mut Connection, form: &CreateUser<'_>) -> Result<Option<Self>> {
    sqlx::query_as::<_, Self>(
      r#"INSERT INTO "users" (email, passphrase, name, role, street_address,
            town_city, state, postal_code, country, phone)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
         ON CONFLICT (email) DO NOTHING
         RETURNING *"#,
    )
    .bind(form.email)
    .bind(form.passphrase)
    .bind(form.name)
    .bind(form.role)
    .bind(form.street_address)
    .bind(form.town_city)
    .bind(form.state)
    .bind(form.postal_code)
    .bind(form.country)
    .bind(form.phone)
    .fetch_optional(conn)
    .await
    .into_db_error()
  }
}
