//! Closed sets of values stored on users and proposals.
//!
//! Each enum maps onto a Postgres enum type of the same name
//! and serializes as its lowercase representation.
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("{value} is not a known {kind}")]
pub struct UnknownVariant {
  pub kind: &'static str,
  pub value: String,
}

macro_rules! string_repr {
  ($name:ident, $kind:literal, { $( $variant:ident => $repr:literal, )* }) => {
    impl $name {
      pub const ALL: &'static [Self] = &[$( Self::$variant, )*];

      /// The representation shared by JSON and the database.
      #[must_use]
      pub const fn as_str(self) -> &'static str {
        match self {
          $( Self::$variant => $repr, )*
        }
      }
    }

    impl std::fmt::Display for $name {
      fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
      }
    }

    impl std::str::FromStr for $name {
      type Err = UnknownVariant;

      fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
          $( $repr => Ok(Self::$variant), )*
          _ => Err(UnknownVariant { kind: $kind, value: s.to_string() }),
        }
      }
    }
  };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "role", rename_all = "snake_case")]
pub enum Role {
  #[default]
  User,
  Reviewer,
  Admin,
}

string_repr!(Role, "role", {
  User => "user",
  Reviewer => "reviewer",
  Admin => "admin",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "session_type", rename_all = "snake_case")]
pub enum SessionType {
  Quickie,
  Talk,
  Miniworkshop,
  Workshop,
  FullDayWorkshop,
  Keynote,
}

string_repr!(SessionType, "session type", {
  Quickie => "quickie",
  Talk => "talk",
  Miniworkshop => "miniworkshop",
  Workshop => "workshop",
  FullDayWorkshop => "full_day_workshop",
  Keynote => "keynote",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "day", rename_all = "snake_case")]
pub enum Day {
  Wednesday,
  Thursday,
  Friday,
  Saturday,
}

string_repr!(Day, "day", {
  Wednesday => "wednesday",
  Thursday => "thursday",
  Friday => "friday",
  Saturday => "saturday",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize, sqlx::Type)]
#[sqlx(type_name = "session")]
pub enum Session {
  #[serde(rename = "session_1")]
  #[sqlx(rename = "session_1")]
  First,
  #[serde(rename = "session_2")]
  #[sqlx(rename = "session_2")]
  Second,
  #[serde(rename = "session_3")]
  #[sqlx(rename = "session_3")]
  Third,
  #[serde(rename = "session_4")]
  #[sqlx(rename = "session_4")]
  Fourth,
}

string_repr!(Session, "session", {
  First => "session_1",
  Second => "session_2",
  Third => "session_3",
  Fourth => "session_4",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, sqlx::Type)]
#[sqlx(type_name = "room")]
pub enum Room {
  #[serde(rename = "bristol_1")]
  #[sqlx(rename = "bristol_1")]
  Bristol1,
  #[serde(rename = "bristol_2")]
  #[sqlx(rename = "bristol_2")]
  Bristol2,
  #[serde(rename = "bristol_3")]
  #[sqlx(rename = "bristol_3")]
  Bristol3,
  #[serde(rename = "empire")]
  #[sqlx(rename = "empire")]
  Empire,
  #[serde(rename = "concorde")]
  #[sqlx(rename = "concorde")]
  Concorde,
}

string_repr!(Room, "room", {
  Bristol1 => "bristol_1",
  Bristol2 => "bristol_2",
  Bristol3 => "bristol_3",
  Empire => "empire",
  Concorde => "concorde",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, sqlx::Type)]
#[sqlx(type_name = "quickie_slot")]
pub enum QuickieSlot {
  #[serde(rename = "slot_1")]
  #[sqlx(rename = "slot_1")]
  First,
  #[serde(rename = "slot_2")]
  #[sqlx(rename = "slot_2")]
  Second,
  #[serde(rename = "slot_3")]
  #[sqlx(rename = "slot_3")]
  Third,
  #[serde(rename = "slot_4")]
  #[sqlx(rename = "slot_4")]
  Fourth,
}

string_repr!(QuickieSlot, "quickie slot", {
  First => "slot_1",
  Second => "slot_2",
  Third => "slot_3",
  Fourth => "slot_4",
});

#[cfg(test)]
mod tests {
  use super::*;

  #[track_caller]
  fn assert_repr_matches_serde<T>(all: &[T], as_str: fn(T) -> &'static str)
  where
    T: Copy + Serialize + std::str::FromStr + PartialEq + std::fmt::Debug,
    <T as std::str::FromStr>::Err: std::fmt::Debug,
  {
    for variant in all {
      let json = serde_json::to_value(variant).unwrap();
      assert_eq!(json, serde_json::Value::String(as_str(*variant).to_string()));
      assert_eq!(as_str(*variant).parse::<T>().unwrap(), *variant);
    }
  }

  #[test]
  fn test_representations() {
    assert_repr_matches_serde(Role::ALL, Role::as_str);
    assert_repr_matches_serde(SessionType::ALL, SessionType::as_str);
    assert_repr_matches_serde(Day::ALL, Day::as_str);
    assert_repr_matches_serde(Session::ALL, Session::as_str);
    assert_repr_matches_serde(Room::ALL, Room::as_str);
    assert_repr_matches_serde(QuickieSlot::ALL, QuickieSlot::as_str);
  }

  #[test]
  fn test_unknown_variant() {
    let error = "lightning".parse::<SessionType>().unwrap_err();
    assert_eq!(error.to_string(), "lightning is not a known session type");
    assert_eq!(Role::default(), Role::User);
  }
}
