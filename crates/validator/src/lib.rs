#![cfg_attr(test, allow(clippy::unwrap_used))]

mod error;
mod std_impl;

pub use error::*;
pub mod extras;

pub trait Validate {
  fn validate(&self) -> Result<(), ValidateError>;
}

/// Length of a value as users perceive it. Strings are measured
/// in Unicode scalar values rather than bytes.
pub trait HasLength {
  fn length(&self) -> usize;
}
