pub mod enums;
pub mod error;
pub mod form;
pub mod id;
pub mod schedule;
pub mod validation;

pub use error::Error;
pub use id::Id;
