pub mod body;
pub mod controllers;
pub mod error;
pub mod gate;
pub mod outcome;
pub mod session;
pub mod templates;

pub use error::Error;
pub use outcome::Outcome;
pub use session::Session;
