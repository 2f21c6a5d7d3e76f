mod presenter;
mod proposal;
mod user;

pub use presenter::{Presenter, ProposalPresenter};
pub use proposal::{Proposal, Schedule};
pub use user::User;
