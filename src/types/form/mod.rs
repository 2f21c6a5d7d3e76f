pub mod proposals;
pub mod users;
