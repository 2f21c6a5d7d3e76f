pub mod figment;
pub mod merge;
pub mod passphrase;
pub mod sensitive;
pub mod validator;

pub use merge::md;
pub use passphrase::hash_passphrase;
pub use sensitive::Sensitive;
