mod login;
mod logout;
mod register;

pub use login::{login, login_form};
pub use logout::logout;
pub use register::{register, register_form};
