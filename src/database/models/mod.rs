pub mod user;

pub use user::{PublicUser, User};
