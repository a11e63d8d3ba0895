pub mod admin;
pub mod index;
pub mod login;
