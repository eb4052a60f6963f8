pub mod authentication;
pub mod category;
pub mod user;
