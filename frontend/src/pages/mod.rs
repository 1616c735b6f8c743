pub mod admin;
pub mod wheel;
