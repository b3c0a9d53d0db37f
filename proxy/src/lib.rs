pub mod auth;
pub mod client;
pub mod function;
pub mod invoke;
pub mod project;
pub mod utils;
