pub mod account;
pub mod auth;
pub mod catalog;
pub mod enrollment;
pub mod health;
pub mod token;
