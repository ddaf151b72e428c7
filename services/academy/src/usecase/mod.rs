pub mod account;
pub mod catalog;
pub mod confirmation;
pub mod enrollment;
pub mod password;
pub mod registration;
pub mod session;
pub mod token;
