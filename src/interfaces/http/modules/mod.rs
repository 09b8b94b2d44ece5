pub mod auth;
pub mod catalogs;
pub mod health;
pub mod quotations;
pub mod requirements;
pub mod users;
