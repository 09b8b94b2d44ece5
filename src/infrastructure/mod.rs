pub mod crypto;
pub mod database;
