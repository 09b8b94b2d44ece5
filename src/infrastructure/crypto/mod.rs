//! Cryptography helpers: password hashing and JWT session tokens.

pub mod jwt;
pub mod password;
