//! Identity module: profile management & authentication
//!
//! Contains the `ProfileService` which orchestrates all account-related
//! use-cases: login, registration, role assignment, permission
//! overrides, password changes.

pub mod service;

pub use service::{AuthResult, ProfileService};
