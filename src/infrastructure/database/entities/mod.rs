//! Database entities

pub mod catalog_option;
pub mod contact;
pub mod profile;
pub mod quotation;
pub mod requirement_item;
