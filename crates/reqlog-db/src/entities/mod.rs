//! Database entities

pub mod request;
