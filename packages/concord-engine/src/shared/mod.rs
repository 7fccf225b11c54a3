//! Shared domain models used across features

pub mod models;
