//! Shared helpers used across the server layers.

pub mod invite;
pub mod parse;
pub mod query;
pub mod validation;
