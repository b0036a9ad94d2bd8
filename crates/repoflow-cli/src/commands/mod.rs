//! Command handlers grouped by resource.

pub(crate) mod repository;
pub(crate) mod workspace;
