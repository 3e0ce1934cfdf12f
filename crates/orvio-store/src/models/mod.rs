//! Persistence models.

pub mod invite;
pub mod principal;
pub mod tenant;
