//! HTTP handlers for the authentication API.

pub mod admin;
pub mod invites;
pub mod login;
pub mod me;
pub mod password;
