//! HTTP route handlers.

pub mod advice;
pub mod auth;
pub mod health;
