//! HTTP request handlers.

pub mod entity;
pub mod health;
pub mod user;
