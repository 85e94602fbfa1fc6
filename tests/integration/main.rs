//! HTTP-level integration tests, run against the in-memory backend.

mod helpers;
mod pagination_test;
mod team_test;
mod user_test;
