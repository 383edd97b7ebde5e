//! `bazaar-api` — HTTP boundary for the marketplace backend.

pub mod app;
