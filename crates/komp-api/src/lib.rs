//! Komp API client library
//!
//! Typed wrappers around the competitions backend REST API. One module per
//! backend domain; each function maps to exactly one HTTP call. The client
//! never owns authoritative state: every mutation is followed by a re-fetch
//! on the caller's side.

pub mod auth;
pub mod bots;
pub mod client;
pub mod competitions;
pub mod friends;
pub mod matches;
pub mod notifications;
pub mod types;
pub mod users;

pub use client::{ApiClient, ApiError};
