//! Komp Core Library
//!
//! Shared functionality for Komp components:
//! - Configuration resolution and hierarchy
//! - Durable session store (auth token + identity)
//! - App-wide event bus for refresh triggers
//! - Common error types

pub mod config;
pub mod error;
pub mod events;
pub mod session;
pub mod timefmt;
pub mod tracing_init;

pub use config::Config;
pub use error::{Error, Result};
pub use events::{AppEvent, EventBus};
pub use session::{AuthUser, Session, SessionStore};
