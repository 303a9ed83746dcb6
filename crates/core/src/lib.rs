//! # Park Guide Core
//!
//! Domain types, traits, and error definitions for the Park Guide service.
//! This crate has **no framework dependencies**: it defines the domain model
//! that every other crate implements against.
//!
//! ## Layout
//!
//! - [`park_info`]: today's hours, fireworks and notices, live or fallback
//! - [`message`]: chat messages and the per-session history
//! - [`provider`]: the completion backend abstraction
//! - [`error`]: the error taxonomy shared by all boundaries

pub mod error;
pub mod message;
pub mod park_info;
pub mod provider;

// Re-export key types at crate root for ergonomics
pub use error::{AssistantError, Error, FetchError, ProviderError};
pub use message::{ChatHistory, Message, Role, SessionId};
pub use park_info::{InfoOrigin, ParkInfo};
pub use provider::{Provider, ProviderRequest, ProviderResponse, Usage};
