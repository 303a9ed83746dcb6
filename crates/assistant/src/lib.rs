//! The Park Guide assistant.
//!
//! A visitor asks a question → the question is appended to their history →
//! a single grounded prompt (persona, today's [`ParkInfo`], static park
//! knowledge, the question) goes to the completion provider → the reply, or
//! [`APOLOGY_MESSAGE`] on any failure, is appended.
//!
//! [`Assistant`] runs the stateless turn. [`AssistantSession`] owns one
//! visitor's history and allows one turn at a time. [`SessionStore`] keeps
//! the live sessions.
//!
//! [`ParkInfo`]: parkguide_core::ParkInfo

pub mod assistant;
pub mod prompt;
pub mod session;
pub mod store;

pub use assistant::{APOLOGY_MESSAGE, AskOutcome, Assistant, normalize_question};
pub use prompt::{PERSONA, compose_prompt};
pub use session::AssistantSession;
pub use store::SessionStore;
