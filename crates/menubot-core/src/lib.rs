//! Conversation core for menubot: the session table, the dialogue router,
//! the flow handlers, and the port traits the infrastructure layer
//! implements.
//!
//! This crate defines the "ports" (the catalog store and the scoring source)
//! as traits and depends only on `menubot-types` -- never on `menubot-infra`
//! or any IO crate.

pub mod dispatch;
pub mod flow;
pub mod questionnaire;
pub mod repository;
pub mod session;
