//! Shared domain types for menubot.
//!
//! Everything the core and infra crates exchange lives here: chat events,
//! catalog items, conversation sessions, questionnaire scoring types, and
//! the error taxonomy. This crate has no IO and no async code.

pub mod catalog;
pub mod error;
pub mod event;
pub mod questionnaire;
pub mod session;
