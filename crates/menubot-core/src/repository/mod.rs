//! Port trait definitions.
//!
//! These traits define the external-collaborator surfaces the dialogue core
//! calls out to: the catalog store and the questionnaire scoring source.
//! Implementations live in menubot-infra; the core never depends on any
//! specific storage or transport technology.

pub mod catalog;
pub mod scoring;

pub use catalog::CatalogStore;
pub use scoring::ScoringSource;
