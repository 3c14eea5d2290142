//! Scoring source port for the style test.

use menubot_types::error::ScoringError;
use menubot_types::questionnaire::{ScoreVector, StyleQuestion, StyleProfile};

/// Remote tabular source of style-test questions, per-answer score vectors,
/// and style descriptions keyed by dimension index.
pub trait ScoringSource: Send + Sync {
    /// All questions, ordered by their 1-based number.
    fn questions(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<StyleQuestion>, ScoringError>> + Send;

    /// Score vector for one answer of one question. An all-zero vector when
    /// no matching row exists.
    fn score_for_answer(
        &self,
        question_number: u32,
        answer: &str,
    ) -> impl std::future::Future<Output = Result<ScoreVector, ScoringError>> + Send;

    /// Style profile for one dimension index.
    fn style_by_index(
        &self,
        index: usize,
    ) -> impl std::future::Future<Output = Result<StyleProfile, ScoringError>> + Send;
}
