//! The spreadsheet-backed style test as a [`Questionnaire`].
//!
//! Accumulates an 8-dimensional score vector; the result is the profile of
//! the dimension with the maximum accumulated score (first maximum wins on
//! ties), delivered as a photo when the profile carries an image and
//! followed by an order-link call to action when one is configured.

use std::sync::Arc;

use menubot_types::error::ScoringError;
use menubot_types::event::Button;
use menubot_types::questionnaire::ScoreVector;

use crate::questionnaire::{FollowUp, QuestionCard, Questionnaire, QuestionnaireOutcome};
use crate::repository::ScoringSource;

/// Reserved category label whose `cat:` callback starts the style test
/// instead of listing items.
pub const STYLE_TEST_CATEGORY: &str = "Style test";

/// Intro message sent when the test starts.
pub const STYLE_TEST_INTRO: &str = "\u{1F9E0} Test: which neuro-photo style suits you?\n\n\
A short and fun test is ahead. Answer honestly and intuitively -- at the end \
you will get the neuro-photo style that best highlights your individuality.\n\n\
Ready? Press the buttons below \u{1F447}";

/// Style test backed by an external scoring source.
pub struct StyleTest<S> {
    source: Arc<S>,
}

impl<S: ScoringSource> StyleTest<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }
}

impl<S: ScoringSource> Questionnaire for StyleTest<S> {
    type Tally = ScoreVector;

    fn blank_tally(&self) -> ScoreVector {
        ScoreVector::zero()
    }

    async fn question_count(&self) -> Result<usize, ScoringError> {
        Ok(self.source.questions().await?.len())
    }

    async fn card(&self, index: usize) -> Result<QuestionCard, ScoringError> {
        let questions = self.source.questions().await?;
        let question = questions
            .get(index)
            .ok_or(ScoringError::QuestionOutOfRange(index))?;
        Ok(QuestionCard {
            prompt: format!("{}) {}", index + 1, question.text),
            options: question.options.clone(),
        })
    }

    async fn fold(
        &self,
        tally: ScoreVector,
        index: usize,
        option: usize,
    ) -> Result<ScoreVector, ScoringError> {
        let questions = self.source.questions().await?;
        let question = questions
            .get(index)
            .ok_or(ScoringError::QuestionOutOfRange(index))?;
        let answer = question
            .options
            .get(option)
            .ok_or(ScoringError::QuestionOutOfRange(index))?;
        let delta = self.source.score_for_answer(question.number, answer).await?;
        Ok(tally.add(&delta))
    }

    async fn outcome(&self, tally: ScoreVector) -> Result<QuestionnaireOutcome, ScoringError> {
        let profile = self.source.style_by_index(tally.argmax()).await?;
        let text = format!(
            "\u{1F31F} Your neuro-photo style: {}\n\n{}",
            profile.name, profile.description
        );
        let follow_up = profile.order_link.map(|link| FollowUp {
            text: "Want a custom photo in this style? Leave a request \u{1F447}".to_string(),
            button: Button::url("Order a photo", link),
        });
        Ok(QuestionnaireOutcome {
            text,
            image: profile.image,
            follow_up,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use menubot_types::questionnaire::{StyleProfile, StyleQuestion};

    /// Fixed two-question source: the first option of every question scores
    /// into dimension 2, the second into dimension 5.
    struct FixedSource;

    impl ScoringSource for FixedSource {
        async fn questions(&self) -> Result<Vec<StyleQuestion>, ScoringError> {
            Ok((1..=2)
                .map(|number| StyleQuestion {
                    number,
                    text: format!("question {number}"),
                    answer_type: "choice".to_string(),
                    options: vec!["left".to_string(), "right".to_string()],
                })
                .collect())
        }

        async fn score_for_answer(
            &self,
            _question_number: u32,
            answer: &str,
        ) -> Result<ScoreVector, ScoringError> {
            let mut v = [0; 8];
            match answer {
                "left" => v[2] = 1,
                "right" => v[5] = 1,
                _ => {}
            }
            Ok(ScoreVector(v))
        }

        async fn style_by_index(&self, index: usize) -> Result<StyleProfile, ScoringError> {
            Ok(StyleProfile {
                name: format!("style-{index}"),
                description: "desc".to_string(),
                image: None,
                order_link: (index == 2).then(|| "https://order.example".to_string()),
            })
        }
    }

    #[tokio::test]
    async fn test_fold_accumulates_chosen_dimension() {
        let test = StyleTest::new(Arc::new(FixedSource));
        let tally = test.fold(ScoreVector::zero(), 0, 0).await.unwrap();
        let tally = test.fold(tally, 1, 0).await.unwrap();
        assert_eq!(tally.0[2], 2);
        assert_eq!(tally.argmax(), 2);
    }

    #[tokio::test]
    async fn test_outcome_is_argmax_profile_with_follow_up() {
        let test = StyleTest::new(Arc::new(FixedSource));
        let mut scores = [0; 8];
        scores[2] = 3;
        let outcome = test.outcome(ScoreVector(scores)).await.unwrap();
        assert!(outcome.text.contains("style-2"));
        assert!(outcome.follow_up.is_some());
    }

    #[tokio::test]
    async fn test_all_zero_tally_resolves_dimension_zero() {
        let test = StyleTest::new(Arc::new(FixedSource));
        let outcome = test.outcome(ScoreVector::zero()).await.unwrap();
        assert!(outcome.text.contains("style-0"));
        assert!(outcome.follow_up.is_none());
    }

    #[tokio::test]
    async fn test_card_numbers_from_one() {
        let test = StyleTest::new(Arc::new(FixedSource));
        let card = test.card(0).await.unwrap();
        assert_eq!(card.prompt, "1) question 1");
        assert!(test.card(9).await.is_err());
    }
}
