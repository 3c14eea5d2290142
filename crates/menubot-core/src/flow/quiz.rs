//! The fixed-question quiz as a [`Questionnaire`].
//!
//! Questions and score-range interpretations are embedded in code, not
//! sourced externally. The tally is the count of correct answers; the final
//! score maps onto the first inclusive score band that contains it, falling
//! back to a plain score report when no band matches.

use menubot_types::error::ScoringError;
use menubot_types::questionnaire::{interpret, QuizQuestion, ScoreBand};

use crate::questionnaire::{QuestionCard, Questionnaire, QuestionnaireOutcome};

/// Fixed-list scored quiz.
pub struct TriviaQuiz {
    questions: Vec<QuizQuestion>,
    bands: Vec<ScoreBand>,
}

impl TriviaQuiz {
    pub fn new(questions: Vec<QuizQuestion>, bands: Vec<ScoreBand>) -> Self {
        Self { questions, bands }
    }

    /// The built-in question set shipped with the bot.
    pub fn builtin() -> Self {
        let questions = vec![
            QuizQuestion {
                prompt: "What does a neural network need to paint your portrait?".to_string(),
                options: vec![
                    "A text prompt and a few reference photos".to_string(),
                    "A darkroom and chemicals".to_string(),
                    "A very long exposure".to_string(),
                ],
                correct: 0,
            },
            QuizQuestion {
                prompt: "Which light flatters a portrait most?".to_string(),
                options: vec![
                    "Harsh midday sun".to_string(),
                    "Soft diffused light".to_string(),
                    "A single bare bulb from below".to_string(),
                ],
                correct: 1,
            },
            QuizQuestion {
                prompt: "What does an image's aspect ratio describe?".to_string(),
                options: vec![
                    "Width relative to height".to_string(),
                    "The weight of the lens".to_string(),
                    "The number of colors".to_string(),
                ],
                correct: 0,
            },
        ];
        let bands = vec![
            ScoreBand {
                min: 0,
                max: 1,
                text: "You are just getting started -- browse the menu for guides and try again!"
                    .to_string(),
            },
            ScoreBand {
                min: 2,
                max: 2,
                text: "Solid! You already have a good eye for imagery.".to_string(),
            },
            ScoreBand {
                min: 3,
                max: 3,
                text: "Perfect score -- you are ready for a neuro-photo session!".to_string(),
            },
        ];
        Self::new(questions, bands)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

impl Questionnaire for TriviaQuiz {
    type Tally = u32;

    fn blank_tally(&self) -> u32 {
        0
    }

    async fn question_count(&self) -> Result<usize, ScoringError> {
        Ok(self.questions.len())
    }

    async fn card(&self, index: usize) -> Result<QuestionCard, ScoringError> {
        let question = self
            .questions
            .get(index)
            .ok_or(ScoringError::QuestionOutOfRange(index))?;
        Ok(QuestionCard {
            prompt: format!("{}) {}", index + 1, question.prompt),
            options: question.options.clone(),
        })
    }

    async fn fold(&self, tally: u32, index: usize, option: usize) -> Result<u32, ScoringError> {
        let question = self
            .questions
            .get(index)
            .ok_or(ScoringError::QuestionOutOfRange(index))?;
        Ok(tally + u32::from(option == question.correct))
    }

    async fn outcome(&self, tally: u32) -> Result<QuestionnaireOutcome, ScoringError> {
        let total = self.questions.len();
        let score_line = format!("\u{1F3C1} You scored {tally} of {total}.");
        let text = match interpret(tally, &self.bands) {
            Some(band) => format!("{score_line}\n\n{}", band.text),
            None => score_line,
        };
        Ok(QuestionnaireOutcome {
            text,
            image: None,
            follow_up: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questionnaire::{advance, StepOutcome};

    fn two_question_quiz() -> TriviaQuiz {
        TriviaQuiz::new(
            vec![
                QuizQuestion {
                    prompt: "first".to_string(),
                    options: vec!["right".to_string(), "wrong".to_string()],
                    correct: 0,
                },
                QuizQuestion {
                    prompt: "second".to_string(),
                    options: vec!["wrong".to_string(), "right".to_string()],
                    correct: 1,
                },
            ],
            vec![
                ScoreBand {
                    min: 0,
                    max: 1,
                    text: "keep trying".to_string(),
                },
                ScoreBand {
                    min: 2,
                    max: 2,
                    text: "full marks".to_string(),
                },
            ],
        )
    }

    #[tokio::test]
    async fn test_full_run_both_correct() {
        let quiz = two_question_quiz();
        let out = advance(&quiz, quiz.blank_tally(), 0, 0, 0).await.unwrap();
        let StepOutcome::Next { tally, index, .. } = out else {
            panic!("expected Next");
        };
        assert_eq!((tally, index), (1, 1));

        let out = advance(&quiz, tally, 1, 1, 1).await.unwrap();
        let StepOutcome::Finished(outcome) = out else {
            panic!("expected Finished");
        };
        assert!(outcome.text.contains("2 of 2"));
        assert!(outcome.text.contains("full marks"));
    }

    #[tokio::test]
    async fn test_score_bounded_by_question_count() {
        let quiz = two_question_quiz();
        let mut tally = quiz.blank_tally();
        for index in 0..2 {
            // Always pick option 0; only question 0 has it correct.
            tally = quiz.fold(tally, index, 0).await.unwrap();
        }
        assert!(tally <= 2);
        assert_eq!(tally, 1);
    }

    #[tokio::test]
    async fn test_outcome_without_matching_band() {
        let quiz = TriviaQuiz::new(
            vec![QuizQuestion {
                prompt: "only".to_string(),
                options: vec!["a".to_string(), "b".to_string()],
                correct: 0,
            }],
            vec![ScoreBand {
                min: 5,
                max: 9,
                text: "unreachable".to_string(),
            }],
        );
        let outcome = quiz.outcome(1).await.unwrap();
        assert_eq!(outcome.text, "\u{1F3C1} You scored 1 of 1.");
    }

    #[tokio::test]
    async fn test_builtin_quiz_is_consistent() {
        let quiz = TriviaQuiz::builtin();
        assert!(!quiz.is_empty());
        for index in 0..quiz.len() {
            let card = quiz.card(index).await.unwrap();
            assert!(!card.options.is_empty());
        }
        // A perfect run lands in a band.
        let outcome = quiz.outcome(quiz.len() as u32).await.unwrap();
        assert!(outcome.text.contains("ready for a neuro-photo session"));
    }
}
