//! Questionnaire scoring types shared by both questionnaire variants.
//!
//! The style test accumulates an 8-dimensional [`ScoreVector`] fed by the
//! external scoring source; the fixed quiz counts correct answers and maps
//! the final count onto [`ScoreBand`] ranges.

use serde::{Deserialize, Serialize};

/// Number of style dimensions in the style test.
pub const STYLE_DIMENSIONS: usize = 8;

/// Fixed-length ordered score accumulator, one slot per style dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreVector(pub [i32; STYLE_DIMENSIONS]);

impl ScoreVector {
    pub fn zero() -> Self {
        ScoreVector([0; STYLE_DIMENSIONS])
    }

    /// Element-wise sum.
    pub fn add(&self, other: &ScoreVector) -> ScoreVector {
        let mut out = self.0;
        for (slot, v) in out.iter_mut().zip(other.0.iter()) {
            *slot += v;
        }
        ScoreVector(out)
    }

    /// Index of the maximum element; ties break to the first maximum in
    /// dimension order, so an all-zero vector resolves to dimension 0.
    pub fn argmax(&self) -> usize {
        let mut best = 0;
        for (i, v) in self.0.iter().enumerate() {
            if *v > self.0[best] {
                best = i;
            }
        }
        best
    }
}

impl Default for ScoreVector {
    fn default() -> Self {
        ScoreVector::zero()
    }
}

/// One style-test question, sourced from the external scoring source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleQuestion {
    /// 1-based question number used to key score lookups.
    pub number: u32,
    pub text: String,
    /// Answer-type tag carried through from the source (informational).
    pub answer_type: String,
    /// Ordered answer-option labels.
    pub options: Vec<String>,
}

/// One style dimension's result profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleProfile {
    pub name: String,
    pub description: String,
    /// Result image reference, when the source provides one.
    pub image: Option<String>,
    /// Order-form link for the follow-up call to action.
    pub order_link: Option<String>,
}

/// One fixed-quiz question, embedded in code rather than sourced externally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub prompt: String,
    pub options: Vec<String>,
    /// Index into `options` of the correct answer.
    pub correct: usize,
}

/// Inclusive score range with its interpretation text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBand {
    pub min: u32,
    pub max: u32,
    pub text: String,
}

/// First band whose inclusive `[min, max]` range contains `score`.
pub fn interpret(score: u32, bands: &[ScoreBand]) -> Option<&ScoreBand> {
    bands.iter().find(|b| b.min <= score && score <= b.max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_vector_add() {
        let a = ScoreVector([1, 0, 2, 0, 0, 0, 0, 1]);
        let b = ScoreVector([0, 3, 1, 0, 0, 0, 0, 0]);
        assert_eq!(a.add(&b), ScoreVector([1, 3, 3, 0, 0, 0, 0, 1]));
    }

    #[test]
    fn test_argmax_first_maximum_wins() {
        assert_eq!(ScoreVector([0, 5, 5, 0, 0, 0, 0, 0]).argmax(), 1);
        assert_eq!(ScoreVector([2, 1, 0, 0, 0, 0, 0, 2]).argmax(), 0);
    }

    #[test]
    fn test_argmax_all_zero_is_dimension_zero() {
        assert_eq!(ScoreVector::zero().argmax(), 0);
    }

    #[test]
    fn test_interpret_first_inclusive_match() {
        let bands = vec![
            ScoreBand {
                min: 0,
                max: 1,
                text: "low".to_string(),
            },
            ScoreBand {
                min: 2,
                max: 3,
                text: "high".to_string(),
            },
            // Overlapping band: never reached, first match wins.
            ScoreBand {
                min: 0,
                max: 10,
                text: "shadowed".to_string(),
            },
        ];
        assert_eq!(interpret(0, &bands).unwrap().text, "low");
        assert_eq!(interpret(1, &bands).unwrap().text, "low");
        assert_eq!(interpret(2, &bands).unwrap().text, "high");
        assert_eq!(interpret(3, &bands).unwrap().text, "high");
        assert_eq!(interpret(4, &bands).unwrap().text, "shadowed");
    }

    #[test]
    fn test_interpret_no_match() {
        let bands = vec![ScoreBand {
            min: 0,
            max: 2,
            text: "only".to_string(),
        }];
        assert!(interpret(5, &bands).is_none());
        assert!(interpret(0, &[]).is_none());
    }
}
