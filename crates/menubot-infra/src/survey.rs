//! Survey-file scoring source.
//!
//! The production scoring source is a remote spreadsheet with three
//! worksheets (questions, per-answer scores, styles). This adapter reads
//! the same three tables from a local TOML file, validated once at load:
//!
//! ```toml
//! [[questions]]
//! number = 1
//! text = "Pick a palette"
//! type = "choice"
//! options = ["muted", "vivid"]
//!
//! [[scores]]
//! question = 1
//! answer = "muted"
//! vector = [1, 0, 0, 0, 0, 0, 0, 0]
//!
//! [[styles]]
//! name = "Minimalism"
//! description = "Less is more."
//! image = "https://example/minimalism.jpg"   # optional
//! order_link = "https://example/order"       # optional
//! ```

use std::path::Path;

use menubot_core::repository::ScoringSource;
use menubot_types::error::ScoringError;
use menubot_types::questionnaire::{
    ScoreVector, StyleProfile, StyleQuestion, STYLE_DIMENSIONS,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct QuestionRow {
    number: u32,
    text: String,
    #[serde(rename = "type")]
    answer_type: String,
    options: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ScoreRow {
    question: u32,
    answer: String,
    vector: Vec<i32>,
}

#[derive(Debug, Deserialize)]
struct StyleRow {
    name: String,
    description: String,
    image: Option<String>,
    order_link: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SurveyFile {
    #[serde(default)]
    questions: Vec<QuestionRow>,
    #[serde(default)]
    scores: Vec<ScoreRow>,
    #[serde(default)]
    styles: Vec<StyleRow>,
}

/// `ScoringSource` over a parsed survey file.
#[derive(Debug)]
pub struct TomlScoringSource {
    questions: Vec<StyleQuestion>,
    scores: Vec<ScoreRow>,
    styles: Vec<StyleProfile>,
}

impl TomlScoringSource {
    /// Read and parse a survey file.
    pub async fn load(path: &Path) -> Result<Self, ScoringError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|err| ScoringError::Source(format!("{}: {err}", path.display())))?;
        let source = Self::from_toml(&content)?;
        tracing::debug!(
            path = %path.display(),
            questions = source.questions.len(),
            styles = source.styles.len(),
            "loaded survey file"
        );
        Ok(source)
    }

    /// Parse survey TOML from a string.
    pub fn from_toml(content: &str) -> Result<Self, ScoringError> {
        let file: SurveyFile =
            toml::from_str(content).map_err(|err| ScoringError::Source(err.to_string()))?;

        for row in &file.scores {
            if row.vector.len() != STYLE_DIMENSIONS {
                return Err(ScoringError::Source(format!(
                    "score row for question {} answer '{}' has {} dimensions, expected {STYLE_DIMENSIONS}",
                    row.question,
                    row.answer,
                    row.vector.len()
                )));
            }
        }

        let mut questions: Vec<StyleQuestion> = file
            .questions
            .into_iter()
            .map(|row| StyleQuestion {
                number: row.number,
                text: row.text,
                answer_type: row.answer_type,
                options: row
                    .options
                    .into_iter()
                    .map(|opt| opt.trim().to_string())
                    .collect(),
            })
            .collect();
        questions.sort_by_key(|q| q.number);

        let styles = file
            .styles
            .into_iter()
            .map(|row| StyleProfile {
                name: row.name,
                description: row.description,
                image: row.image.filter(|s| !s.is_empty()),
                order_link: row.order_link.filter(|s| !s.is_empty()),
            })
            .collect();

        Ok(Self {
            questions,
            scores: file.scores,
            styles,
        })
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn style_count(&self) -> usize {
        self.styles.len()
    }
}

impl ScoringSource for TomlScoringSource {
    async fn questions(&self) -> Result<Vec<StyleQuestion>, ScoringError> {
        Ok(self.questions.clone())
    }

    async fn score_for_answer(
        &self,
        question_number: u32,
        answer: &str,
    ) -> Result<ScoreVector, ScoringError> {
        let row = self
            .scores
            .iter()
            .find(|row| row.question == question_number && row.answer.trim() == answer.trim());
        // No matching row contributes nothing, mirroring the spreadsheet
        // lookup's behavior.
        let Some(row) = row else {
            return Ok(ScoreVector::zero());
        };
        let mut vector = [0; STYLE_DIMENSIONS];
        vector.copy_from_slice(&row.vector);
        Ok(ScoreVector(vector))
    }

    async fn style_by_index(&self, index: usize) -> Result<StyleProfile, ScoringError> {
        self.styles
            .get(index)
            .cloned()
            .ok_or(ScoringError::MissingStyle(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SURVEY: &str = r#"
[[questions]]
number = 2
text = "Second question"
type = "choice"
options = ["x", "y"]

[[questions]]
number = 1
text = "First question"
type = "choice"
options = [" muted ", "vivid"]

[[scores]]
question = 1
answer = "muted"
vector = [1, 0, 0, 0, 0, 0, 0, 0]

[[scores]]
question = 1
answer = "vivid"
vector = [0, 0, 0, 0, 2, 0, 0, 0]

[[styles]]
name = "Minimalism"
description = "Less is more."
order_link = "https://example/order"

[[styles]]
name = "Cyberpunk"
description = "Neon."
image = ""
"#;

    #[tokio::test]
    async fn test_questions_sorted_and_trimmed() {
        let source = TomlScoringSource::from_toml(SURVEY).unwrap();
        let questions = source.questions().await.unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].number, 1);
        assert_eq!(questions[0].options, vec!["muted", "vivid"]);
    }

    #[tokio::test]
    async fn test_score_lookup_and_zero_fallback() {
        let source = TomlScoringSource::from_toml(SURVEY).unwrap();
        let v = source.score_for_answer(1, "muted").await.unwrap();
        assert_eq!(v.0[0], 1);

        let v = source.score_for_answer(1, "  vivid  ").await.unwrap();
        assert_eq!(v.0[4], 2);

        // Unknown answers score nothing.
        let v = source.score_for_answer(9, "nope").await.unwrap();
        assert_eq!(v, ScoreVector::zero());
    }

    #[tokio::test]
    async fn test_style_lookup_and_empty_strings_dropped() {
        let source = TomlScoringSource::from_toml(SURVEY).unwrap();
        let style = source.style_by_index(0).await.unwrap();
        assert_eq!(style.name, "Minimalism");
        assert_eq!(style.order_link.as_deref(), Some("https://example/order"));

        let style = source.style_by_index(1).await.unwrap();
        assert_eq!(style.image, None);

        assert!(matches!(
            source.style_by_index(9).await,
            Err(ScoringError::MissingStyle(9))
        ));
    }

    #[test]
    fn test_rejects_wrong_vector_length() {
        let bad = r#"
[[scores]]
question = 1
answer = "a"
vector = [1, 2]
"#;
        let err = TomlScoringSource::from_toml(bad).unwrap_err();
        assert!(err.to_string().contains("expected 8"));
    }

    #[test]
    fn test_rejects_invalid_toml() {
        assert!(TomlScoringSource::from_toml("not { toml").is_err());
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("survey.toml");
        tokio::fs::write(&path, SURVEY).await.unwrap();

        let source = TomlScoringSource::load(&path).await.unwrap();
        assert_eq!(source.questions().await.unwrap().len(), 2);

        let missing = dir.path().join("absent.toml");
        assert!(TomlScoringSource::load(&missing).await.is_err());
    }
}
