//! Generic scored-questionnaire engine.
//!
//! Both questionnaire variants (the spreadsheet-backed style test and the
//! embedded fixed quiz) share one state-machine shape: present question
//! `index`, fold the chosen answer into an accumulated tally, then either
//! present the next question or resolve an outcome. The [`Questionnaire`]
//! trait captures what varies -- the question source and the
//! scoring/interpretation rule -- and [`advance`] runs the shared step.

use menubot_types::error::ScoringError;
use menubot_types::event::{Button, CallbackAction, ChatId, OutboundMessage};

/// One question ready for presentation: numbered prompt plus ordered
/// answer-option labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionCard {
    pub prompt: String,
    pub options: Vec<String>,
}

/// Optional call to action attached to a questionnaire result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowUp {
    pub text: String,
    pub button: Button,
}

/// Resolved questionnaire result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionnaireOutcome {
    pub text: String,
    /// Result image; rendered as a photo with `text` as caption when set.
    pub image: Option<String>,
    pub follow_up: Option<FollowUp>,
}

/// A scored questionnaire: a question source plus a scoring and
/// interpretation rule.
pub trait Questionnaire: Send + Sync {
    /// Accumulated score state (a vector for the style test, a correct-count
    /// for the fixed quiz).
    type Tally: Clone + Send + Sync;

    fn blank_tally(&self) -> Self::Tally;

    fn question_count(
        &self,
    ) -> impl std::future::Future<Output = Result<usize, ScoringError>> + Send;

    fn card(
        &self,
        index: usize,
    ) -> impl std::future::Future<Output = Result<QuestionCard, ScoringError>> + Send;

    /// Fold the chosen option of question `index` into the tally.
    fn fold(
        &self,
        tally: Self::Tally,
        index: usize,
        option: usize,
    ) -> impl std::future::Future<Output = Result<Self::Tally, ScoringError>> + Send;

    /// Resolve the final tally into a result.
    fn outcome(
        &self,
        tally: Self::Tally,
    ) -> impl std::future::Future<Output = Result<QuestionnaireOutcome, ScoringError>> + Send;
}

/// Result of one answer-selection step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome<T> {
    /// The event referenced a question other than the current one (a button
    /// press on a superseded message) or an out-of-range option.
    /// Acknowledged but otherwise ignored; nothing is mutated.
    Stale,
    /// Answer folded; present the next question.
    Next {
        tally: T,
        index: usize,
        card: QuestionCard,
    },
    /// Last answer folded; the flow is over.
    Finished(QuestionnaireOutcome),
}

/// Run one answer-selection transition.
///
/// `current` is the index the session is waiting at, `answered`/`option` are
/// the indices embedded in the button payload.
pub async fn advance<Q: Questionnaire>(
    questionnaire: &Q,
    tally: Q::Tally,
    current: usize,
    answered: usize,
    option: usize,
) -> Result<StepOutcome<Q::Tally>, ScoringError> {
    if answered != current {
        return Ok(StepOutcome::Stale);
    }
    let card = questionnaire.card(current).await?;
    if option >= card.options.len() {
        return Ok(StepOutcome::Stale);
    }

    let tally = questionnaire.fold(tally, current, option).await?;

    let next = current + 1;
    if next < questionnaire.question_count().await? {
        let card = questionnaire.card(next).await?;
        Ok(StepOutcome::Next { tally, index: next, card })
    } else {
        Ok(StepOutcome::Finished(questionnaire.outcome(tally).await?))
    }
}

/// Render a question as a keyboard message, one option per button.
/// `payload` builds the callback action for option `i`.
pub fn question_keyboard(
    chat: ChatId,
    card: &QuestionCard,
    payload: impl Fn(usize) -> CallbackAction,
) -> OutboundMessage {
    let buttons = card
        .options
        .iter()
        .enumerate()
        .map(|(i, label)| Button::callback(label.clone(), payload(i).to_string()))
        .collect();
    OutboundMessage::Keyboard {
        chat,
        text: card.prompt.clone(),
        buttons,
    }
}

/// Render a resolved outcome as outbound messages.
pub fn outcome_messages(chat: ChatId, outcome: QuestionnaireOutcome) -> Vec<OutboundMessage> {
    let mut out = Vec::new();
    match outcome.image {
        Some(image) => out.push(OutboundMessage::Photo {
            chat,
            image,
            caption: outcome.text,
        }),
        None => out.push(OutboundMessage::Text {
            chat,
            text: outcome.text,
        }),
    }
    if let Some(follow_up) = outcome.follow_up {
        out.push(OutboundMessage::Keyboard {
            chat,
            text: follow_up.text,
            buttons: vec![follow_up.button],
        });
    }
    out
}
