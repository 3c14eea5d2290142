//! Flow handlers: catalog browsing, admin authoring, admin editing, and the
//! two scored-questionnaire variants.
//!
//! Step handlers follow one contract: consume the collected scratch plus the
//! new input, validate the input's shape, and either advance the flow (with
//! a prompt for the next field) or finish it (persisting and confirming).
//! Invalid input re-prompts without advancing and without mutating scratch.

pub mod author;
pub mod browse;
pub mod edit;
pub mod quiz;
pub mod style;

use menubot_types::event::{ChatId, OutboundMessage};
use menubot_types::session::FlowState;

/// Reply of one step handler: the step to wait at next (`None` clears the
/// session -- the flow is over) and the messages to emit.
#[derive(Debug)]
pub struct FlowReply {
    pub next: Option<FlowState>,
    pub messages: Vec<OutboundMessage>,
}

impl FlowReply {
    /// Wait at `step` next (also used to re-prompt by passing the current
    /// step back unchanged).
    pub fn to(step: FlowState, messages: Vec<OutboundMessage>) -> Self {
        Self {
            next: Some(step),
            messages,
        }
    }

    /// Terminal step: clear the session.
    pub fn done(messages: Vec<OutboundMessage>) -> Self {
        Self {
            next: None,
            messages,
        }
    }
}

/// Plain text reply helper.
pub(crate) fn say(chat: ChatId, text: impl Into<String>) -> OutboundMessage {
    OutboundMessage::Text {
        chat,
        text: text.into(),
    }
}
