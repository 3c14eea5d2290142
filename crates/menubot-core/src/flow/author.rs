//! Admin authoring flow: linear 4-step item collection.
//!
//! category text -> name text -> kind token (`file`/`link`) -> payload
//! (attachment for files, text for links). Each step validates shape and
//! re-prompts in place on bad input; the terminal step persists the item
//! and clears the session.

use menubot_types::catalog::{ItemKind, NewItem};
use menubot_types::error::DispatchError;
use menubot_types::event::{ChatId, MessageContent, OutboundMessage};
use menubot_types::session::FlowState;

use crate::flow::{say, FlowReply};
use crate::repository::CatalogStore;

const PROMPT_CATEGORY: &str = "Enter the item category:";
const PROMPT_NAME: &str = "Enter the item name:";
const PROMPT_KIND: &str = "Will this be a file or a link? Reply `file` or `link`.";
const PROMPT_VALUE_FILE: &str = "Now send the file (document or video):";
const PROMPT_VALUE_LINK: &str = "Now send the link:";

/// Entry: `/add_item`. Returns the first step and its prompt.
pub fn start(chat: ChatId) -> (FlowState, Vec<OutboundMessage>) {
    (FlowState::AwaitingCategory, vec![say(chat, PROMPT_CATEGORY)])
}

fn non_empty_text(content: &MessageContent) -> Option<String> {
    let text = content.as_text()?.trim();
    (!text.is_empty()).then(|| text.to_string())
}

pub fn on_category(chat: ChatId, content: &MessageContent) -> FlowReply {
    match non_empty_text(content) {
        Some(category) => FlowReply::to(
            FlowState::AwaitingName { category },
            vec![say(chat, PROMPT_NAME)],
        ),
        None => FlowReply::to(
            FlowState::AwaitingCategory,
            vec![say(chat, "Send the category as text.")],
        ),
    }
}

pub fn on_name(chat: ChatId, category: String, content: &MessageContent) -> FlowReply {
    match non_empty_text(content) {
        Some(name) => FlowReply::to(
            FlowState::AwaitingKind { category, name },
            vec![say(chat, PROMPT_KIND)],
        ),
        None => FlowReply::to(
            FlowState::AwaitingName { category },
            vec![say(chat, "Send the name as text.")],
        ),
    }
}

pub fn on_kind(chat: ChatId, category: String, name: String, content: &MessageContent) -> FlowReply {
    let kind = content.as_text().and_then(|t| t.trim().parse::<ItemKind>().ok());
    match kind {
        Some(kind) => {
            let prompt = match kind {
                ItemKind::File => PROMPT_VALUE_FILE,
                ItemKind::Link => PROMPT_VALUE_LINK,
            };
            FlowReply::to(
                FlowState::AwaitingValue {
                    category,
                    name,
                    kind,
                },
                vec![say(chat, prompt)],
            )
        }
        None => FlowReply::to(
            FlowState::AwaitingKind { category, name },
            vec![say(chat, "It must be `file` or `link`.")],
        ),
    }
}

/// Terminal step: collect the payload matching the chosen kind, persist,
/// confirm.
pub async fn on_value<C: CatalogStore>(
    store: &C,
    chat: ChatId,
    category: String,
    name: String,
    kind: ItemKind,
    content: &MessageContent,
) -> Result<FlowReply, DispatchError> {
    let payload = match kind {
        ItemKind::File => match content.file_id() {
            Some(file_id) => file_id.to_string(),
            None => {
                return Ok(FlowReply::to(
                    FlowState::AwaitingValue {
                        category,
                        name,
                        kind,
                    },
                    vec![say(chat, "Send the payload as a file (document or video).")],
                ));
            }
        },
        ItemKind::Link => match non_empty_text(content) {
            Some(text) => text,
            None => {
                return Ok(FlowReply::to(
                    FlowState::AwaitingValue {
                        category,
                        name,
                        kind,
                    },
                    vec![say(chat, "Send the link as text.")],
                ));
            }
        },
    };

    store
        .add_item(NewItem {
            category: category.clone(),
            name: name.clone(),
            kind,
            payload,
        })
        .await?;

    Ok(FlowReply::done(vec![say(
        chat,
        format!("\u{2705} Item \u{00AB}{name}\u{00BB} added to category \u{00AB}{category}\u{00BB}."),
    )]))
}
