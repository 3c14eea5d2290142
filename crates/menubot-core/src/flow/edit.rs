//! Admin editing flow: two steps keyed by an existing item's identity.
//!
//! New name (or `skip`) then new payload matching the item's existing kind
//! (or `skip`). Identity, kind, and category are immutable after creation.

use menubot_types::catalog::{ItemId, ItemKind, ItemPatch};
use menubot_types::error::DispatchError;
use menubot_types::event::{ChatId, MessageContent, OutboundMessage};
use menubot_types::session::{EditDraft, FlowState};

use crate::flow::{say, FlowReply};
use crate::repository::CatalogStore;

/// Entry: `/edit_item <id>`. Fetches the current record; an unknown id is a
/// denial with no session created.
pub async fn start<C: CatalogStore>(
    store: &C,
    chat: ChatId,
    id: ItemId,
) -> Result<(Option<FlowState>, Vec<OutboundMessage>), DispatchError> {
    let Some(item) = store.get_item(id).await? else {
        return Ok((None, vec![say(chat, "\u{274C} Item not found.")]));
    };
    let prompt = format!(
        "Editing #{id}:\nCurrent name: {}\nEnter a new name, or `skip` to keep it.",
        item.name
    );
    let draft = EditDraft {
        id,
        kind: item.kind,
        old_name: item.name,
        old_payload: item.payload,
    };
    Ok((
        Some(FlowState::AwaitingEditName(draft)),
        vec![say(chat, prompt)],
    ))
}

pub fn on_name(chat: ChatId, draft: EditDraft, content: &MessageContent) -> FlowReply {
    let Some(text) = content.as_text().map(str::trim).filter(|t| !t.is_empty()) else {
        return FlowReply::to(
            FlowState::AwaitingEditName(draft),
            vec![say(chat, "Send the new name as text, or `skip`.")],
        );
    };
    let new_name = if text.eq_ignore_ascii_case("skip") {
        draft.old_name.clone()
    } else {
        text.to_string()
    };
    let prompt = match draft.kind {
        ItemKind::File => "Send a new file (document or video), or `skip` to keep the current one.",
        ItemKind::Link => "Enter a new link, or `skip` to keep the current one.",
    };
    FlowReply::to(
        FlowState::AwaitingEditValue { draft, new_name },
        vec![say(chat, prompt)],
    )
}

/// Terminal step: resolve the new payload against the item's kind and update
/// the record in place.
pub async fn on_value<C: CatalogStore>(
    store: &C,
    chat: ChatId,
    draft: EditDraft,
    new_name: String,
    content: &MessageContent,
) -> Result<FlowReply, DispatchError> {
    let new_payload = match draft.kind {
        // For file items any non-attachment input (including `skip`) keeps
        // the old payload.
        ItemKind::File => match content.file_id() {
            Some(file_id) => file_id.to_string(),
            None => draft.old_payload.clone(),
        },
        ItemKind::Link => match content.as_text().map(str::trim) {
            Some(text) if text.eq_ignore_ascii_case("skip") => draft.old_payload.clone(),
            Some(text) if !text.is_empty() => text.to_string(),
            _ => {
                return Ok(FlowReply::to(
                    FlowState::AwaitingEditValue { draft, new_name },
                    vec![say(chat, "Enter the new link as text, or `skip`.")],
                ));
            }
        },
    };

    store
        .update_item(
            draft.id,
            ItemPatch {
                name: Some(new_name.clone()),
                payload: Some(new_payload),
                ..ItemPatch::default()
            },
        )
        .await?;

    Ok(FlowReply::done(vec![say(
        chat,
        format!(
            "\u{2705} Item #{} updated:\n\u{00AB}{new_name}\u{00BB}",
            draft.id
        ),
    )]))
}
