//! Catalog browsing: category list, per-category item list, item delivery.
//!
//! Browsing holds no session state. Every step is driven by a callback
//! payload, and after an item is delivered the chat is simply idle again.

use menubot_types::catalog::{ItemId, ItemKind};
use menubot_types::error::DispatchError;
use menubot_types::event::{Button, CallbackAction, ChatId, OutboundMessage};

use crate::flow::say;
use crate::repository::CatalogStore;

pub const EMPTY_MENU: &str = "The menu is empty. The administrator fills it with /add_item.";
const CHOOSE_CATEGORY: &str = "Choose a category:";
const BACK_LABEL: &str = "\u{2B05}\u{FE0F} Back";

/// List the distinct categories as a keyboard, one button per category.
pub async fn category_menu<C: CatalogStore>(
    store: &C,
    chat: ChatId,
) -> Result<Vec<OutboundMessage>, DispatchError> {
    let categories = store.list_categories().await?;
    if categories.is_empty() {
        return Ok(vec![say(chat, EMPTY_MENU)]);
    }
    let buttons = categories
        .into_iter()
        .map(|category| {
            let payload = CallbackAction::Category(category.clone()).to_string();
            Button::callback(category, payload)
        })
        .collect();
    Ok(vec![OutboundMessage::Keyboard {
        chat,
        text: CHOOSE_CATEGORY.to_string(),
        buttons,
    }])
}

/// List one category's items plus a back button. An empty category answers
/// with a toast on the callback ack only.
pub async fn item_menu<C: CatalogStore>(
    store: &C,
    chat: ChatId,
    category: &str,
) -> Result<Vec<OutboundMessage>, DispatchError> {
    let items = store.list_items(category).await?;
    if items.is_empty() {
        return Ok(vec![OutboundMessage::CallbackAck {
            text: Some("No items in this category yet.".to_string()),
        }]);
    }
    let mut buttons: Vec<Button> = items
        .into_iter()
        .map(|item| {
            let payload = CallbackAction::Item(item.id).to_string();
            Button::callback(item.name, payload)
        })
        .collect();
    buttons.push(Button::callback(
        BACK_LABEL,
        CallbackAction::BackToMenu.to_string(),
    ));
    Ok(vec![OutboundMessage::Keyboard {
        chat,
        text: format!("Category \u{00AB}{category}\u{00BB}: choose an item:"),
        buttons,
    }])
}

/// Deliver one item: file payloads as a downloadable document, link payloads
/// as a text message.
pub async fn deliver_item<C: CatalogStore>(
    store: &C,
    chat: ChatId,
    id: ItemId,
) -> Result<Vec<OutboundMessage>, DispatchError> {
    let Some(item) = store.get_item(id).await? else {
        return Ok(vec![OutboundMessage::CallbackAck {
            text: Some("Not found.".to_string()),
        }]);
    };
    let message = match item.kind {
        ItemKind::File => OutboundMessage::Document {
            chat,
            file_id: item.payload,
            caption: item.name,
        },
        ItemKind::Link => say(chat, format!("{}\n\n{}", item.name, item.payload)),
    };
    Ok(vec![message])
}
