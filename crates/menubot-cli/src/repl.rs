//! Stdin-driven dispatcher loop for local exercise.
//!
//! Each line becomes one inbound event:
//!
//! - plain text        -> a text message
//! - `cb:<payload>`    -> a button press with that callback payload
//! - `file:<id>`       -> an attachment upload with that file reference
//!
//! Prefix a line with `guest ` to send it as a non-administrator user.
//! Outbound messages are rendered to stdout; keyboards show each button's
//! label and the payload or URL it would fire.

use tokio::io::{AsyncBufReadExt, BufReader};

use menubot_core::dispatch::Dispatcher;
use menubot_core::repository::{CatalogStore, ScoringSource};
use menubot_types::event::{ButtonAction, ChatId, InboundEvent, OutboundMessage, UserId};

const REPL_CHAT: ChatId = ChatId(1);
const GUEST: UserId = UserId(-1);

pub async fn run<C, S>(dispatcher: Dispatcher<C, S>, admin: UserId) -> anyhow::Result<()>
where
    C: CatalogStore,
    S: ScoringSource,
{
    println!("menubot repl -- type /start to begin, Ctrl+D to exit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (sender, line) = match line.strip_prefix("guest ") {
            Some(rest) => (GUEST, rest),
            None => (admin, line),
        };

        let event = if let Some(payload) = line.strip_prefix("cb:") {
            InboundEvent::callback(REPL_CHAT, sender, payload)
        } else if let Some(file_id) = line.strip_prefix("file:") {
            InboundEvent::attachment(REPL_CHAT, sender, file_id)
        } else {
            InboundEvent::text(REPL_CHAT, sender, line)
        };

        for message in dispatcher.dispatch(event).await {
            render(&message);
        }
    }
    Ok(())
}

fn render(message: &OutboundMessage) {
    match message {
        OutboundMessage::Text { text, .. } => println!("{text}"),
        OutboundMessage::Keyboard { text, buttons, .. } => {
            println!("{text}");
            for button in buttons {
                match &button.action {
                    ButtonAction::Callback(data) => {
                        println!("  [{}] cb:{data}", button.label);
                    }
                    ButtonAction::Url(url) => {
                        println!("  [{}] {url}", button.label);
                    }
                }
            }
        }
        OutboundMessage::Document { file_id, caption, .. } => {
            println!("<document {file_id}> {caption}");
        }
        OutboundMessage::Photo { image, caption, .. } => {
            println!("<photo {image}> {caption}");
        }
        OutboundMessage::CallbackAck { text } => {
            if let Some(text) = text {
                println!("(toast) {text}");
            }
        }
    }
}
