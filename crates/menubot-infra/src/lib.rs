//! Infrastructure adapters for menubot.
//!
//! Implements the port traits defined in `menubot-core`: an in-process
//! catalog store and a survey-file scoring source (the persistent catalog
//! table and the remote spreadsheet are external collaborators; these are
//! the in-process stand-ins). Also loads bot configuration from the
//! environment.

pub mod config;
pub mod memory;
pub mod survey;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use menubot_core::dispatch::Dispatcher;
    use menubot_core::flow::quiz::TriviaQuiz;
    use menubot_types::event::{ChatId, InboundEvent, OutboundMessage, UserId};

    use crate::memory::MemoryCatalogStore;
    use crate::survey::TomlScoringSource;

    const SURVEY: &str = r#"
[[questions]]
number = 1
text = "Pick a palette"
type = "choice"
options = ["muted", "vivid"]

[[scores]]
question = 1
answer = "vivid"
vector = [0, 3, 0, 0, 0, 0, 0, 0]

[[styles]]
name = "Minimalism"
description = "Less is more."

[[styles]]
name = "Cyberpunk"
description = "Neon everywhere."
image = "https://example/cyberpunk.jpg"
order_link = "https://example/order"
"#;

    /// Full stack: admin authors an item, a guest browses to it, then runs
    /// the style test off the survey file.
    #[tokio::test]
    async fn test_end_to_end_author_browse_and_style_test() {
        let admin = UserId(1);
        let guest = UserId(2);
        let chat = ChatId(10);
        let dispatcher = Dispatcher::new(
            Arc::new(MemoryCatalogStore::new()),
            Arc::new(TomlScoringSource::from_toml(SURVEY).unwrap()),
            TriviaQuiz::builtin(),
            admin,
        );

        for line in ["/add_item", "Travel", "Paris Guide", "link", "https://x/y"] {
            dispatcher.dispatch(InboundEvent::text(chat, admin, line)).await;
        }

        let out = dispatcher.dispatch(InboundEvent::text(chat, guest, "/menu")).await;
        let OutboundMessage::Keyboard { buttons, .. } = &out[0] else {
            panic!("expected category keyboard, got {out:?}");
        };
        assert_eq!(buttons[0].label, "Travel");

        let out = dispatcher
            .dispatch(InboundEvent::callback(chat, guest, "cat:Travel"))
            .await;
        let OutboundMessage::Keyboard { buttons, .. } = &out[0] else {
            panic!("expected item keyboard, got {out:?}");
        };
        assert_eq!(buttons[0].label, "Paris Guide");

        // Style test: the single question, answered "vivid", lands on
        // dimension 1 (Cyberpunk) whose profile carries image + order link.
        dispatcher
            .dispatch(InboundEvent::callback(chat, guest, "cat:Style test"))
            .await;
        let out = dispatcher
            .dispatch(InboundEvent::callback(chat, guest, "nstyle:0:1"))
            .await;
        assert!(matches!(
            &out[0],
            OutboundMessage::Photo { caption, .. } if caption.contains("Cyberpunk")
        ));
        assert!(matches!(
            &out[1],
            OutboundMessage::Keyboard { buttons, .. } if buttons.len() == 1
        ));
    }
}
