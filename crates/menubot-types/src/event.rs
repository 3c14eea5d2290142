//! Inbound chat events, outbound messages, and wire-token parsing.
//!
//! The chat transport (out of scope here) converts protocol updates into
//! [`InboundEvent`] values and turns [`OutboundMessage`] values back into
//! protocol calls. Command tokens and colon-delimited callback payloads are
//! parsed into typed values so routing precedence stays explicit.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::catalog::ItemId;

/// Opaque identity of a conversation, stable per end user/chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatId(pub i64);

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a message sender, used for administrator gating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Body of a free-form message: text, or an uploaded document/video reduced
/// to its opaque file reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageContent {
    Text(String),
    Attachment { file_id: String },
}

impl MessageContent {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MessageContent::Text(t) => Some(t),
            MessageContent::Attachment { .. } => None,
        }
    }

    pub fn file_id(&self) -> Option<&str> {
        match self {
            MessageContent::Text(_) => None,
            MessageContent::Attachment { file_id } => Some(file_id),
        }
    }
}

/// One inbound event from the chat transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InboundEvent {
    /// A free-form message (text or attachment).
    Message {
        chat: ChatId,
        sender: UserId,
        content: MessageContent,
    },
    /// A button press carrying an opaque callback payload.
    Callback {
        chat: ChatId,
        sender: UserId,
        data: String,
    },
}

impl InboundEvent {
    pub fn text(chat: ChatId, sender: UserId, text: impl Into<String>) -> Self {
        InboundEvent::Message {
            chat,
            sender,
            content: MessageContent::Text(text.into()),
        }
    }

    pub fn attachment(chat: ChatId, sender: UserId, file_id: impl Into<String>) -> Self {
        InboundEvent::Message {
            chat,
            sender,
            content: MessageContent::Attachment {
                file_id: file_id.into(),
            },
        }
    }

    pub fn callback(chat: ChatId, sender: UserId, data: impl Into<String>) -> Self {
        InboundEvent::Callback {
            chat,
            sender,
            data: data.into(),
        }
    }

    pub fn chat(&self) -> ChatId {
        match self {
            InboundEvent::Message { chat, .. } | InboundEvent::Callback { chat, .. } => *chat,
        }
    }

    pub fn sender(&self) -> UserId {
        match self {
            InboundEvent::Message { sender, .. } | InboundEvent::Callback { sender, .. } => *sender,
        }
    }
}

/// What pressing a button does: fire a callback payload back at the bot, or
/// open an external URL (the style-test order link).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ButtonAction {
    Callback(String),
    Url(String),
}

/// One inline keyboard button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub label: String,
    pub action: ButtonAction,
}

impl Button {
    pub fn callback(label: impl Into<String>, data: impl Into<String>) -> Self {
        Button {
            label: label.into(),
            action: ButtonAction::Callback(data.into()),
        }
    }

    pub fn url(label: impl Into<String>, url: impl Into<String>) -> Self {
        Button {
            label: label.into(),
            action: ButtonAction::Url(url.into()),
        }
    }
}

/// One outbound effect for the chat transport to perform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutboundMessage {
    /// Plain text message.
    Text { chat: ChatId, text: String },
    /// Text message with an inline keyboard, one button per row.
    Keyboard {
        chat: ChatId,
        text: String,
        buttons: Vec<Button>,
    },
    /// A downloadable attachment (catalog items of kind `file`).
    Document {
        chat: ChatId,
        file_id: String,
        caption: String,
    },
    /// An image with a caption (style-test results).
    Photo {
        chat: ChatId,
        image: String,
        caption: String,
    },
    /// Acknowledgement of a button press, with an optional toast text.
    /// Every callback event produces exactly one of these.
    CallbackAck { text: Option<String> },
}

/// A recognized chat command.
///
/// `DelItem`/`EditItem` carry `None` when the command token was recognized
/// but the id argument was missing or non-numeric; the handler answers with
/// a usage message in that case instead of falling through to the echo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Menu,
    AddItem,
    DelItem(Option<ItemId>),
    EditItem(Option<ItemId>),
    ListItems,
    Quiz,
    AdminHelp,
}

/// Label of the reply-keyboard menu button; treated as the `/menu` command.
pub const MENU_BUTTON: &str = "\u{1F4CB} Menu";

impl Command {
    /// Parse a message text into a command, or `None` when the text is not a
    /// recognized command token (it then falls to the state-conditioned or
    /// echo branch of the router).
    pub fn parse(text: &str) -> Option<Command> {
        let text = text.trim();
        if text == MENU_BUTTON {
            return Some(Command::Menu);
        }

        let mut parts = text.split_whitespace();
        let head = parts.next()?;
        let arg = parts.next();

        match head {
            "/start" => Some(Command::Start),
            "/menu" => Some(Command::Menu),
            "/add_item" => Some(Command::AddItem),
            "/del_item" => Some(Command::DelItem(arg.and_then(|a| a.parse().ok()))),
            "/edit_item" => Some(Command::EditItem(arg.and_then(|a| a.parse().ok()))),
            "/list_items" => Some(Command::ListItems),
            "/quiz" => Some(Command::Quiz),
            "/admin_help" => Some(Command::AdminHelp),
            _ => None,
        }
    }

    /// Whether this command mutates or inspects the catalog and is therefore
    /// restricted to the configured administrator.
    pub fn is_admin_only(&self) -> bool {
        matches!(
            self,
            Command::AddItem
                | Command::DelItem(_)
                | Command::EditItem(_)
                | Command::ListItems
                | Command::AdminHelp
        )
    }
}

/// A parsed colon-delimited callback payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackAction {
    /// `cat:<category>` -- list the items of a category.
    Category(String),
    /// `item:<id>` -- deliver one item.
    Item(ItemId),
    /// `back_to_menu` -- return to the category list.
    BackToMenu,
    /// `quiz:<question>:<option>` -- fixed-quiz answer.
    QuizAnswer { question: usize, option: usize },
    /// `nstyle:<question>:<option>` -- style-test answer.
    StyleAnswer { question: usize, option: usize },
}

fn parse_indices(rest: &str, payload: &str) -> Result<(usize, usize), String> {
    let (q, o) = rest
        .split_once(':')
        .ok_or_else(|| format!("malformed callback payload: '{payload}'"))?;
    let question = q
        .parse::<usize>()
        .map_err(|_| format!("invalid question index in '{payload}'"))?;
    let option = o
        .parse::<usize>()
        .map_err(|_| format!("invalid option index in '{payload}'"))?;
    Ok((question, option))
}

impl FromStr for CallbackAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "back_to_menu" {
            return Ok(CallbackAction::BackToMenu);
        }
        let (prefix, rest) = s
            .split_once(':')
            .ok_or_else(|| format!("unknown callback payload: '{s}'"))?;
        match prefix {
            "cat" if !rest.is_empty() => Ok(CallbackAction::Category(rest.to_string())),
            "item" => rest
                .parse::<ItemId>()
                .map(CallbackAction::Item)
                .map_err(|e| format!("bad item payload: {e}")),
            "quiz" => {
                let (question, option) = parse_indices(rest, s)?;
                Ok(CallbackAction::QuizAnswer { question, option })
            }
            "nstyle" => {
                let (question, option) = parse_indices(rest, s)?;
                Ok(CallbackAction::StyleAnswer { question, option })
            }
            _ => Err(format!("unknown callback payload: '{s}'")),
        }
    }
}

impl fmt::Display for CallbackAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallbackAction::Category(cat) => write!(f, "cat:{cat}"),
            CallbackAction::Item(id) => write!(f, "item:{id}"),
            CallbackAction::BackToMenu => write!(f, "back_to_menu"),
            CallbackAction::QuizAnswer { question, option } => {
                write!(f, "quiz:{question}:{option}")
            }
            CallbackAction::StyleAnswer { question, option } => {
                write!(f, "nstyle:{question}:{option}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_parse_basic() {
        assert_eq!(Command::parse("/start"), Some(Command::Start));
        assert_eq!(Command::parse("/menu"), Some(Command::Menu));
        assert_eq!(Command::parse(MENU_BUTTON), Some(Command::Menu));
        assert_eq!(Command::parse("/quiz"), Some(Command::Quiz));
        assert_eq!(Command::parse("hello"), None);
        assert_eq!(Command::parse("/unknown"), None);
    }

    #[test]
    fn test_command_parse_with_id() {
        assert_eq!(
            Command::parse("/del_item 7"),
            Some(Command::DelItem(Some(ItemId(7))))
        );
        // Recognized command, malformed argument: handler shows usage.
        assert_eq!(Command::parse("/del_item abc"), Some(Command::DelItem(None)));
        assert_eq!(Command::parse("/edit_item"), Some(Command::EditItem(None)));
    }

    #[test]
    fn test_admin_only_commands() {
        assert!(Command::AddItem.is_admin_only());
        assert!(Command::ListItems.is_admin_only());
        assert!(!Command::Start.is_admin_only());
        assert!(!Command::Quiz.is_admin_only());
        assert!(!Command::Menu.is_admin_only());
    }

    #[test]
    fn test_callback_roundtrip() {
        for action in [
            CallbackAction::Category("Travel".to_string()),
            CallbackAction::Item(ItemId(3)),
            CallbackAction::BackToMenu,
            CallbackAction::QuizAnswer {
                question: 1,
                option: 2,
            },
            CallbackAction::StyleAnswer {
                question: 0,
                option: 4,
            },
        ] {
            let s = action.to_string();
            let parsed: CallbackAction = s.parse().unwrap();
            assert_eq!(action, parsed);
        }
    }

    #[test]
    fn test_callback_rejects_malformed() {
        assert!("".parse::<CallbackAction>().is_err());
        assert!("cat:".parse::<CallbackAction>().is_err());
        assert!("item:x".parse::<CallbackAction>().is_err());
        assert!("quiz:1".parse::<CallbackAction>().is_err());
        assert!("quiz:a:b".parse::<CallbackAction>().is_err());
        assert!("bogus:1:2".parse::<CallbackAction>().is_err());
    }

    #[test]
    fn test_callback_category_with_colon() {
        // Category labels may themselves contain colons; only the first
        // delimiter splits the prefix.
        let parsed: CallbackAction = "cat:Tips: advanced".parse().unwrap();
        assert_eq!(parsed, CallbackAction::Category("Tips: advanced".to_string()));
    }

    #[test]
    fn test_message_content_accessors() {
        let text = MessageContent::Text("hi".to_string());
        assert_eq!(text.as_text(), Some("hi"));
        assert_eq!(text.file_id(), None);

        let file = MessageContent::Attachment {
            file_id: "f1".to_string(),
        };
        assert_eq!(file.as_text(), None);
        assert_eq!(file.file_id(), Some("f1"));
    }
}
