//! The dialogue router.
//!
//! Dispatches each inbound event to exactly one handler, in this precedence
//! order:
//!
//! 1. exact command match (abandons any flow in progress, silently);
//! 2. callback-payload prefix match;
//! 3. state-conditioned match against the chat's pending session step;
//! 4. echo fallback for unmatched free text.
//!
//! Catalog-mutating commands are gated on a single configured administrator
//! identity. External-collaborator failures are caught here: logged, the
//! chat receives a fixed unavailable message, and the session is left
//! untouched -- per-event fatal, never process-fatal.

use std::sync::Arc;

use menubot_types::catalog::ItemId;
use menubot_types::error::DispatchError;
use menubot_types::event::{
    Button, CallbackAction, ChatId, Command, InboundEvent, MessageContent, OutboundMessage, UserId,
    MENU_BUTTON,
};
use menubot_types::session::{FlowState, QuizProgress, Session, StyleProgress};

use crate::flow::quiz::TriviaQuiz;
use crate::flow::style::{StyleTest, STYLE_TEST_CATEGORY, STYLE_TEST_INTRO};
use crate::flow::{author, browse, edit, say};
use crate::questionnaire::{advance, outcome_messages, question_keyboard, Questionnaire, StepOutcome};
use crate::repository::{CatalogStore, ScoringSource};
use crate::session::SessionTable;

const DENIED: &str = "\u{274C} Admins only.";
const UNAVAILABLE: &str = "\u{26A0}\u{FE0F} Something went wrong, please try again later.";
const USE_BUTTONS: &str = "Please use the buttons under the question to answer.";
const ADMIN_HELP: &str = "\u{1F4CB} Administrator commands \u{1F4CB}\n\n\
/start -- restart the bot menu\n\
/add_item -- add a menu item (category -> name -> file/link -> payload)\n\
/del_item <ID> -- delete the item with the given ID\n\
/list_items -- show every menu item with its ID, category, and kind\n\
/edit_item <ID> -- edit an item's name and payload by ID\n\
/admin_help -- show this command list\n";

/// Routes inbound events to flow handlers and owns the session table.
pub struct Dispatcher<C, S> {
    store: Arc<C>,
    style: StyleTest<S>,
    quiz: TriviaQuiz,
    sessions: SessionTable,
    admin: UserId,
}

impl<C: CatalogStore, S: ScoringSource> Dispatcher<C, S> {
    pub fn new(store: Arc<C>, scoring: Arc<S>, quiz: TriviaQuiz, admin: UserId) -> Self {
        Self {
            store,
            style: StyleTest::new(scoring),
            quiz,
            sessions: SessionTable::new(),
            admin,
        }
    }

    /// Process one inbound event and return the outbound messages it
    /// produced. Collaborator failures are absorbed here; every callback
    /// event yields exactly one `CallbackAck`.
    pub async fn dispatch(&self, event: InboundEvent) -> Vec<OutboundMessage> {
        let chat = event.chat();
        let is_callback = matches!(event, InboundEvent::Callback { .. });

        let mut messages = match self.route(&event).await {
            Ok(messages) => messages,
            Err(err) => {
                tracing::error!(%chat, error = %err, "collaborator failure while handling event");
                vec![say(chat, UNAVAILABLE)]
            }
        };

        if is_callback
            && !messages
                .iter()
                .any(|m| matches!(m, OutboundMessage::CallbackAck { .. }))
        {
            messages.push(OutboundMessage::CallbackAck { text: None });
        }
        messages
    }

    async fn route(&self, event: &InboundEvent) -> Result<Vec<OutboundMessage>, DispatchError> {
        match event {
            InboundEvent::Message {
                chat,
                sender,
                content,
            } => {
                if let Some(command) = content.as_text().and_then(Command::parse) {
                    // Precedence 1: an exact command always wins and
                    // implicitly abandons any flow in progress.
                    if let Some(abandoned) = self.sessions.clear(*chat) {
                        tracing::debug!(
                            chat = %chat,
                            started_at = %abandoned.started_at,
                            "command abandoned an in-flight flow"
                        );
                    }
                    return self.handle_command(*chat, *sender, command).await;
                }

                // Precedence 3: the chat's pending step consumes the input.
                if let Some(session) = self.sessions.get(*chat) {
                    return self.handle_step(*chat, session, content).await;
                }

                // Precedence 4: echo fallback (text only; stray attachments
                // outside any flow are dropped).
                match content.as_text() {
                    Some(text) => Ok(vec![say(*chat, format!("Didn't understand: {text}"))]),
                    None => Ok(Vec::new()),
                }
            }
            // Precedence 2: callback-payload prefix match.
            InboundEvent::Callback { chat, data, .. } => match data.parse::<CallbackAction>() {
                Ok(action) => self.handle_callback(*chat, action).await,
                Err(err) => {
                    tracing::debug!(chat = %chat, %err, "ignoring malformed callback payload");
                    Ok(Vec::new())
                }
            },
        }
    }

    fn is_admin(&self, sender: UserId) -> bool {
        sender == self.admin
    }

    async fn handle_command(
        &self,
        chat: ChatId,
        sender: UserId,
        command: Command,
    ) -> Result<Vec<OutboundMessage>, DispatchError> {
        if command.is_admin_only() && !self.is_admin(sender) {
            return Ok(vec![say(chat, DENIED)]);
        }

        match command {
            Command::Start => Ok(vec![OutboundMessage::Keyboard {
                chat,
                text: "\u{1F44B} Hi! I am MenuBot.\nPress the button below to open the menu."
                    .to_string(),
                buttons: vec![Button::callback(
                    MENU_BUTTON,
                    CallbackAction::BackToMenu.to_string(),
                )],
            }]),
            Command::Menu => browse::category_menu(self.store.as_ref(), chat).await,
            Command::Quiz => self.start_quiz(chat).await,
            Command::AddItem => {
                let (step, messages) = author::start(chat);
                self.sessions.set(chat, Session::new(step));
                Ok(messages)
            }
            Command::DelItem(None) => Ok(vec![say(chat, "Usage: /del_item <ID>")]),
            Command::DelItem(Some(id)) => {
                self.store.delete_item(id).await?;
                Ok(vec![say(chat, "\u{1F5D1} Item deleted.")])
            }
            Command::EditItem(None) => Ok(vec![say(chat, "Usage: /edit_item <ID>")]),
            Command::EditItem(Some(id)) => self.start_edit(chat, id).await,
            Command::ListItems => self.list_items(chat).await,
            Command::AdminHelp => Ok(vec![say(chat, ADMIN_HELP)]),
        }
    }

    async fn start_edit(
        &self,
        chat: ChatId,
        id: ItemId,
    ) -> Result<Vec<OutboundMessage>, DispatchError> {
        let (step, messages) = edit::start(self.store.as_ref(), chat, id).await?;
        if let Some(step) = step {
            self.sessions.set(chat, Session::new(step));
        }
        Ok(messages)
    }

    async fn list_items(&self, chat: ChatId) -> Result<Vec<OutboundMessage>, DispatchError> {
        let items = self.store.list_all().await?;
        if items.is_empty() {
            return Ok(vec![say(chat, "The menu is empty.")]);
        }
        let mut lines = vec!["\u{1F4CB} Current menu items:".to_string()];
        for item in items {
            lines.push(format!(
                "{}. [{}] {} ({})",
                item.id, item.category, item.name, item.kind
            ));
        }
        Ok(vec![say(chat, lines.join("\n"))])
    }

    async fn handle_callback(
        &self,
        chat: ChatId,
        action: CallbackAction,
    ) -> Result<Vec<OutboundMessage>, DispatchError> {
        match action {
            CallbackAction::Category(category) if category == STYLE_TEST_CATEGORY => {
                self.start_style_test(chat).await
            }
            CallbackAction::Category(category) => {
                browse::item_menu(self.store.as_ref(), chat, &category).await
            }
            CallbackAction::Item(id) => browse::deliver_item(self.store.as_ref(), chat, id).await,
            CallbackAction::BackToMenu => browse::category_menu(self.store.as_ref(), chat).await,
            CallbackAction::QuizAnswer { question, option } => {
                self.quiz_answer(chat, question, option).await
            }
            CallbackAction::StyleAnswer { question, option } => {
                self.style_answer(chat, question, option).await
            }
        }
    }

    async fn start_quiz(&self, chat: ChatId) -> Result<Vec<OutboundMessage>, DispatchError> {
        let count = self.quiz.question_count().await?;
        if count == 0 {
            return Ok(vec![say(chat, "The quiz is not available right now.")]);
        }
        let card = self.quiz.card(0).await?;
        self.sessions.set(
            chat,
            Session::new(FlowState::QuizInProgress(QuizProgress {
                index: 0,
                correct: 0,
            })),
        );
        Ok(vec![
            say(
                chat,
                format!("\u{1F9E0} Quiz time! {count} questions ahead. Pick your answers below."),
            ),
            question_keyboard(chat, &card, |option| CallbackAction::QuizAnswer {
                question: 0,
                option,
            }),
        ])
    }

    async fn start_style_test(&self, chat: ChatId) -> Result<Vec<OutboundMessage>, DispatchError> {
        let count = self.style.question_count().await?;
        if count == 0 {
            return Ok(vec![say(chat, "The style test is not available right now.")]);
        }
        let card = self.style.card(0).await?;
        self.sessions.set(
            chat,
            Session::new(FlowState::StyleTestInProgress(StyleProgress {
                index: 0,
                scores: self.style.blank_tally(),
            })),
        );
        Ok(vec![
            say(chat, STYLE_TEST_INTRO),
            question_keyboard(chat, &card, |option| CallbackAction::StyleAnswer {
                question: 0,
                option,
            }),
        ])
    }

    async fn quiz_answer(
        &self,
        chat: ChatId,
        question: usize,
        option: usize,
    ) -> Result<Vec<OutboundMessage>, DispatchError> {
        // A press after the quiz finished (or was never started) is stale.
        let Some(session) = self.sessions.get(chat) else {
            return Ok(Vec::new());
        };
        let FlowState::QuizInProgress(progress) = &session.step else {
            return Ok(Vec::new());
        };
        let progress = *progress;

        match advance(&self.quiz, progress.correct, progress.index, question, option).await? {
            StepOutcome::Stale => Ok(Vec::new()),
            StepOutcome::Next { tally, index, card } => {
                self.sessions.set(
                    chat,
                    session.advanced(FlowState::QuizInProgress(QuizProgress {
                        index,
                        correct: tally,
                    })),
                );
                Ok(vec![question_keyboard(chat, &card, |option| {
                    CallbackAction::QuizAnswer {
                        question: index,
                        option,
                    }
                })])
            }
            StepOutcome::Finished(outcome) => {
                self.sessions.clear(chat);
                Ok(outcome_messages(chat, outcome))
            }
        }
    }

    async fn style_answer(
        &self,
        chat: ChatId,
        question: usize,
        option: usize,
    ) -> Result<Vec<OutboundMessage>, DispatchError> {
        let Some(session) = self.sessions.get(chat) else {
            return Ok(Vec::new());
        };
        let FlowState::StyleTestInProgress(progress) = &session.step else {
            return Ok(Vec::new());
        };
        let progress = *progress;

        match advance(&self.style, progress.scores, progress.index, question, option).await? {
            StepOutcome::Stale => Ok(Vec::new()),
            StepOutcome::Next { tally, index, card } => {
                self.sessions.set(
                    chat,
                    session.advanced(FlowState::StyleTestInProgress(StyleProgress {
                        index,
                        scores: tally,
                    })),
                );
                Ok(vec![question_keyboard(chat, &card, |option| {
                    CallbackAction::StyleAnswer {
                        question: index,
                        option,
                    }
                })])
            }
            StepOutcome::Finished(outcome) => {
                self.sessions.clear(chat);
                Ok(outcome_messages(chat, outcome))
            }
        }
    }

    async fn handle_step(
        &self,
        chat: ChatId,
        session: Session,
        content: &MessageContent,
    ) -> Result<Vec<OutboundMessage>, DispatchError> {
        let reply = match session.step.clone() {
            FlowState::AwaitingCategory => author::on_category(chat, content),
            FlowState::AwaitingName { category } => author::on_name(chat, category, content),
            FlowState::AwaitingKind { category, name } => {
                author::on_kind(chat, category, name, content)
            }
            FlowState::AwaitingValue {
                category,
                name,
                kind,
            } => author::on_value(self.store.as_ref(), chat, category, name, kind, content).await?,
            FlowState::AwaitingEditName(draft) => edit::on_name(chat, draft, content),
            FlowState::AwaitingEditValue { draft, new_name } => {
                edit::on_value(self.store.as_ref(), chat, draft, new_name, content).await?
            }
            // Questionnaires only consume button presses.
            FlowState::QuizInProgress(_) | FlowState::StyleTestInProgress(_) => {
                return Ok(vec![say(chat, USE_BUTTONS)]);
            }
        };

        match reply.next {
            Some(step) => self.sessions.set(chat, session.advanced(step)),
            None => {
                self.sessions.clear(chat);
            }
        }
        Ok(reply.messages)
    }
}

impl<C, S> std::fmt::Debug for Dispatcher<C, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("admin", &self.admin)
            .field("sessions", &self.sessions)
            .finish()
    }
}
