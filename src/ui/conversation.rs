use chrono::Local;

use crate::common::{Message, Role};

/// Append-only sequence of chat messages for the running session.
#[derive(Debug, Default)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryView<'a> {
    pub id: &'a str,
    pub role: Role,
    pub alignment: Alignment,
    pub content: &'a str,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversationView<'a> {
    Placeholder,
    Entries(Vec<EntryView<'a>>),
}

pub fn alignment_for(role: Role) -> Alignment {
    match role {
        Role::User => Alignment::Right,
        Role::Assistant => Alignment::Left,
    }
}

/// What the chat area shows for a given message sequence.
pub fn conversation_view(messages: &[Message]) -> ConversationView<'_> {
    if messages.is_empty() {
        return ConversationView::Placeholder;
    }

    ConversationView::Entries(
        messages
            .iter()
            .map(|message| EntryView {
                id: message.id(),
                role: message.role(),
                alignment: alignment_for(message.role()),
                content: message.content(),
                time: message
                    .timestamp()
                    .with_timezone(&Local)
                    .format("%H:%M:%S")
                    .to_string(),
            })
            .collect(),
    )
}
