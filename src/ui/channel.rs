use std::collections::VecDeque;

use crate::common::Message;

/// Input buffer plus the gate that keeps one assistant request in flight.
#[derive(Debug, Default)]
pub struct MessageChannel {
    pub input: String,
    awaiting_reply: bool,
    deferred: VecDeque<String>,
}

impl MessageChannel {
    pub fn is_enabled(&self) -> bool {
        !self.awaiting_reply
    }

    pub fn can_send_input(&self) -> bool {
        self.is_enabled() && !self.input.trim().is_empty()
    }

    /// Builds a user message from `text`, or nothing for blank text or while
    /// a reply is pending. Acceptance closes the gate until `reply_settled`.
    pub fn submit(&mut self, text: &str) -> Option<Message> {
        if text.trim().is_empty() || !self.is_enabled() {
            return None;
        }
        self.awaiting_reply = true;
        Some(Message::user(text))
    }

    /// Submits the typed input and clears the buffer when it is accepted.
    pub fn submit_input(&mut self) -> Option<Message> {
        let message = self.submit(&self.input.clone())?;
        self.input.clear();
        Some(message)
    }

    /// Like `submit`, but queues the text instead of dropping it while the
    /// gate is closed.
    pub fn submit_or_defer(&mut self, text: String) -> Option<Message> {
        if text.trim().is_empty() {
            return None;
        }
        if !self.is_enabled() {
            self.deferred.push_back(text);
            log::info!(
                "Assistant is busy; deferring submission ({} queued)",
                self.deferred_len()
            );
            return None;
        }
        self.submit(&text)
    }

    /// Reopens the gate and submits the oldest deferred text, if any.
    pub fn reply_settled(&mut self) -> Option<Message> {
        self.awaiting_reply = false;
        let text = self.deferred.pop_front()?;
        self.submit(&text)
    }

    pub fn deferred_len(&self) -> usize {
        self.deferred.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Role;

    #[test]
    fn blank_input_is_ignored() {
        let mut channel = MessageChannel::default();
        channel.input = "  \n\t ".to_string();
        assert!(channel.submit_input().is_none());
        assert_eq!(channel.input, "  \n\t ");
        assert!(channel.is_enabled());
    }

    #[test]
    fn accepted_input_clears_buffer_and_closes_gate() {
        let mut channel = MessageChannel::default();
        channel.input = "Hello".to_string();

        let message = channel.submit_input().unwrap();
        assert_eq!(message.role(), Role::User);
        assert_eq!(message.content(), "Hello");
        assert!(channel.input.is_empty());
        assert!(!channel.is_enabled());
    }

    #[test]
    fn submissions_are_rejected_while_awaiting_reply() {
        let mut channel = MessageChannel::default();
        channel.submit("first").unwrap();

        channel.input = "second".to_string();
        assert!(!channel.can_send_input());
        assert!(channel.submit_input().is_none());
        assert_eq!(channel.input, "second");
    }

    #[test]
    fn deferred_text_goes_out_when_reply_settles() {
        let mut channel = MessageChannel::default();
        channel.submit("question").unwrap();

        assert!(channel.submit_or_defer("I've uploaded a file: a.txt\nURL: u".into()).is_none());
        assert_eq!(channel.deferred_len(), 1);

        let message = channel.reply_settled().unwrap();
        assert!(message.content().contains("a.txt"));
        assert!(!channel.is_enabled());
        assert_eq!(channel.deferred_len(), 0);

        assert!(channel.reply_settled().is_none());
        assert!(channel.is_enabled());
    }
}
