use std::sync::{Arc, Mutex};
use std::time::Duration;

use rand::seq::SliceRandom;
use tokio::task::JoinHandle;

use super::models::ChatMessage;

const GREETING: &str = "Cześć! Jak mogę Ci pomóc z Twoją dietą?";

const CANNED_REPLIES: &[&str] = &[
    "Dziękuję za wiadomość. Analizuję Twoje pytanie...",
    "Dobre pytanie! Wrócę do Ciebie z odpowiedzią.",
    "Sprawdzam Twój jadłospis, chwileczkę...",
];

/// Append-only chat transcript with a simulated assistant. Each `send`
/// schedules one delayed canned reply; sending again before it lands
/// replaces the pending reply instead of queueing another.
pub struct ChatTranscript {
    messages: Arc<Mutex<Vec<ChatMessage>>>,
    pending_reply: Mutex<Option<JoinHandle<()>>>,
    reply_delay: Duration,
}

impl ChatTranscript {
    pub fn new(reply_delay: Duration) -> Self {
        Self {
            messages: Arc::new(Mutex::new(vec![ChatMessage::assistant(GREETING)])),
            pending_reply: Mutex::new(None),
            reply_delay,
        }
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        self.messages.lock().expect("chat lock poisoned").clone()
    }

    /// Appends the user message immediately and schedules the assistant
    /// reply after the configured delay.
    pub fn send(&self, text: &str) -> ChatMessage {
        let message = ChatMessage::user(text);
        self.messages
            .lock()
            .expect("chat lock poisoned")
            .push(message.clone());

        let mut pending = self.pending_reply.lock().expect("chat lock poisoned");
        if let Some(task) = pending.take() {
            task.abort();
        }

        let messages = Arc::clone(&self.messages);
        let delay = self.reply_delay;
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let reply = CANNED_REPLIES
                .choose(&mut rand::thread_rng())
                .copied()
                .unwrap_or(CANNED_REPLIES[0]);
            messages
                .lock()
                .expect("chat lock poisoned")
                .push(ChatMessage::assistant(reply));
        }));

        message
    }
}
