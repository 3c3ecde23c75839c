use parking_lot::Mutex;
use rand::seq::SliceRandom;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use super::{ChatMessage, Role};

pub const GREETING: &str = "Hello! I'm your CRM AI assistant. I can help you analyze your data, \
generate insights, and answer questions about your customers and sales performance. \
What would you like to know?";

pub const CANNED_REPLIES: [&str; 5] = [
    "Based on your current data, I can see some interesting trends. Your customer acquisition has increased by 12.5% this month, which is great progress!",
    "Looking at your churn analysis, the main reason for customer loss is pricing concerns. You might want to consider offering more flexible pricing tiers.",
    "Your top sales rep Sarah Chen is performing exceptionally well with 23 deals closed. Consider analyzing her approach for team training.",
    "The marketing campaign 'Q4 Holiday Campaign' has the highest ROI at 340%. I'd recommend allocating more budget to similar campaigns.",
    "Your enterprise segment has the highest CLTV at $125,000. Focus on acquiring more enterprise clients for better long-term revenue.",
];

const SUGGESTED_PROMPTS: [&str; 3] = [
    "Improve Email Campaign Performance",
    "High-Value Lead Follow-up",
    "Customer Retention Pattern",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssistantSettings {
    pub reply_delay: Duration,
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            reply_delay: Duration::from_millis(2000),
        }
    }
}

#[derive(Debug)]
struct Conversation {
    messages: Vec<ChatMessage>,
    pending: usize,
}

/// Chat panel state. Replies are simulated: each message gets one canned
/// insight after `reply_delay`.
pub struct Assistant {
    settings: AssistantSettings,
    conversation: Arc<Mutex<Conversation>>,
    replies: Vec<JoinHandle<()>>,
}

impl Assistant {
    pub fn new(settings: AssistantSettings) -> Self {
        Self {
            settings,
            conversation: Arc::new(Mutex::new(Conversation {
                messages: vec![ChatMessage::new(Role::Assistant, GREETING)],
                pending: 0,
            })),
            replies: Vec::new(),
        }
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        self.conversation.lock().messages.clone()
    }

    pub fn is_typing(&self) -> bool {
        self.conversation.lock().pending > 0
    }

    pub fn suggestions(&self) -> &'static [&'static str] {
        &SUGGESTED_PROMPTS
    }

    /// Post a user message and schedule the reply. Blank input is ignored.
    ///
    /// Must be called from within a tokio runtime.
    pub fn send(&mut self, content: &str) -> Option<ChatMessage> {
        let content = content.trim();
        if content.is_empty() {
            return None;
        }

        let message = ChatMessage::new(Role::User, content);
        {
            let mut convo = self.conversation.lock();
            convo.messages.push(message.clone());
            convo.pending += 1;
        }
        log::debug!("Assistant received {} chars", content.len());

        self.replies.retain(|h| !h.is_finished());

        let conversation = Arc::clone(&self.conversation);
        let delay = self.settings.reply_delay;
        self.replies.push(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let reply = CANNED_REPLIES
                .choose(&mut rand::thread_rng())
                .copied()
                .unwrap_or(CANNED_REPLIES[0]);

            let mut convo = conversation.lock();
            convo.messages.push(ChatMessage::new(Role::Assistant, reply));
            convo.pending = convo.pending.saturating_sub(1);
        }));

        Some(message)
    }
}

impl Drop for Assistant {
    fn drop(&mut self) {
        for handle in self.replies.drain(..) {
            handle.abort();
        }
    }
}
