use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub text: String,
    pub is_user: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

impl ChatMessage {
    pub fn user(text: &str) -> Self {
        Self::new(text, true)
    }

    pub fn assistant(text: &str) -> Self {
        Self::new(text, false)
    }

    fn new(text: &str, is_user: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.to_string(),
            is_user,
            timestamp: OffsetDateTime::now_utc(),
        }
    }
}
