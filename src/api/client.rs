use crate::premium::PremiumStatus;
use crate::types::{ChatMessage, MessageMetadata, Session, SystemStatus};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// ============================================
// Error Types
// ============================================

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{0}")]
    Rejected(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

// ============================================
// Endpoint Schemas
// ============================================

#[derive(Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
    pub session_id: Option<&'a str>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ChatReply {
    pub response: String,
    pub session_id: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub message_type: Option<String>,
    #[serde(default)]
    pub rag_used: Option<bool>,
    #[serde(default)]
    pub cache_hit: Option<bool>,
}

impl ChatReply {
    pub fn into_message(self) -> ChatMessage {
        let metadata = MessageMetadata {
            message_type: self.message_type,
            rag_used: self.rag_used,
            cache_hit: self.cache_hit,
        };
        ChatMessage::assistant(self.response, self.timestamp, Some(metadata))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct SessionList {
    #[serde(default)]
    pub sessions: Vec<Session>,
}

/// `messages` stays optional so a missing array can be told apart from an empty one.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct SessionHistory {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub messages: Option<Vec<ChatMessage>>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Serialize)]
pub struct UpdateTitleRequest<'a> {
    pub title: &'a str,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct PremiumStatusResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub premium_status: Option<PremiumStatus>,
}

// ============================================
// Service Contract
// ============================================

/// Remote guidance service. Every call is a single request with no retries.
#[async_trait]
pub trait ChatApi: Send + Sync {
    async fn fetch_system_status(&self) -> ApiResult<SystemStatus>;

    async fn fetch_user_sessions(&self) -> ApiResult<SessionList>;

    async fn send_message(&self, text: &str, session_id: Option<&str>) -> ApiResult<ChatReply>;

    async fn load_session_messages(&self, session_id: &str) -> ApiResult<SessionHistory>;

    async fn update_session_title(&self, session_id: &str, title: &str) -> ApiResult<Ack>;

    async fn archive_session(&self, session_id: &str) -> ApiResult<Ack>;

    async fn delete_session(&self, session_id: &str) -> ApiResult<Ack>;

    async fn fetch_archived_sessions(&self) -> ApiResult<Vec<Session>>;

    async fn unarchive_session(&self, session_id: &str) -> ApiResult<Ack>;

    async fn fetch_premium_status(&self) -> ApiResult<PremiumStatusResponse>;
}
