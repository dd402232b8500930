use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Prefix the backend gives sessions that only live in UI memory.
pub const TEMP_SESSION_PREFIX: &str = "temp_";

pub fn is_temporary_session(session_id: &str) -> bool {
    session_id.starts_with(TEMP_SESSION_PREFIX)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeMode {
    Dark,
    Light,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageMetadata {
    #[serde(default)]
    pub message_type: Option<String>,
    #[serde(default)]
    pub rag_used: Option<bool>,
    #[serde(default)]
    pub cache_hit: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MessageMetadata>,
    #[serde(default, rename = "isError", skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            timestamp: Some(now_iso8601()),
            metadata: None,
            is_error: false,
        }
    }

    pub fn assistant(
        content: impl Into<String>,
        timestamp: Option<String>,
        metadata: Option<MessageMetadata>,
    ) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            timestamp,
            metadata,
            is_error: false,
        }
    }

    /// Synthetic transcript entry shown when a send fails.
    pub fn error(detail: impl std::fmt::Display) -> Self {
        Self {
            role: Role::Assistant,
            content: format!("❌ Error: {detail}"),
            timestamp: Some(now_iso8601()),
            metadata: None,
            is_error: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub session_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub message_count: u32,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub last_activity: Option<String>,
}

impl Session {
    pub fn is_temporary(&self) -> bool {
        is_temporary_session(&self.session_id)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemStatus {
    #[serde(default)]
    pub total_documents: u64,
    #[serde(default)]
    pub cache_size: u64,
    #[serde(default)]
    pub memory_enabled: HashMap<String, bool>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub is_authenticated: bool,
    pub user: Option<AuthUser>,
    pub access_token: Option<String>,
}

impl AuthState {
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Sessions are only persisted for a signed-in user with a usable token.
    pub fn can_fetch_sessions(&self) -> bool {
        self.is_authenticated && self.user.is_some() && self.access_token.is_some()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Success,
    Canceled,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentResult {
    pub status: PaymentStatus,
    #[serde(default)]
    pub message: String,
}

pub fn now_iso8601() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_message_without_optional_fields() {
        let msg: ChatMessage =
            serde_json::from_str(r#"{"role": "user", "content": "hello"}"#).unwrap();
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.timestamp, None);
        assert!(msg.metadata.is_none());
        assert!(!msg.is_error);
    }

    #[test]
    fn test_error_message_flag_uses_camel_case() {
        let msg = ChatMessage::error("boom");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["isError"], true);
        assert_eq!(json["content"], "❌ Error: boom");
    }

    #[test]
    fn test_temporary_session_prefix() {
        assert!(is_temporary_session("temp_1234"));
        assert!(!is_temporary_session("abc_temp_1234"));
    }

    #[test]
    fn test_anonymous_cannot_fetch_sessions() {
        assert!(!AuthState::anonymous().can_fetch_sessions());
        let partial = AuthState {
            is_authenticated: true,
            user: Some(AuthUser::default()),
            access_token: None,
        };
        assert!(!partial.can_fetch_sessions());
    }
}
