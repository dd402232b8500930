//! In-memory doubles for the remote service and its collaborators.
#![allow(dead_code)]

use async_trait::async_trait;
use crowdlex::api::{
    Ack, ApiError, ApiResult, AuthProvider, ChatApi, ChatReply, PaymentService,
    PremiumStatusResponse, SessionHistory, SessionList,
};
use crowdlex::premium::PremiumStatus;
use crowdlex::types::{AuthState, AuthUser, ChatMessage, PaymentResult, Session, SystemStatus};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

fn server_error() -> ApiError {
    ApiError::Status {
        status: 500,
        message: "internal error".to_string(),
    }
}

pub fn session(id: &str, title: Option<&str>, message_count: u32) -> Session {
    Session {
        session_id: id.to_string(),
        title: title.map(str::to_string),
        message_count,
        created_at: None,
        last_activity: None,
    }
}

#[derive(Default)]
pub struct MockApi {
    calls: Mutex<Vec<String>>,
    pub fail: AtomicBool,
    pub reply_session_id: Mutex<String>,
    pub sessions: Mutex<Vec<Session>>,
    pub archived: Mutex<Vec<Session>>,
    pub histories: Mutex<HashMap<String, SessionHistory>>,
    pub premium: Mutex<Option<PremiumStatusResponse>>,
    /// When set, `send_message` waits for a notification before replying.
    pub chat_gate: Option<Arc<Notify>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self {
            reply_session_id: Mutex::new("session-1".to_string()),
            ..Self::default()
        }
    }

    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            chat_gate: Some(gate),
            ..Self::new()
        }
    }

    pub fn failing() -> Self {
        let api = Self::new();
        api.fail.store(true, Ordering::SeqCst);
        api
    }

    pub fn with_premium(status: PremiumStatus) -> Self {
        let api = Self::new();
        *api.premium.lock().unwrap() = Some(PremiumStatusResponse {
            success: true,
            premium_status: Some(status),
        });
        api
    }

    pub fn set_reply_session(&self, id: &str) {
        *self.reply_session_id.lock().unwrap() = id.to_string();
    }

    pub fn set_sessions(&self, sessions: Vec<Session>) {
        *self.sessions.lock().unwrap() = sessions;
    }

    pub fn set_history(&self, id: &str, messages: Option<Vec<ChatMessage>>) {
        self.histories.lock().unwrap().insert(
            id.to_string(),
            SessionHistory {
                session_id: Some(id.to_string()),
                messages,
            },
        );
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.starts_with(prefix))
            .count()
    }

    fn record(&self, call: String) -> ApiResult<()> {
        self.calls.lock().unwrap().push(call);
        if self.fail.load(Ordering::SeqCst) {
            Err(server_error())
        } else {
            Ok(())
        }
    }
}

fn ack() -> Ack {
    Ack {
        success: true,
        message: None,
    }
}

#[async_trait]
impl ChatApi for MockApi {
    async fn fetch_system_status(&self) -> ApiResult<SystemStatus> {
        self.record("status".to_string())?;
        Ok(SystemStatus {
            total_documents: 12,
            ..SystemStatus::default()
        })
    }

    async fn fetch_user_sessions(&self) -> ApiResult<SessionList> {
        self.record("sessions".to_string())?;
        Ok(SessionList {
            sessions: self.sessions.lock().unwrap().clone(),
        })
    }

    async fn send_message(&self, text: &str, session_id: Option<&str>) -> ApiResult<ChatReply> {
        if let Some(gate) = &self.chat_gate {
            gate.notified().await;
        }
        self.record(format!("chat:{}:{text}", session_id.unwrap_or("-")))?;
        Ok(ChatReply {
            response: format!("answer to {text}"),
            session_id: self.reply_session_id.lock().unwrap().clone(),
            timestamp: Some("2026-10-16T10:00:00Z".to_string()),
            message_type: Some("advisory".to_string()),
            rag_used: Some(true),
            cache_hit: Some(false),
        })
    }

    async fn load_session_messages(&self, session_id: &str) -> ApiResult<SessionHistory> {
        self.record(format!("history:{session_id}"))?;
        Ok(self
            .histories
            .lock()
            .unwrap()
            .get(session_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn update_session_title(&self, session_id: &str, title: &str) -> ApiResult<Ack> {
        self.record(format!("title:{session_id}:{title}"))?;
        Ok(ack())
    }

    async fn archive_session(&self, session_id: &str) -> ApiResult<Ack> {
        self.record(format!("archive:{session_id}"))?;
        Ok(ack())
    }

    async fn delete_session(&self, session_id: &str) -> ApiResult<Ack> {
        self.record(format!("delete:{session_id}"))?;
        Ok(ack())
    }

    async fn fetch_archived_sessions(&self) -> ApiResult<Vec<Session>> {
        self.record("archived".to_string())?;
        Ok(self.archived.lock().unwrap().clone())
    }

    async fn unarchive_session(&self, session_id: &str) -> ApiResult<Ack> {
        self.record(format!("unarchive:{session_id}"))?;
        Ok(ack())
    }

    async fn fetch_premium_status(&self) -> ApiResult<PremiumStatusResponse> {
        self.record("premium".to_string())?;
        Ok(self.premium.lock().unwrap().clone().unwrap_or_default())
    }
}

pub struct MockAuth(pub AuthState);

impl MockAuth {
    pub fn signed_in() -> Self {
        Self(AuthState {
            is_authenticated: true,
            user: Some(AuthUser {
                email: Some("founder@example.eu".to_string()),
                name: None,
            }),
            access_token: Some("token".to_string()),
        })
    }

    pub fn anonymous() -> Self {
        Self(AuthState::anonymous())
    }
}

#[async_trait]
impl AuthProvider for MockAuth {
    async fn auth_state(&self) -> ApiResult<AuthState> {
        Ok(self.0.clone())
    }
}

#[derive(Default)]
pub struct MockPayments(pub Option<PaymentResult>);

#[async_trait]
impl PaymentService for MockPayments {
    async fn ready(&self) {}

    async fn handle_payment_result(&self) -> ApiResult<Option<PaymentResult>> {
        Ok(self.0.clone())
    }
}
