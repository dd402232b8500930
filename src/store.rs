//! Chat session and transcript state.
//!
//! [`ChatStore`] owns a [`ChatState`] behind a `watch` channel. Views subscribe to
//! snapshots; actions mutate the state and call the remote API. No action returns
//! an error: failures are logged and degrade to empty or default state.

use crate::api::{AuthProvider, ChatApi, PaymentService};
use crate::suggestions::conversation_suggestions;
use crate::types::{
    ChatMessage, PaymentStatus, Role, Session, SystemStatus, is_temporary_session,
};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::watch;

const NEW_SESSION_TITLE: &str = "New Session";
const TITLE_MAX_CHARS: usize = 40;
const TITLE_MIN_BREAK: usize = 20;

pub const DELETE_CONFIRMATION: &str =
    "Are you sure you want to delete this session? This action cannot be undone.";

#[derive(Clone, Debug, PartialEq)]
pub struct ChatState {
    pub messages: Vec<ChatMessage>,
    pub input: String,
    pub is_loading: bool,
    pub system_status: Option<SystemStatus>,
    pub sessions: Vec<Session>,
    pub archived_sessions: Vec<Session>,
    pub current_session_id: Option<String>,
    pub sidebar_open: bool,
    pub show_settings_modal: bool,
    pub show_profile_menu: bool,
    pub show_archived_modal: bool,
    pub suggestions_dismissed: bool,
    pub suggestions: Vec<String>,
    pub selected_suggestion: Option<String>,
    /// Session awaiting the user's delete confirmation.
    pub pending_delete: Option<String>,
    /// Blocking message shown once, e.g. after a successful checkout.
    pub notice: Option<String>,
}

impl Default for ChatState {
    fn default() -> Self {
        Self {
            messages: Vec::new(),
            input: String::new(),
            is_loading: false,
            system_status: None,
            sessions: Vec::new(),
            archived_sessions: Vec::new(),
            current_session_id: None,
            sidebar_open: true,
            show_settings_modal: false,
            show_profile_menu: false,
            show_archived_modal: false,
            suggestions_dismissed: false,
            suggestions: Vec::new(),
            selected_suggestion: None,
            pending_delete: None,
            notice: None,
        }
    }
}

impl ChatState {
    pub fn is_new_session(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn show_suggestions(&self) -> bool {
        self.is_new_session() && !self.suggestions_dismissed
    }

    pub fn current_session(&self) -> Option<&Session> {
        let id = self.current_session_id.as_deref()?;
        self.sessions.iter().find(|session| session.session_id == id)
    }

    pub fn current_session_title(&self) -> String {
        let Some(id) = self.current_session_id.as_deref() else {
            return NEW_SESSION_TITLE.to_string();
        };
        self.current_session()
            .and_then(|session| session.title.clone())
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| format!("Session {}", id.chars().take(8).collect::<String>()))
    }

    /// Switches the active session; landing on an empty transcript re-arms suggestions.
    fn bind_session(&mut self, session_id: Option<String>) {
        let changed = self.current_session_id != session_id;
        self.current_session_id = session_id;
        if changed && self.messages.is_empty() {
            self.suggestions_dismissed = false;
        }
    }

    fn forget_session(&mut self, session_id: &str) {
        if self.current_session_id.as_deref() == Some(session_id) {
            self.messages.clear();
            self.bind_session(None);
        }
    }
}

/// Actions attached to a rendered message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageAction {
    Regenerate,
    Bookmark,
    Like,
    Dislike,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown action: {0}")]
pub struct UnknownAction(pub String);

impl FromStr for MessageAction {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "regenerate" => Ok(Self::Regenerate),
            "bookmark" => Ok(Self::Bookmark),
            "like" => Ok(Self::Like),
            "dislike" => Ok(Self::Dislike),
            other => Err(UnknownAction(other.to_string())),
        }
    }
}

impl fmt::Display for MessageAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Regenerate => "regenerate",
            Self::Bookmark => "bookmark",
            Self::Like => "like",
            Self::Dislike => "dislike",
        };
        f.write_str(name)
    }
}

/// Title derived from the first message of a session.
pub fn generate_session_title(first_message: &str) -> String {
    let trimmed = first_message.trim();
    if trimmed.is_empty() {
        return NEW_SESSION_TITLE.to_string();
    }

    let mut clean = String::with_capacity(trimmed.len());
    let mut in_break = false;
    for ch in trimmed.chars() {
        if ch == '\n' {
            if !in_break {
                clean.push(' ');
            }
            in_break = true;
        } else {
            clean.push(ch);
            in_break = false;
        }
    }

    if clean.chars().count() <= TITLE_MAX_CHARS {
        return clean;
    }

    let truncated: String = clean.chars().take(TITLE_MAX_CHARS).collect();
    match truncated.rfind(' ') {
        Some(pos) if truncated[..pos].chars().count() > TITLE_MIN_BREAK => {
            format!("{}...", &truncated[..pos])
        }
        _ => format!("{truncated}..."),
    }
}

/// Clears `is_loading` when dropped, whatever path the send took.
struct LoadingGuard<'a> {
    state: &'a watch::Sender<ChatState>,
}

impl<'a> LoadingGuard<'a> {
    fn start(state: &'a watch::Sender<ChatState>) -> Self {
        state.send_modify(|s| s.is_loading = true);
        Self { state }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state.send_modify(|s| s.is_loading = false);
    }
}

pub struct ChatStore {
    api: Arc<dyn ChatApi>,
    auth: Arc<dyn AuthProvider>,
    payments: Arc<dyn PaymentService>,
    state: watch::Sender<ChatState>,
}

impl ChatStore {
    pub fn new(
        api: Arc<dyn ChatApi>,
        auth: Arc<dyn AuthProvider>,
        payments: Arc<dyn PaymentService>,
    ) -> Self {
        let (state, _) = watch::channel(ChatState::default());
        Self {
            api,
            auth,
            payments,
            state,
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ChatState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ChatState> {
        self.state.subscribe()
    }

    // ============================================
    // Startup
    // ============================================

    /// Mount-time loading: system status and sessions, then any pending payment result.
    pub async fn initialize(&self) {
        futures::join!(self.fetch_system_status(), self.fetch_sessions());
        self.handle_payment_result().await;
    }

    pub async fn fetch_system_status(&self) {
        match self.api.fetch_system_status().await {
            Ok(status) => self.state.send_modify(|s| s.system_status = Some(status)),
            Err(err) => tracing::error!("Error fetching system status: {err}"),
        }
    }

    /// Anonymous users get an empty list and no request.
    pub async fn fetch_sessions(&self) {
        let sessions = match self.auth.auth_state().await {
            Ok(auth) if auth.can_fetch_sessions() => match self.api.fetch_user_sessions().await {
                Ok(list) => {
                    tracing::debug!(count = list.sessions.len(), "fetched user sessions");
                    list.sessions
                }
                Err(err) => {
                    tracing::error!("Error fetching sessions: {err}");
                    Vec::new()
                }
            },
            Ok(_) => {
                tracing::debug!("anonymous user - no persistent sessions available");
                Vec::new()
            }
            Err(err) => {
                tracing::error!("Error reading auth state: {err}");
                Vec::new()
            }
        };
        self.state.send_modify(|s| s.sessions = sessions);
    }

    pub async fn handle_payment_result(&self) {
        self.payments.ready().await;
        match self.payments.handle_payment_result().await {
            Ok(Some(result)) => match result.status {
                PaymentStatus::Success => {
                    let notice = format!(
                        "🎉 {}\n\nWelcome to Premium! Your enhanced regulatory guidance experience begins now.",
                        result.message
                    );
                    self.state.send_modify(|s| s.notice = Some(notice));
                }
                PaymentStatus::Canceled => tracing::info!("Payment canceled by user"),
            },
            Ok(None) => {}
            Err(err) => tracing::error!("Error handling payment result: {err}"),
        }
    }

    pub fn dismiss_notice(&self) {
        self.state.send_if_modified(|s| s.notice.take().is_some());
    }

    // ============================================
    // Messages
    // ============================================

    /// Appends the user message right away, then the reply or an error entry.
    pub async fn send_message(&self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }

        let was_new_session = self.state.borrow().messages.is_empty();
        self.state.send_modify(|s| {
            s.messages.push(ChatMessage::user(text));
            s.input.clear();
            s.suggestions.clear();
            s.selected_suggestion = None;
        });

        self.submit(text, was_new_session).await;
    }

    async fn submit(&self, text: &str, was_new_session: bool) {
        let _loading = LoadingGuard::start(&self.state);
        let session_id = self.state.borrow().current_session_id.clone();

        match self.api.send_message(text, session_id.as_deref()).await {
            Ok(reply) => {
                let reply_session = reply.session_id.clone();
                self.state.send_modify(|s| {
                    s.messages.push(reply.into_message());
                    s.bind_session(Some(reply_session.clone()));
                });

                if is_temporary_session(&reply_session) {
                    tracing::debug!(session = %reply_session, "temporary session, not persisting");
                    return;
                }
                if was_new_session {
                    self.update_session_title(&reply_session, &generate_session_title(text))
                        .await;
                }
                self.fetch_sessions().await;
            }
            Err(err) => {
                tracing::error!("Error sending message: {err}");
                self.state
                    .send_modify(|s| s.messages.push(ChatMessage::error(&err)));
            }
        }
    }

    /// Runs a message action on the entry at `index`.
    ///
    /// `Regenerate` drops the reply and everything after it, then resends the preceding
    /// user prompt. The prompt is not appended a second time, so the transcript keeps a
    /// single copy of it followed by the new reply.
    pub async fn handle_message_action(
        &self,
        action: MessageAction,
        index: usize,
        message: &ChatMessage,
    ) {
        tracing::debug!("Message action: {action} on message {index}");

        match action {
            MessageAction::Regenerate => {
                if index == 0 {
                    return;
                }
                let prompt = {
                    let state = self.state.borrow();
                    state
                        .messages
                        .get(index - 1)
                        .filter(|prev| prev.role == Role::User)
                        .map(|prev| prev.content.clone())
                };
                let Some(prompt) = prompt else {
                    return;
                };
                self.state.send_modify(|s| s.messages.truncate(index));
                self.submit(&prompt, false).await;
            }
            // Feedback submission is not wired to the backend yet.
            MessageAction::Bookmark => {
                let preview: String = message.content.chars().take(50).collect();
                tracing::info!("Bookmarking message: {preview}...");
            }
            MessageAction::Like => tracing::info!("Liked message: {index}"),
            MessageAction::Dislike => tracing::info!("Disliked message: {index}"),
        }
    }

    // ============================================
    // Sessions
    // ============================================

    pub async fn create_new_session(&self) {
        self.state.send_modify(|s| {
            s.messages.clear();
            s.current_session_id = None;
            s.suggestions_dismissed = false;
            s.suggestions.clear();
            s.selected_suggestion = None;
        });
        self.fetch_sessions().await;
    }

    pub async fn load_session_messages(&self, session_id: &str) {
        if is_temporary_session(session_id) {
            tracing::debug!("Cannot load messages for temporary session: {session_id}");
            self.state.send_modify(|s| {
                s.messages.clear();
                s.bind_session(Some(session_id.to_string()));
            });
            return;
        }

        match self.api.load_session_messages(session_id).await {
            Ok(history) => {
                let messages = match history.messages {
                    Some(messages) => {
                        tracing::debug!(
                            "Loaded {} messages for session {session_id}",
                            messages.len()
                        );
                        messages
                    }
                    None => {
                        tracing::warn!("No messages found in session data for {session_id}");
                        Vec::new()
                    }
                };
                self.state.send_modify(|s| {
                    s.messages = messages;
                    s.bind_session(Some(session_id.to_string()));
                });
            }
            Err(err) => {
                tracing::error!("Error loading session messages: {err}");
                self.state.send_modify(|s| s.messages.clear());
            }
        }
    }

    /// Loads the selected session's transcript if it has persisted messages not yet shown.
    pub async fn auto_load_selected(&self) {
        let target = {
            let state = self.state.borrow();
            state
                .current_session()
                .filter(|session| session.message_count > 0 && state.messages.is_empty())
                .map(|session| (session.session_id.clone(), session.message_count))
        };
        if let Some((session_id, count)) = target {
            tracing::info!("Auto-loading messages for session {session_id} ({count} messages)");
            self.load_session_messages(&session_id).await;
        }
    }

    pub async fn update_session_title(&self, session_id: &str, title: &str) {
        if is_temporary_session(session_id) {
            tracing::debug!("Skipping title update for temporary session: {session_id}");
            return;
        }
        match self.api.update_session_title(session_id, title).await {
            Ok(_) => self.fetch_sessions().await,
            Err(err) => tracing::error!("Error updating session title: {err}"),
        }
    }

    pub async fn archive_session(&self, session_id: &str) {
        match self.api.archive_session(session_id).await {
            Ok(_) => {
                self.fetch_sessions().await;
                self.state.send_modify(|s| s.forget_session(session_id));
            }
            Err(err) => tracing::error!("Error archiving session: {err}"),
        }
    }

    /// Asks for confirmation; nothing is sent until [`ChatStore::confirm_delete`].
    pub fn delete_session(&self, session_id: &str) {
        self.state
            .send_modify(|s| s.pending_delete = Some(session_id.to_string()));
    }

    pub fn cancel_delete(&self) {
        self.state.send_if_modified(|s| s.pending_delete.take().is_some());
    }

    pub async fn confirm_delete(&self) {
        let mut pending = None;
        self.state.send_if_modified(|s| {
            pending = s.pending_delete.take();
            pending.is_some()
        });
        let Some(session_id) = pending else {
            return;
        };

        match self.api.delete_session(&session_id).await {
            Ok(_) => {
                self.fetch_sessions().await;
                self.state.send_modify(|s| s.forget_session(&session_id));
            }
            Err(err) => tracing::error!("Error deleting session: {err}"),
        }
    }

    pub async fn fetch_archived_sessions(&self) {
        let archived = match self.api.fetch_archived_sessions().await {
            Ok(sessions) => sessions,
            Err(err) => {
                tracing::error!("Error fetching archived sessions: {err}");
                Vec::new()
            }
        };
        self.state.send_modify(|s| s.archived_sessions = archived);
    }

    pub async fn unarchive_session(&self, session_id: &str) {
        match self.api.unarchive_session(session_id).await {
            Ok(_) => {
                futures::join!(self.fetch_sessions(), self.fetch_archived_sessions());
            }
            Err(err) => tracing::error!("Error unarchiving session: {err}"),
        }
    }

    // ============================================
    // Conversation starters
    // ============================================

    /// Draws a suggestion set once per new session.
    pub fn ensure_suggestions(&self) {
        self.state.send_if_modified(|s| {
            if s.is_new_session() && s.suggestions.is_empty() {
                s.suggestions = conversation_suggestions();
                true
            } else {
                false
            }
        });
    }

    pub fn select_suggestion(&self, suggestion: &str) {
        self.state.send_modify(|s| {
            s.input = suggestion.to_string();
            s.selected_suggestion = Some(suggestion.to_string());
        });
    }

    pub fn clear_selected_suggestion(&self) {
        self.state
            .send_if_modified(|s| s.selected_suggestion.take().is_some());
    }

    pub fn dismiss_suggestions(&self) {
        self.state.send_modify(|s| s.suggestions_dismissed = true);
    }

    // ============================================
    // UI flags
    // ============================================

    pub fn set_input(&self, input: String) {
        self.state.send_modify(|s| s.input = input);
    }

    pub fn set_sidebar_open(&self, open: bool) {
        self.state.send_modify(|s| s.sidebar_open = open);
    }

    pub fn open_settings_modal(&self) {
        self.state.send_modify(|s| s.show_settings_modal = true);
    }

    pub fn close_settings_modal(&self) {
        self.state.send_modify(|s| s.show_settings_modal = false);
    }

    pub fn set_profile_menu(&self, open: bool) {
        self.state.send_modify(|s| s.show_profile_menu = open);
    }

    pub async fn open_archived_modal(&self) {
        self.state.send_modify(|s| {
            s.show_archived_modal = true;
            s.show_profile_menu = false;
        });
        self.fetch_archived_sessions().await;
    }

    pub fn close_archived_modal(&self) {
        self.state.send_modify(|s| s.show_archived_modal = false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(id: &str, title: Option<&str>, count: u32) -> Session {
        Session {
            session_id: id.to_string(),
            title: title.map(str::to_string),
            message_count: count,
            created_at: None,
            last_activity: None,
        }
    }

    #[test]
    fn test_short_title_kept_whole() {
        assert_eq!(generate_session_title("  What is ECSP?  "), "What is ECSP?");
        assert_eq!(generate_session_title("   "), "New Session");
    }

    #[test]
    fn test_newlines_collapse_to_one_space() {
        assert_eq!(generate_session_title("first\n\n\nsecond"), "first second");
    }

    #[test]
    fn test_long_title_breaks_at_late_space() {
        let title = generate_session_title(
            "What are the investment limits for non-sophisticated investors in the EU?",
        );
        assert_eq!(title, "What are the investment limits for...");
    }

    #[test]
    fn test_long_title_without_late_space_is_hard_cut() {
        let title = generate_session_title(&"a".repeat(60));
        assert_eq!(title, format!("{}...", "a".repeat(40)));
    }

    #[test]
    fn test_current_session_title_fallbacks() {
        let mut state = ChatState::default();
        assert_eq!(state.current_session_title(), "New Session");

        state.current_session_id = Some("0123456789abcdef".to_string());
        assert_eq!(state.current_session_title(), "Session 01234567");

        state.sessions = vec![session("0123456789abcdef", Some("Disclosure rules"), 2)];
        assert_eq!(state.current_session_title(), "Disclosure rules");
    }

    #[test]
    fn test_suggestion_flags() {
        let mut state = ChatState::default();
        assert!(state.is_new_session());
        assert!(state.show_suggestions());

        state.suggestions_dismissed = true;
        assert!(!state.show_suggestions());

        state.bind_session(Some("abc".to_string()));
        assert!(state.show_suggestions());
    }

    #[test]
    fn test_binding_with_messages_keeps_dismissal() {
        let mut state = ChatState {
            suggestions_dismissed: true,
            messages: vec![ChatMessage::user("hi")],
            ..ChatState::default()
        };
        state.bind_session(Some("abc".to_string()));
        assert!(state.suggestions_dismissed);
    }

    #[test]
    fn test_message_action_parsing() {
        assert_eq!("regenerate".parse::<MessageAction>(), Ok(MessageAction::Regenerate));
        assert_eq!("like".parse::<MessageAction>(), Ok(MessageAction::Like));
        assert_eq!(
            "copy".parse::<MessageAction>(),
            Err(UnknownAction("copy".to_string()))
        );
        assert_eq!(MessageAction::Dislike.to_string(), "dislike");
    }
}
