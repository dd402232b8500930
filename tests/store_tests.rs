//! Integration tests for the chat store
//!
//! Drives `ChatStore` against the in-memory API double in `common`.

mod common;

use common::{MockApi, MockAuth, MockPayments, session};
use crowdlex::store::{ChatStore, MessageAction};
use crowdlex::types::{ChatMessage, PaymentResult, PaymentStatus, Role};
use std::sync::Arc;
use tokio::sync::Notify;

fn store_with(api: Arc<MockApi>, auth: MockAuth) -> ChatStore {
    ChatStore::new(api, Arc::new(auth), Arc::new(MockPayments::default()))
}

fn signed_in_store() -> (Arc<MockApi>, ChatStore) {
    let api = Arc::new(MockApi::new());
    let store = store_with(api.clone(), MockAuth::signed_in());
    (api, store)
}

mod send_tests {
    use super::*;

    #[tokio::test]
    async fn test_blank_input_changes_nothing() {
        let (api, store) = signed_in_store();
        let before = store.state();

        store.send_message("").await;
        store.send_message("   \n\t ").await;

        assert_eq!(store.state(), before);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_user_message_appears_before_reply() {
        let gate = Arc::new(Notify::new());
        let api = Arc::new(MockApi::gated(gate.clone()));
        let store = store_with(api.clone(), MockAuth::signed_in());

        let observe = async {
            let state = store.state();
            assert_eq!(state.messages.len(), 1);
            assert_eq!(state.messages[0].role, Role::User);
            assert!(state.is_loading);
            gate.notify_one();
        };
        tokio::join!(store.send_message("What is an ECSP?"), observe);

        let state = store.state();
        assert_eq!(state.messages.len(), 2);
        assert_eq!(state.messages[1].role, Role::Assistant);
        assert_eq!(state.messages[1].content, "answer to What is an ECSP?");
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn test_reply_binds_session_and_sets_title_once() {
        let (api, store) = signed_in_store();
        api.set_reply_session("abc");

        store.send_message("What are the investment limits?").await;

        let state = store.state();
        assert_eq!(state.current_session_id.as_deref(), Some("abc"));
        let metadata = state.messages[1].metadata.clone().unwrap();
        assert_eq!(metadata.message_type.as_deref(), Some("advisory"));
        assert_eq!(metadata.rag_used, Some(true));
        assert_eq!(
            api.calls(),
            vec![
                "chat:-:What are the investment limits?".to_string(),
                "title:abc:What are the investment limits?".to_string(),
                "sessions".to_string(),
                "sessions".to_string(),
            ]
        );

        store.send_message("And for sophisticated investors?").await;
        assert_eq!(api.count("title:"), 1);
        assert_eq!(api.count("chat:abc:"), 1);
        assert_eq!(store.state().messages.len(), 4);
    }

    #[tokio::test]
    async fn test_temporary_session_skips_persistence() {
        let (api, store) = signed_in_store();
        api.set_reply_session("temp_42");

        store.send_message("hello").await;

        assert_eq!(store.state().current_session_id.as_deref(), Some("temp_42"));
        assert_eq!(api.count("title:"), 0);
        assert_eq!(api.count("sessions"), 0);
    }

    #[tokio::test]
    async fn test_failure_appends_error_entry() {
        let api = Arc::new(MockApi::failing());
        let store = store_with(api, MockAuth::signed_in());

        store.send_message("hello").await;

        let state = store.state();
        assert_eq!(state.messages.len(), 2);
        let error = &state.messages[1];
        assert_eq!(error.role, Role::Assistant);
        assert!(error.is_error);
        assert!(error.content.starts_with("❌ Error: "));
        assert!(!state.is_loading);
        assert_eq!(state.current_session_id, None);
    }

    #[tokio::test]
    async fn test_send_clears_input_and_suggestions() {
        let (_api, store) = signed_in_store();
        store.ensure_suggestions();
        store.select_suggestion("How do investor protection measures work in crowdfunding?");
        assert_eq!(store.state().suggestions.len(), 4);

        let input = store.state().input;
        store.send_message(&input).await;

        let state = store.state();
        assert!(state.input.is_empty());
        assert!(state.suggestions.is_empty());
        assert_eq!(state.selected_suggestion, None);
        assert!(!state.show_suggestions());
    }
}

mod session_tests {
    use super::*;

    #[tokio::test]
    async fn test_temporary_load_never_hits_network() {
        let (api, store) = signed_in_store();
        store.send_message("hello").await;
        let before = api.calls().len();

        store.load_session_messages("temp_abc").await;

        let state = store.state();
        assert!(state.messages.is_empty());
        assert_eq!(state.current_session_id.as_deref(), Some("temp_abc"));
        assert_eq!(api.calls().len(), before);
    }

    #[tokio::test]
    async fn test_load_replaces_transcript() {
        let (api, store) = signed_in_store();
        api.set_history(
            "s1",
            Some(vec![
                ChatMessage::user("q"),
                ChatMessage::assistant("a", None, None),
            ]),
        );

        store.load_session_messages("s1").await;

        let state = store.state();
        assert_eq!(state.messages.len(), 2);
        assert_eq!(state.current_session_id.as_deref(), Some("s1"));
    }

    #[tokio::test]
    async fn test_missing_messages_array_is_empty() {
        let (api, store) = signed_in_store();
        api.set_history("s1", None);
        store.send_message("stale").await;

        store.load_session_messages("s1").await;

        let state = store.state();
        assert!(state.messages.is_empty());
        assert_eq!(state.current_session_id.as_deref(), Some("s1"));
    }

    #[tokio::test]
    async fn test_load_failure_clears_stale_transcript() {
        let (api, store) = signed_in_store();
        store.send_message("stale").await;
        api.fail.store(true, std::sync::atomic::Ordering::SeqCst);

        store.load_session_messages("s2").await;

        let state = store.state();
        assert!(state.messages.is_empty());
        assert_eq!(state.current_session_id.as_deref(), Some("session-1"));
    }

    #[tokio::test]
    async fn test_anonymous_user_gets_no_sessions() {
        let api = Arc::new(MockApi::new());
        api.set_sessions(vec![session("s1", None, 3)]);
        let store = store_with(api.clone(), MockAuth::anonymous());

        store.fetch_sessions().await;

        assert!(store.state().sessions.is_empty());
        assert_eq!(api.count("sessions"), 0);
    }

    #[tokio::test]
    async fn test_create_new_session_resets_state() {
        let (api, store) = signed_in_store();
        api.set_sessions(vec![session("session-1", Some("First"), 2)]);
        store.send_message("hello").await;
        store.dismiss_suggestions();

        store.create_new_session().await;

        let state = store.state();
        assert!(state.messages.is_empty());
        assert_eq!(state.current_session_id, None);
        assert!(state.show_suggestions());
        assert_eq!(state.sessions.len(), 1);
    }

    #[tokio::test]
    async fn test_archiving_current_session_clears_transcript() {
        let (api, store) = signed_in_store();
        store.send_message("hello").await;

        store.archive_session("session-1").await;

        let state = store.state();
        assert!(state.messages.is_empty());
        assert_eq!(state.current_session_id, None);
        assert_eq!(api.count("archive:session-1"), 1);
    }

    #[tokio::test]
    async fn test_archiving_other_session_keeps_transcript() {
        let (_api, store) = signed_in_store();
        store.send_message("hello").await;

        store.archive_session("other").await;

        assert_eq!(store.state().messages.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_waits_for_confirmation() {
        let (api, store) = signed_in_store();
        store.send_message("hello").await;

        store.delete_session("session-1");
        assert_eq!(store.state().pending_delete.as_deref(), Some("session-1"));
        assert_eq!(api.count("delete:"), 0);

        store.cancel_delete();
        store.confirm_delete().await;
        assert_eq!(api.count("delete:"), 0);
        assert_eq!(store.state().messages.len(), 2);

        store.delete_session("session-1");
        store.confirm_delete().await;

        let state = store.state();
        assert_eq!(api.count("delete:session-1"), 1);
        assert_eq!(state.pending_delete, None);
        assert!(state.messages.is_empty());
        assert_eq!(state.current_session_id, None);
    }

    #[tokio::test]
    async fn test_title_update_skips_temporary_sessions() {
        let (api, store) = signed_in_store();

        store.update_session_title("temp_1", "Ignored").await;
        store.update_session_title("s1", "Kept").await;

        assert_eq!(api.calls(), vec!["title:s1:Kept", "sessions"]);
    }

    #[tokio::test]
    async fn test_auto_load_only_when_transcript_empty() {
        let (api, store) = signed_in_store();
        api.set_sessions(vec![session("s1", Some("Old"), 2), session("s2", None, 0)]);
        api.set_history(
            "s1",
            Some(vec![
                ChatMessage::user("q"),
                ChatMessage::assistant("a", None, None),
            ]),
        );
        api.set_reply_session("s1");
        store.send_message("hello").await;

        store.auto_load_selected().await;
        assert_eq!(api.count("history:"), 0);

        // A failed load empties the transcript but keeps s1 selected.
        api.fail.store(true, std::sync::atomic::Ordering::SeqCst);
        store.load_session_messages("s2").await;
        api.fail.store(false, std::sync::atomic::Ordering::SeqCst);
        assert!(store.state().messages.is_empty());

        store.auto_load_selected().await;
        assert_eq!(api.count("history:s1"), 1);
        assert_eq!(store.state().messages.len(), 2);

        store.auto_load_selected().await;
        assert_eq!(api.count("history:s1"), 1);

        store.load_session_messages("s2").await;
        store.auto_load_selected().await;
        assert_eq!(api.count("history:"), 3);
    }

    #[tokio::test]
    async fn test_unarchive_refreshes_both_lists() {
        let (api, store) = signed_in_store();
        *api.archived.lock().unwrap() = vec![session("old", Some("Archived"), 4)];

        store.open_archived_modal().await;
        assert_eq!(store.state().archived_sessions.len(), 1);

        store.unarchive_session("old").await;
        assert_eq!(api.count("unarchive:old"), 1);
        assert_eq!(api.count("archived"), 2);
        assert_eq!(api.count("sessions"), 1);
    }
}

mod action_tests {
    use super::*;

    #[tokio::test]
    async fn test_regenerate_truncates_and_resubmits() {
        let (api, store) = signed_in_store();
        store.send_message("first").await;
        store.send_message("second").await;
        let state = store.state();
        assert_eq!(state.messages.len(), 4);

        let target = state.messages[3].clone();
        store
            .handle_message_action(MessageAction::Regenerate, 3, &target)
            .await;

        let state = store.state();
        assert_eq!(state.messages.len(), 4);
        assert_eq!(state.messages[2].content, "second");
        assert_eq!(state.messages[3].content, "answer to second");
        assert_eq!(api.count("chat:session-1:second"), 2);
    }

    #[tokio::test]
    async fn test_regenerate_ignores_first_message() {
        let (api, store) = signed_in_store();
        store.send_message("first").await;
        let before = api.calls().len();

        let target = store.state().messages[0].clone();
        store
            .handle_message_action(MessageAction::Regenerate, 0, &target)
            .await;

        assert_eq!(store.state().messages.len(), 2);
        assert_eq!(api.calls().len(), before);
    }

    #[tokio::test]
    async fn test_feedback_actions_are_noops() {
        let (api, store) = signed_in_store();
        store.send_message("first").await;
        let before = (store.state(), api.calls().len());

        let target = store.state().messages[1].clone();
        for action in [
            MessageAction::Bookmark,
            MessageAction::Like,
            MessageAction::Dislike,
        ] {
            store.handle_message_action(action, 1, &target).await;
        }

        assert_eq!((store.state(), api.calls().len()), before);
    }
}

mod startup_tests {
    use super::*;

    #[tokio::test]
    async fn test_initialize_loads_status_and_sessions() {
        let (api, store) = signed_in_store();
        api.set_sessions(vec![session("s1", Some("Disclosure"), 3)]);

        store.initialize().await;

        let state = store.state();
        assert_eq!(state.system_status.map(|s| s.total_documents), Some(12));
        assert_eq!(state.sessions.len(), 1);
        assert_eq!(state.notice, None);
    }

    #[tokio::test]
    async fn test_payment_success_raises_notice() {
        let payments = MockPayments(Some(PaymentResult {
            status: PaymentStatus::Success,
            message: "Payment received".to_string(),
        }));
        let store = ChatStore::new(
            Arc::new(MockApi::new()),
            Arc::new(MockAuth::anonymous()),
            Arc::new(payments),
        );

        store.initialize().await;

        let notice = store.state().notice.unwrap();
        assert!(notice.starts_with("🎉 Payment received"));
        store.dismiss_notice();
        assert_eq!(store.state().notice, None);
    }

    #[tokio::test]
    async fn test_payment_cancel_is_silent() {
        let payments = MockPayments(Some(PaymentResult {
            status: PaymentStatus::Canceled,
            message: String::new(),
        }));
        let store = ChatStore::new(
            Arc::new(MockApi::new()),
            Arc::new(MockAuth::anonymous()),
            Arc::new(payments),
        );

        store.handle_payment_result().await;

        assert_eq!(store.state().notice, None);
    }

    #[tokio::test]
    async fn test_subscribers_see_updates() {
        let (_api, store) = signed_in_store();
        let mut rx = store.subscribe();

        store.open_settings_modal();

        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().show_settings_modal);
    }

    #[tokio::test]
    async fn test_archived_modal_closes_profile_menu() {
        let (_api, store) = signed_in_store();
        store.set_profile_menu(true);

        store.open_archived_modal().await;

        let state = store.state();
        assert!(state.show_archived_modal);
        assert!(!state.show_profile_menu);
    }
}
