use crate::markdown::{format_message_timestamp, markdown_to_html};
use crate::store::{ChatState, MessageAction};
use crate::types::{ChatMessage, MessageMetadata, Role};
use crate::ui::Services;
use crate::views::starters::ConversationStarters;
use dioxus::events::Key;
use dioxus::prelude::*;

fn role_class(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Assistant => "assistant",
    }
}

fn metadata_summary(metadata: &MessageMetadata) -> Option<String> {
    let mut parts = Vec::new();
    if metadata.rag_used == Some(true) {
        parts.push("Sources consulted");
    }
    if metadata.cache_hit == Some(true) {
        parts.push("Cached");
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" • "))
    }
}

#[component]
pub fn ChatView() -> Element {
    let services = use_context::<Services>();
    let state = use_context::<Signal<ChatState>>();
    let snapshot = state();

    let send_message = {
        let store = services.store.clone();
        move |text: String| {
            if store.state().is_loading {
                return;
            }
            let store = store.clone();
            spawn(async move {
                store.send_message(&text).await;
            });
        }
    };
    let send_on_enter = send_message.clone();
    let send_on_click = send_message;
    let input_store = services.store.clone();

    let is_loading = snapshot.is_loading;
    let input = snapshot.input.clone();
    let can_send = !is_loading && !input.trim().is_empty();

    rsx! {
        div { class: "chat-list",
            if snapshot.show_suggestions() {
                ConversationStarters {
                    suggestions: snapshot.suggestions.clone(),
                    selected: snapshot.selected_suggestion.clone(),
                }
            }
            for (i, msg) in snapshot.messages.iter().enumerate() {
                MessageRow { key: "{i}", index: i, message: msg.clone() }
            }
            if is_loading {
                div { class: "message-row assistant",
                    div { class: "bubble assistant", "Thinking…" }
                }
            }
        }
        form { class: "composer",
            textarea {
                rows: "1",
                placeholder: "Ask about EU crowdfunding regulation…",
                value: "{input}",
                oninput: move |ev| input_store.set_input(ev.value()),
                onkeydown: move |ev| {
                    if ev.key() == Key::Enter && !ev.modifiers().shift() {
                        ev.prevent_default();
                        send_on_enter(state.read().input.clone());
                    }
                },
                disabled: is_loading,
                autofocus: true,
            }
            button {
                class: "btn btn-primary",
                r#type: "button",
                disabled: !can_send,
                onclick: move |_| send_on_click(state.read().input.clone()),
                "Send"
            }
        }
    }
}

#[component]
fn MessageRow(index: usize, message: ChatMessage) -> Element {
    let services = use_context::<Services>();
    let class = role_class(message.role);
    let error_class = if message.is_error { "error" } else { "" };
    let timestamp = format_message_timestamp(message.timestamp.as_deref());
    let summary = message.metadata.as_ref().and_then(metadata_summary);
    let show_actions = message.role == Role::Assistant && !message.is_error;

    let run_action = {
        let store = services.store.clone();
        let message = message.clone();
        move |action: MessageAction| {
            let store = store.clone();
            let message = message.clone();
            spawn(async move {
                store.handle_message_action(action, index, &message).await;
            });
        }
    };
    let on_regenerate = run_action.clone();
    let on_bookmark = run_action.clone();
    let on_like = run_action.clone();
    let on_dislike = run_action;

    let copy_payload = message.content.clone();
    let on_copy = move |_| {
        let raw = copy_payload.clone();
        spawn(async move {
            #[cfg(any(feature = "desktop", feature = "mobile"))]
            {
                if let Ok(mut clipboard) = arboard::Clipboard::new()
                    && let Err(err) = clipboard.set_text(raw)
                {
                    tracing::warn!("copy failed: {err}");
                }
            }
            #[cfg(not(any(feature = "desktop", feature = "mobile")))]
            {
                drop(raw);
            }
        });
    };

    rsx! {
        div { class: "message-row {class}",
            div { class: "message-stack",
                div { class: "bubble {class} {error_class}",
                    if message.role == Role::Assistant && !message.is_error {
                        div { class: "md", dangerous_inner_html: "{markdown_to_html(&message.content)}" }
                    } else {
                        "{message.content}"
                    }
                }
                div { class: "message-meta",
                    if let Some(ts) = timestamp {
                        span { class: "message-timestamp", "{ts}" }
                    }
                    if let Some(summary) = summary {
                        span { class: "message-metrics", "{summary}" }
                    }
                    if show_actions {
                        div { class: "message-actions",
                            button { title: "Copy", onclick: on_copy, "Copy" }
                            button {
                                title: "Regenerate",
                                onclick: move |_| on_regenerate(MessageAction::Regenerate),
                                "Regenerate"
                            }
                            button {
                                title: "Bookmark",
                                onclick: move |_| on_bookmark(MessageAction::Bookmark),
                                "Bookmark"
                            }
                            button { title: "Helpful", onclick: move |_| on_like(MessageAction::Like), "👍" }
                            button {
                                title: "Not helpful",
                                onclick: move |_| on_dislike(MessageAction::Dislike),
                                "👎"
                            }
                        }
                    }
                }
            }
        }
    }
}
