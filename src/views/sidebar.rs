use crate::store::ChatState;
use crate::types::Session;
use crate::ui::Services;
use dioxus::prelude::*;

#[component]
pub fn Sidebar() -> Element {
    let services = use_context::<Services>();
    let state = use_context::<Signal<ChatState>>();
    let snapshot = state.read();
    let sessions = snapshot.sessions.clone();
    let current = snapshot.current_session_id.clone();
    drop(snapshot);

    let new_store = services.store.clone();
    let close_store = services.store.clone();

    rsx! {
        aside { class: "sidebar",
            div { class: "hstack", style: "justify-content: space-between;",
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    onclick: move |_| {
                        let store = new_store.clone();
                        spawn(async move {
                            store.create_new_session().await;
                        });
                    },
                    "New session"
                }
                button {
                    class: "btn btn-ghost",
                    r#type: "button",
                    title: "Close sidebar",
                    onclick: move |_| close_store.set_sidebar_open(false),
                    "✕"
                }
            }
            if sessions.is_empty() {
                p { class: "text-muted", "No conversations yet." }
            }
            for session in sessions {
                SessionRow {
                    key: "{session.session_id}",
                    active: current.as_deref() == Some(session.session_id.as_str()),
                    session: session.clone(),
                }
            }
        }
    }
}

#[component]
fn SessionRow(session: Session, active: bool) -> Element {
    let services = use_context::<Services>();
    let title = session
        .title
        .clone()
        .unwrap_or_else(|| "New Session".to_string());
    let class = if active { "session-row active" } else { "session-row" };

    let load_store = services.store.clone();
    let load_id = session.session_id.clone();
    let archive_store = services.store.clone();
    let archive_id = session.session_id.clone();
    let delete_store = services.store.clone();
    let delete_id = session.session_id.clone();

    rsx! {
        div { class: "{class}",
            button {
                class: "session-title",
                r#type: "button",
                title: "{title}",
                onclick: move |_| {
                    let store = load_store.clone();
                    let id = load_id.clone();
                    spawn(async move {
                        store.load_session_messages(&id).await;
                    });
                },
                "{title}"
            }
            span { class: "text-muted", "{session.message_count}" }
            button {
                class: "btn btn-ghost",
                r#type: "button",
                title: "Archive",
                onclick: move |_| {
                    let store = archive_store.clone();
                    let id = archive_id.clone();
                    spawn(async move {
                        store.archive_session(&id).await;
                    });
                },
                "🗄"
            }
            button {
                class: "btn btn-ghost",
                r#type: "button",
                title: "Delete",
                onclick: move |_| delete_store.delete_session(&delete_id),
                "🗑"
            }
        }
    }
}
