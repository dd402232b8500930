use crate::store::{ChatState, DELETE_CONFIRMATION};
use crate::types::{Session, ThemeMode};
use crate::ui::Services;
use crate::views::settings::SettingsModal;
use dioxus::prelude::*;

/// Overlays driven by store flags.
#[component]
pub fn Modals(theme: Signal<ThemeMode>) -> Element {
    let state = use_context::<Signal<ChatState>>();
    let snapshot = state.read();
    let show_settings = snapshot.show_settings_modal;
    let show_archived = snapshot.show_archived_modal;
    let pending_delete = snapshot.pending_delete.is_some();
    let notice = snapshot.notice.clone();
    drop(snapshot);

    rsx! {
        if show_settings {
            SettingsModal { theme }
        }
        if show_archived {
            ArchivedModal {}
        }
        if pending_delete {
            DeleteConfirm {}
        }
        if let Some(notice) = notice {
            NoticeModal { notice }
        }
    }
}

#[component]
fn ArchivedModal() -> Element {
    let services = use_context::<Services>();
    let state = use_context::<Signal<ChatState>>();
    let archived = state.read().archived_sessions.clone();
    let close_store = services.store.clone();

    rsx! {
        div { class: "modal-backdrop",
            div { class: "modal",
                h2 { "Archived sessions" }
                if archived.is_empty() {
                    p { class: "text-muted", "No archived sessions." }
                }
                for session in archived {
                    ArchivedRow { key: "{session.session_id}", session: session.clone() }
                }
                div { class: "modal-actions",
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| close_store.close_archived_modal(),
                        "Close"
                    }
                }
            }
        }
    }
}

#[component]
fn ArchivedRow(session: Session) -> Element {
    let services = use_context::<Services>();
    let title = session
        .title
        .clone()
        .unwrap_or_else(|| "New Session".to_string());
    let id = session.session_id.clone();

    rsx! {
        div { class: "session-row",
            span { class: "session-title", "{title}" }
            button {
                class: "btn btn-ghost",
                r#type: "button",
                onclick: move |_| {
                    let store = services.store.clone();
                    let id = id.clone();
                    spawn(async move {
                        store.unarchive_session(&id).await;
                    });
                },
                "Restore"
            }
        }
    }
}

#[component]
fn DeleteConfirm() -> Element {
    let services = use_context::<Services>();
    let cancel_store = services.store.clone();
    let confirm_store = services.store.clone();

    rsx! {
        div { class: "modal-backdrop",
            div { class: "modal",
                p { "{DELETE_CONFIRMATION}" }
                div { class: "modal-actions",
                    button {
                        class: "btn btn-ghost",
                        r#type: "button",
                        onclick: move |_| cancel_store.cancel_delete(),
                        "Cancel"
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| {
                            let store = confirm_store.clone();
                            spawn(async move {
                                store.confirm_delete().await;
                            });
                        },
                        "Delete"
                    }
                }
            }
        }
    }
}

#[component]
fn NoticeModal(notice: String) -> Element {
    let services = use_context::<Services>();

    rsx! {
        div { class: "modal-backdrop",
            div { class: "modal",
                p { style: "white-space: pre-line;", "{notice}" }
                div { class: "modal-actions",
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| services.store.dismiss_notice(),
                        "OK"
                    }
                }
            }
        }
    }
}
