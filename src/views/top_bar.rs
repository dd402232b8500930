use crate::store::ChatState;
use crate::theme::{next_theme, theme_definition};
use crate::types::ThemeMode;
use crate::ui::Services;
use dioxus::prelude::*;

#[component]
pub fn TopBar(theme: Signal<ThemeMode>) -> Element {
    let services = use_context::<Services>();
    let state = use_context::<Signal<ChatState>>();
    let snapshot = state.read();
    let sidebar_open = snapshot.sidebar_open;
    let menu_open = snapshot.show_profile_menu;
    let title = snapshot.current_session_title();
    drop(snapshot);

    let premium = services.premium.clone();
    let badge = use_resource(move || {
        let premium = premium.clone();
        async move { premium.premium_badge().await }
    });

    let theme_label = theme_definition(next_theme(theme())).label;
    let sidebar_store = services.store.clone();
    let menu_store = services.store.clone();

    rsx! {
        header { class: "top-bar",
            div {
                if !sidebar_open {
                    button {
                        class: "btn btn-ghost",
                        r#type: "button",
                        title: "Open sidebar",
                        onclick: move |_| sidebar_store.set_sidebar_open(true),
                        "☰"
                    }
                }
            }
            div { class: "domain-pill",
                span { class: "status-dot" }
                span { "EU Crowdfunding Regulations" }
                span { class: "text-muted", "· {title}" }
            }
            div { class: "top-bar-right",
                if let Some(Some(current)) = badge.cloned() {
                    span {
                        class: "premium-badge",
                        style: current.style(),
                        "{current.emoji} {current.text}"
                    }
                }
                button {
                    class: "btn btn-ghost",
                    r#type: "button",
                    title: "Switch theme",
                    onclick: move |_| theme.set(next_theme(theme())),
                    "{theme_label}"
                }
                button {
                    class: "btn btn-ghost",
                    r#type: "button",
                    title: "Profile",
                    onclick: move |_| menu_store.set_profile_menu(!menu_open),
                    "👤"
                }
                if menu_open {
                    ProfileMenu {}
                }
            }
        }
    }
}

#[component]
fn ProfileMenu() -> Element {
    let services = use_context::<Services>();
    let backdrop_store = services.store.clone();
    let settings_store = services.store.clone();
    let archived_store = services.store.clone();

    rsx! {
        div {
            class: "menu-backdrop",
            onclick: move |_| backdrop_store.set_profile_menu(false),
        }
        div { class: "profile-menu",
            button {
                r#type: "button",
                onclick: move |_| {
                    settings_store.set_profile_menu(false);
                    settings_store.open_settings_modal();
                },
                "Settings"
            }
            button {
                r#type: "button",
                onclick: move |_| {
                    let store = archived_store.clone();
                    spawn(async move {
                        store.open_archived_modal().await;
                    });
                },
                "Archived sessions"
            }
        }
    }
}
