use crate::api::{HttpApi, NoPayments, StaticAuth};
use crate::config::AppConfig;
use crate::premium::PremiumService;
use crate::store::{ChatState, ChatStore};
use crate::theme::{BASE_CSS, theme_definition};
use crate::types::ThemeMode;
use crate::views::{ChatView, Modals, Sidebar, TopBar};
use dioxus::prelude::*;
use std::sync::Arc;

/// Long-lived services shared with every view through context.
#[derive(Clone)]
pub struct Services {
    pub store: Arc<ChatStore>,
    pub premium: Arc<PremiumService>,
}

fn build_services() -> anyhow::Result<Services> {
    let config = AppConfig::from_env().unwrap_or_else(|err| {
        tracing::warn!("invalid configuration, using defaults: {err:#}");
        AppConfig::default()
    });
    tracing::info!(api_base = %config.api_base, "starting crowdlex");

    let auth = Arc::new(StaticAuth::from_token(
        config.access_token.clone(),
        config.user_email.clone(),
    ));
    let api = Arc::new(HttpApi::new(&config, auth.clone())?);
    let store = ChatStore::new(api.clone(), auth, Arc::new(NoPayments));
    let premium = PremiumService::new(api, config.premium_cache_timeout);

    Ok(Services {
        store: Arc::new(store),
        premium: Arc::new(premium),
    })
}

#[component]
pub fn App() -> Element {
    let services = use_hook(|| match build_services() {
        Ok(services) => Some(services),
        Err(err) => {
            tracing::error!("failed to start: {err:#}");
            None
        }
    });
    let theme = use_signal(|| ThemeMode::Dark);

    match services {
        Some(services) => rsx! {
            ThemeStyles { theme }
            Shell { services, theme }
        },
        None => rsx! {
            ThemeStyles { theme }
            div { class: "modal", "Could not start the client. Check the logs for details." }
        },
    }
}

#[component]
fn ThemeStyles(theme: Signal<ThemeMode>) -> Element {
    let definition = theme_definition(theme());
    rsx! {
        style { dangerous_inner_html: "{BASE_CSS}" }
        style { dangerous_inner_html: "{definition.css}" }
    }
}

#[component]
fn Shell(services: Services, theme: Signal<ThemeMode>) -> Element {
    let state = use_store_signal(&services.store);
    use_context_provider(|| services.clone());
    use_context_provider(|| state);
    use_startup(&services.store);
    use_auto_load(&services.store, state);

    let sidebar_open = state.read().sidebar_open;
    rsx! {
        div { class: "app-shell",
            if sidebar_open {
                Sidebar {}
            }
            div { class: "main-column",
                TopBar { theme }
                ChatView {}
            }
        }
        Modals { theme }
    }
}

impl PartialEq for Services {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.store, &other.store) && Arc::ptr_eq(&self.premium, &other.premium)
    }
}

/// Mirrors the store's watch channel into a signal so views re-render on change.
fn use_store_signal(store: &Arc<ChatStore>) -> Signal<ChatState> {
    let mut state = use_signal(|| store.state());
    let store = store.clone();
    use_hook(move || {
        let mut rx = store.subscribe();
        spawn(async move {
            while rx.changed().await.is_ok() {
                let snapshot = rx.borrow_and_update().clone();
                state.set(snapshot);
            }
        });
    });
    state
}

fn use_startup(store: &Arc<ChatStore>) {
    let store = store.clone();
    use_hook(move || {
        spawn(async move {
            store.initialize().await;
        });
    });
}

/// Loads a selected session's persisted transcript once the session list knows about it.
fn use_auto_load(store: &Arc<ChatStore>, state: Signal<ChatState>) {
    let selection = use_memo(move || {
        let snapshot = state.read();
        (
            snapshot.current_session_id.clone(),
            snapshot.current_session().map(|session| session.message_count),
            snapshot.messages.len(),
        )
    });
    let store = store.clone();
    use_effect(move || {
        let (session_id, _, _) = selection();
        if session_id.is_none() {
            return;
        }
        let store = store.clone();
        spawn(async move {
            store.auto_load_selected().await;
        });
    });
}
