use crate::premium::SubscriptionInfo;
use crate::store::ChatState;
use crate::types::{SystemStatus, ThemeMode};
use crate::ui::Services;
use dioxus::prelude::*;

#[component]
pub fn SettingsModal(theme: Signal<ThemeMode>) -> Element {
    let services = use_context::<Services>();
    let state = use_context::<Signal<ChatState>>();
    let status = state.read().system_status.clone();

    let premium = services.premium.clone();
    let subscription = use_resource(move || {
        let premium = premium.clone();
        async move { premium.subscription_info().await }
    });
    let close_store = services.store.clone();

    rsx! {
        div { class: "modal-backdrop",
            div { class: "modal",
                h2 { "Settings" }
                div { class: "settings-section",
                    h3 { class: "section-title", "Display" }
                    div { class: "theme-toggle",
                        button {
                            class: format_args!(
                                "theme-option {}",
                                if matches!(theme(), ThemeMode::Dark) { "active" } else { "" }
                            ),
                            r#type: "button",
                            onclick: move |_| theme.set(ThemeMode::Dark),
                            "Dark"
                        }
                        button {
                            class: format_args!(
                                "theme-option {}",
                                if matches!(theme(), ThemeMode::Light) { "active" } else { "" }
                            ),
                            r#type: "button",
                            onclick: move |_| theme.set(ThemeMode::Light),
                            "Light"
                        }
                    }
                }
                div { class: "settings-section",
                    h3 { class: "section-title", "Subscription" }
                    {match subscription.cloned() {
                        Some(info) => rsx! { SubscriptionDetails { info } },
                        None => rsx! { p { class: "text-muted", "Checking subscription…" } },
                    }}
                }
                div { class: "settings-section",
                    h3 { class: "section-title", "System information" }
                    {match status {
                        Some(status) => rsx! { SystemDetails { status } },
                        None => rsx! { p { class: "text-muted", "System status unavailable." } },
                    }}
                }
                div { class: "modal-actions",
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| close_store.close_settings_modal(),
                        "Close"
                    }
                }
            }
        }
    }
}

#[component]
fn SubscriptionDetails(info: SubscriptionInfo) -> Element {
    let plan = format!("{:?}", info.plan_type);
    let source = info.source.clone().unwrap_or_default();

    rsx! {
        if info.is_premium {
            p { "Plan: {plan}" }
            if let Some(activated) = info.activated_at.clone() {
                p { class: "text-muted", "Active since {activated}" }
            }
            if info.can_manage {
                p { class: "text-muted", "Billed through {source}" }
            }
        } else {
            p { class: "text-muted", "Free plan" }
        }
    }
}

fn enabled_label(enabled: bool) -> &'static str {
    if enabled { "enabled" } else { "disabled" }
}

#[component]
fn SystemDetails(status: SystemStatus) -> Element {
    let mut memory: Vec<(String, bool)> = status
        .memory_enabled
        .iter()
        .map(|(name, enabled)| (name.clone(), *enabled))
        .collect();
    memory.sort();

    rsx! {
        p { "Documents indexed: {status.total_documents}" }
        p { "Cache entries: {status.cache_size}" }
        for (name, enabled) in memory {
            p { class: "text-muted",
                "{name}: {enabled_label(enabled)}"
            }
        }
    }
}
