use crate::ui::Services;
use dioxus::prelude::*;
use std::time::Duration;

const SELECTION_FLASH: Duration = Duration::from_millis(200);

/// Suggested opening questions for an empty session.
#[component]
pub fn ConversationStarters(suggestions: Vec<String>, selected: Option<String>) -> Element {
    let services = use_context::<Services>();
    let mount_store = services.store.clone();
    use_hook(move || mount_store.ensure_suggestions());

    let dismiss_store = services.store.clone();

    rsx! {
        div { class: "starters",
            h2 { "How can I help with EU crowdfunding regulation?" }
            for suggestion in suggestions {
                SuggestionButton {
                    key: "{suggestion}",
                    selected: selected.as_deref() == Some(suggestion.as_str()),
                    text: suggestion.clone(),
                }
            }
            button {
                class: "btn btn-ghost",
                r#type: "button",
                onclick: move |_| dismiss_store.dismiss_suggestions(),
                "Hide suggestions"
            }
        }
    }
}

#[component]
fn SuggestionButton(text: String, selected: bool) -> Element {
    let services = use_context::<Services>();
    let class = if selected { "starter selected" } else { "starter" };
    let label = text.clone();

    rsx! {
        button {
            class: "{class}",
            r#type: "button",
            onclick: move |_| {
                let store = services.store.clone();
                store.select_suggestion(&text);
                spawn(async move {
                    tokio::time::sleep(SELECTION_FLASH).await;
                    store.clear_selected_suggestion();
                });
            },
            "{label}"
        }
    }
}
