pub mod api;
pub mod config;
pub mod markdown;
pub mod premium;
pub mod store;
pub mod suggestions;
pub mod types;

#[cfg(feature = "dioxus")]
pub mod theme;
#[cfg(feature = "dioxus")]
pub mod ui;
#[cfg(feature = "dioxus")]
pub mod views;
