use crate::types::ThemeMode;

pub struct ThemeDefinition {
    pub css: &'static str,
    pub label: &'static str,
}

pub fn theme_definition(mode: ThemeMode) -> ThemeDefinition {
    match mode {
        ThemeMode::Dark => ThemeDefinition {
            css: DARK_THEME,
            label: "Dark",
        },
        ThemeMode::Light => ThemeDefinition {
            css: LIGHT_THEME,
            label: "Light",
        },
    }
}

pub fn next_theme(mode: ThemeMode) -> ThemeMode {
    match mode {
        ThemeMode::Dark => ThemeMode::Light,
        ThemeMode::Light => ThemeMode::Dark,
    }
}

pub const BASE_CSS: &str = r#"
* { box-sizing: border-box; }
body { margin: 0; font-family: system-ui, sans-serif; background: var(--color-bg-primary); color: var(--color-text-primary); }
button { font: inherit; cursor: pointer; }
button:disabled { opacity: 0.5; cursor: not-allowed; }
.app-shell { display: flex; height: 100vh; }
.sidebar { width: 16rem; display: flex; flex-direction: column; gap: 0.5rem; padding: 0.75rem; background: var(--color-bg-secondary); border-right: 1px solid var(--color-border); }
.session-row { display: flex; align-items: center; gap: 0.25rem; padding: 0.5rem; border-radius: 0.5rem; }
.session-row.active { background: var(--color-surface-muted); }
.session-title { flex: 1; text-align: left; background: none; border: none; color: inherit; overflow: hidden; text-overflow: ellipsis; white-space: nowrap; }
.main-column { flex: 1; display: flex; flex-direction: column; min-width: 0; }
.top-bar { height: 4rem; padding: 0 1rem; display: grid; grid-template-columns: 1fr auto 1fr; align-items: center; }
.top-bar-right { display: flex; justify-content: flex-end; align-items: center; gap: 0.75rem; position: relative; }
.domain-pill { display: inline-flex; align-items: center; gap: 0.5rem; padding: 0.5rem 0.75rem; border-radius: 0.5rem; background: var(--color-surface-muted); font-size: 0.875rem; }
.status-dot { width: 0.5rem; height: 0.5rem; border-radius: 50%; background: #22c55e; }
.premium-badge { padding: 0.25rem 0.6rem; border-radius: 999px; font-size: 0.75rem; background: var(--color-accent); color: #fff; }
.profile-menu { position: absolute; top: 2.75rem; right: 0; z-index: 50; min-width: 12rem; display: flex; flex-direction: column; background: var(--color-bg-secondary); border: 1px solid var(--color-border); border-radius: 0.5rem; }
.profile-menu button { background: none; border: none; color: inherit; text-align: left; padding: 0.6rem 0.9rem; }
.chat-list { flex: 1; overflow-y: auto; padding: 1rem; display: flex; flex-direction: column; gap: 1rem; }
.message-row { display: flex; }
.message-row.user { justify-content: flex-end; }
.bubble { max-width: 48rem; padding: 0.75rem 1rem; border-radius: 0.75rem; }
.bubble.user { background: var(--color-chat-user-bg); color: var(--color-chat-user-text); }
.bubble.assistant { background: var(--color-chat-assistant-bg); }
.bubble.error { border: 1px solid #ef4444; }
.message-meta { display: flex; gap: 0.5rem; font-size: 0.75rem; color: var(--color-text-muted); margin-top: 0.25rem; }
.message-actions { display: flex; gap: 0.25rem; }
.message-actions button { background: none; border: none; color: var(--color-text-muted); }
.starters { margin-top: 2.5rem; display: flex; flex-direction: column; gap: 0.5rem; align-items: center; }
.starter { width: 100%; max-width: 32rem; padding: 0.75rem; border-radius: 0.5rem; text-align: left; border: none; background: var(--color-surface-muted); color: inherit; }
.starter.selected { background: var(--color-accent); color: #fff; }
.composer { padding: 1rem; display: flex; gap: 0.5rem; }
.composer textarea { flex: 1; resize: none; padding: 0.75rem; border-radius: 0.75rem; background: var(--color-input-bg); color: inherit; border: 1px solid var(--color-border); }
.modal-backdrop { position: fixed; inset: 0; z-index: 40; display: flex; align-items: center; justify-content: center; background: rgba(0, 0, 0, 0.5); }
.menu-backdrop { position: fixed; inset: 0; z-index: 40; }
.modal { width: 100%; max-width: 42rem; max-height: 80vh; overflow-y: auto; padding: 1.5rem; border-radius: 0.5rem; background: var(--color-bg-secondary); }
.modal-actions { display: flex; justify-content: flex-end; gap: 0.5rem; margin-top: 1rem; }
.hstack { display: flex; align-items: center; gap: 0.5rem; }
.text-muted { color: var(--color-text-muted); }
.btn { padding: 0.5rem 0.9rem; border-radius: 0.5rem; border: 1px solid transparent; color: inherit; }
.btn-primary { background: var(--color-accent); color: #fff; }
.btn-ghost { background: none; border-color: var(--color-border); }
.theme-toggle { display: flex; gap: 0.5rem; }
.theme-option { padding: 0.4rem 0.8rem; border-radius: 0.5rem; border: 1px solid var(--color-border); background: none; color: inherit; }
.theme-option.active { background: var(--color-accent); color: #fff; }
"#;

const DARK_THEME: &str = r#"
:root {
    --color-bg-primary: #111827;
    --color-bg-secondary: #1f2937;
    --color-text-primary: #f9fafb;
    --color-text-muted: #9ca3af;
    --color-border: #374151;
    --color-surface-muted: #374151;
    --color-input-bg: #1f2937;
    --color-chat-user-bg: #2563eb;
    --color-chat-user-text: #ffffff;
    --color-chat-assistant-bg: transparent;
    --color-accent: #2563eb;
}
"#;

const LIGHT_THEME: &str = r#"
:root {
    --color-bg-primary: #ffffff;
    --color-bg-secondary: #f3f4f6;
    --color-text-primary: #111827;
    --color-text-muted: #6b7280;
    --color-border: #d1d5db;
    --color-surface-muted: #e5e7eb;
    --color-input-bg: #ffffff;
    --color-chat-user-bg: #1d4ed8;
    --color-chat-user-text: #ffffff;
    --color-chat-assistant-bg: #f9fafb;
    --color-accent: #1d4ed8;
}
"#;
