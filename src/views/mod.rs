pub mod chat;
pub mod modals;
pub mod settings;
pub mod sidebar;
pub mod starters;
pub mod top_bar;

pub use chat::ChatView;
pub use modals::Modals;
pub use sidebar::Sidebar;
pub use top_bar::TopBar;
