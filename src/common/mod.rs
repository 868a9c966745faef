pub mod commands;
pub mod events;
pub mod types;

pub use commands::ChatCommand;
pub use events::StoreEvent;
pub use types::{ChatMessage, DisplayPreferences, MessageKind, Recipient, ViewerContext};
