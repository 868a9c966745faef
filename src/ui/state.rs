use crate::common::{DisplayPreferences, Recipient, ViewerContext};
use crate::store::ChatStore;

/// Trạng thái cục bộ của UI.
pub struct AppState {
    pub store: ChatStore,
    pub prefs: DisplayPreferences,
    pub input_text: String,
    /// Participant the next message goes to privately.
    pub reply_target: Option<Recipient>,
    pub viewer_input: String,
}

impl AppState {
    pub fn new(viewer: ViewerContext, prefs: DisplayPreferences) -> Self {
        Self {
            viewer_input: viewer.viewer_id.clone(),
            store: ChatStore::new(viewer),
            prefs,
            input_text: String::new(),
            reply_target: None,
        }
    }

    /// Aim the input bar at the sender of `message_id`. Own messages are
    /// never a reply target.
    pub fn reply_to(&mut self, message_id: &str) {
        let viewer_id = self.store.viewer_context().viewer_id;
        match self.store.message(message_id) {
            Some(message) if message.sender_id != viewer_id => {
                self.reply_target = Some(Recipient {
                    participant_id: message.sender_id.clone(),
                    display_name: message.display_name.clone(),
                });
            }
            Some(_) => log::debug!("Ignoring reply to own message {message_id}"),
            None => log::warn!("Reply requested for unknown message {message_id}"),
        }
    }

    pub fn switch_viewer(&mut self, viewer_id: String) {
        self.store.set_viewer_id(viewer_id);
        self.reply_target = None;
    }
}
