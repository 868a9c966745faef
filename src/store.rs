//! Conference-side state the chat reads from: message history, the local
//! participant and who else is in the room.

use crate::chat::RoomState;
use crate::common::{ChatMessage, StoreEvent, ViewerContext};

#[derive(Debug, Clone, Default)]
pub struct ChatStore {
    messages: Vec<ChatMessage>,
    viewer: ViewerContext,
    room: RoomState,
    /// The viewer id was added to the room by the store, not by a join event.
    viewer_joined_room: bool,
}

impl ChatStore {
    pub fn new(viewer: ViewerContext) -> Self {
        let mut room = RoomState::default();
        let viewer_joined_room = room.join(viewer.viewer_id.clone());
        Self {
            messages: Vec::new(),
            viewer,
            room,
            viewer_joined_room,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn message(&self, message_id: &str) -> Option<&ChatMessage> {
        self.messages
            .iter()
            .find(|message| message.message_id == message_id)
    }

    /// Latest display name a participant sent under.
    pub fn display_name_of(&self, participant_id: &str) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|message| message.sender_id == participant_id)
            .map(|message| message.display_name.as_str())
    }

    pub fn room(&self) -> &RoomState {
        &self.room
    }

    pub fn viewer_context(&self) -> ViewerContext {
        self.viewer.clone()
    }

    pub fn set_knocking(&mut self, knocking: bool) {
        if self.viewer.is_knocking_in_lobby != knocking {
            log::info!("Lobby knocking state changed to {knocking}");
        }
        self.viewer.is_knocking_in_lobby = knocking;
    }

    /// Switch the local identity; the new id joins the room.
    pub fn set_viewer_id(&mut self, viewer_id: impl Into<String>) {
        let viewer_id = viewer_id.into();
        if viewer_id == self.viewer.viewer_id {
            return;
        }
        // Participants announced by the room stay when the viewer moves on.
        if self.viewer_joined_room {
            self.room.leave(&self.viewer.viewer_id);
        }
        self.viewer_joined_room = self.room.join(viewer_id.clone());
        log::info!("Viewing chat as {viewer_id}");
        self.viewer.viewer_id = viewer_id;
    }

    pub fn apply(&mut self, event: StoreEvent) {
        match event {
            StoreEvent::MessageReceived(message) => self.push_message(message),
            StoreEvent::ReactionAdded { message_id, symbol } => {
                self.add_reaction(&message_id, symbol);
            }
            StoreEvent::ParticipantJoined(participant_id) => {
                if participant_id == self.viewer.viewer_id {
                    self.viewer_joined_room = false;
                }
                if self.room.join(participant_id.clone()) {
                    log::debug!("Participant {participant_id} joined");
                }
            }
            StoreEvent::ParticipantLeft(participant_id) => {
                if self.room.leave(&participant_id) {
                    log::debug!("Participant {participant_id} left");
                }
            }
            StoreEvent::LobbyAdmitted => self.set_knocking(false),
            StoreEvent::KnockingChanged(knocking) => self.set_knocking(knocking),
        }
    }

    fn push_message(&mut self, mut message: ChatMessage) {
        if self.message(&message.message_id).is_some() {
            log::debug!("Ignoring duplicate message {}", message.message_id);
            return;
        }
        if message.has_recipient_mismatch() {
            log::warn!(
                "Message {} has inconsistent private/recipient fields",
                message.message_id
            );
        }
        if message.recipient_name.is_none() {
            message.recipient_name = message
                .recipient_id
                .as_deref()
                .and_then(|recipient| self.display_name_of(recipient))
                .map(str::to_string);
        }
        // Giữ lịch sử theo thứ tự thời gian; tin cùng timestamp giữ thứ tự đến.
        let index = self
            .messages
            .partition_point(|existing| existing.timestamp <= message.timestamp);
        self.messages.insert(index, message);
    }

    fn add_reaction(&mut self, message_id: &str, symbol: String) {
        match self
            .messages
            .iter_mut()
            .find(|message| message.message_id == message_id)
        {
            Some(slot) => *slot = slot.with_reaction(symbol),
            None => log::warn!("Reaction {symbol} for unknown message {message_id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::ReplyPolicy;

    fn store() -> ChatStore {
        ChatStore::new(ViewerContext::new("u1"))
    }

    fn message(id: &str, timestamp: i64) -> ChatMessage {
        ChatMessage::new(id, "u2", "Bob", id, timestamp)
    }

    #[test]
    fn viewer_is_part_of_the_room() {
        assert!(store().room().contains("u1"));
    }

    #[test]
    fn history_is_sorted_and_deduplicated() {
        let mut store = store();
        store.apply(StoreEvent::MessageReceived(message("b", 20)));
        store.apply(StoreEvent::MessageReceived(message("a", 10)));
        store.apply(StoreEvent::MessageReceived(message("c", 20)));
        store.apply(StoreEvent::MessageReceived(message("a", 10)));

        let ids: Vec<&str> = store
            .messages()
            .iter()
            .map(|m| m.message_id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn reactions_replace_the_record() {
        let mut store = store();
        store.apply(StoreEvent::MessageReceived(message("a", 10)));
        store.apply(StoreEvent::ReactionAdded {
            message_id: "a".into(),
            symbol: "👍".into(),
        });
        store.apply(StoreEvent::ReactionAdded {
            message_id: "missing".into(),
            symbol: "👍".into(),
        });

        assert_eq!(store.message("a").unwrap().reactions, vec!["👍"]);
    }

    #[test]
    fn lobby_admission_clears_knocking() {
        let mut store = store();
        store.apply(StoreEvent::KnockingChanged(true));
        assert!(store.viewer_context().is_knocking_in_lobby);

        store.apply(StoreEvent::LobbyAdmitted);
        assert!(!store.viewer_context().is_knocking_in_lobby);
    }

    #[test]
    fn participants_join_and_leave() {
        let mut store = store();
        store.apply(StoreEvent::ParticipantJoined("u2".into()));
        assert!(store.room().contains("u2"));

        store.apply(StoreEvent::ParticipantLeft("u2".into()));
        assert!(!store.room().contains("u2"));
    }

    #[test]
    fn switching_viewer_moves_room_membership() {
        let mut store = store();
        store.set_viewer_id("u9");

        assert_eq!(store.viewer_context().viewer_id, "u9");
        assert!(store.room().contains("u9"));
        assert!(!store.room().contains("u1"));
    }

    #[test]
    fn viewing_as_a_participant_keeps_them_in_the_room() {
        let mut store = store();
        store.apply(StoreEvent::ParticipantJoined("u2".into()));
        store.apply(StoreEvent::MessageReceived(
            ChatMessage::new("m1", "u2", "Bob", "psst", 1).private_to("u1"),
        ));

        store.set_viewer_id("u2");
        store.set_viewer_id("u1");

        assert!(store.room().contains("u2"));
        assert!(store.room().contains("u1"));
        let message = store.message("m1").unwrap();
        assert!(store.room().can_reply(message, &store.viewer_context()));
    }

    #[test]
    fn private_recipient_name_comes_from_history() {
        let mut store = store();
        store.apply(StoreEvent::MessageReceived(message("a", 10)));
        store.apply(StoreEvent::MessageReceived(
            ChatMessage::new("b", "u1", "Ann", "psst", 20).private_to("u2"),
        ));
        store.apply(StoreEvent::MessageReceived(
            ChatMessage::new("c", "u1", "Ann", "psst", 30).private_to("u7"),
        ));

        assert_eq!(store.message("b").unwrap().recipient_name.as_deref(), Some("Bob"));
        assert_eq!(store.message("c").unwrap().recipient_name, None);
    }

    #[test]
    fn viewer_announced_by_the_room_is_not_evicted() {
        let mut store = store();
        store.apply(StoreEvent::ParticipantJoined("u1".into()));
        store.set_viewer_id("u2");

        assert!(store.room().contains("u1"));
    }
}
