use super::types::ChatMessage;

/// Sự kiện từ store gửi lên UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    MessageReceived(ChatMessage),
    ReactionAdded { message_id: String, symbol: String },
    ParticipantJoined(String),
    ParticipantLeft(String),
    /// The local participant was let in from the lobby.
    LobbyAdmitted,
    KnockingChanged(bool),
}
