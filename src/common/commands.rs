use super::types::Recipient;

/// Lệnh UI gửi xuống room client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    /// Send a message to the room, or privately when `recipient` is set.
    SendMessage {
        text: String,
        recipient: Option<Recipient>,
    },
    /// React to someone else's message.
    React { message_id: String, symbol: String },
}
