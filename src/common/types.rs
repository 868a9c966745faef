use serde::{Deserialize, Serialize};

/// Origin/type of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageKind {
    #[default]
    Regular,
    /// A message the conference refused to deliver; `text` carries the reason.
    Error,
    /// A reaction broadcast rendered as its own message.
    Reaction,
}

/// Domain model đại diện một tin nhắn chat.
///
/// Records are read-only once created. Reactions arriving later produce a
/// new record through [`ChatMessage::with_reaction`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub message_id: String,
    pub sender_id: String,
    pub display_name: String,
    pub text: String,
    /// Epoch milliseconds.
    pub timestamp: i64,
    #[serde(default)]
    pub kind: MessageKind,
    #[serde(default)]
    pub is_private: bool,
    /// Set iff `is_private`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_id: Option<String>,
    /// Display name of the recipient when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_name: Option<String>,
    #[serde(default)]
    pub is_lobby_chat: bool,
    #[serde(default)]
    pub reactions: Vec<String>,
}

impl ChatMessage {
    pub fn new(
        message_id: impl Into<String>,
        sender_id: impl Into<String>,
        display_name: impl Into<String>,
        text: impl Into<String>,
        timestamp: i64,
    ) -> Self {
        Self {
            message_id: message_id.into(),
            sender_id: sender_id.into(),
            display_name: display_name.into(),
            text: text.into(),
            timestamp,
            kind: MessageKind::Regular,
            is_private: false,
            recipient_id: None,
            recipient_name: None,
            is_lobby_chat: false,
            reactions: Vec::new(),
        }
    }

    pub fn private_to(mut self, recipient_id: impl Into<String>) -> Self {
        self.is_private = true;
        self.recipient_id = Some(recipient_id.into());
        self
    }

    pub fn with_recipient_name(mut self, name: impl Into<String>) -> Self {
        self.recipient_name = Some(name.into());
        self
    }

    /// Recipient display name, falling back to the raw id.
    pub fn recipient_label(&self) -> Option<&str> {
        self.recipient_name
            .as_deref()
            .or(self.recipient_id.as_deref())
    }

    pub fn lobby(mut self) -> Self {
        self.is_lobby_chat = true;
        self
    }

    pub fn with_kind(mut self, kind: MessageKind) -> Self {
        self.kind = kind;
        self
    }

    /// Copy of this message with `symbol` appended to its reactions.
    pub fn with_reaction(&self, symbol: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.reactions.push(symbol.into());
        next
    }

    /// Private flag with a recipient attached. A private flag without a
    /// recipient is a malformed record and counts as not private.
    pub fn is_addressed_privately(&self) -> bool {
        self.is_private && self.recipient_id.is_some()
    }

    /// Whether the record breaks the `is_private <-> recipient_id` pairing.
    pub fn has_recipient_mismatch(&self) -> bool {
        self.is_private != self.recipient_id.is_some()
    }
}

/// Target of a private message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    pub participant_id: String,
    pub display_name: String,
}

/// Who is looking at the chat, rebuilt for each render.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewerContext {
    pub viewer_id: String,
    /// Viewer is still waiting in the lobby for admission.
    pub is_knocking_in_lobby: bool,
}

impl ViewerContext {
    pub fn new(viewer_id: impl Into<String>) -> Self {
        Self {
            viewer_id: viewer_id.into(),
            is_knocking_in_lobby: false,
        }
    }

    pub fn knocking(mut self, knocking: bool) -> Self {
        self.is_knocking_in_lobby = knocking;
        self
    }
}

/// Display toggles supplied by the chat list, not derived from the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayPreferences {
    pub show_display_name: bool,
    pub show_timestamp: bool,
}

impl Default for DisplayPreferences {
    fn default() -> Self {
        Self {
            show_display_name: true,
            show_timestamp: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcript_json_uses_camel_case_and_defaults() {
        let json = r#"{
            "messageId": "m1",
            "senderId": "u2",
            "displayName": "Bob",
            "text": "hi",
            "timestamp": 1700000000000,
            "isPrivate": true,
            "recipientId": "u1"
        }"#;
        let message: ChatMessage = serde_json::from_str(json).unwrap();

        assert_eq!(message.kind, MessageKind::Regular);
        assert!(message.is_addressed_privately());
        assert!(!message.is_lobby_chat);
        assert!(message.reactions.is_empty());
    }

    #[test]
    fn with_reaction_leaves_original_untouched() {
        let original = ChatMessage::new("m1", "u1", "Ann", "hello", 0);
        let reacted = original.with_reaction("👍").with_reaction("🎉");

        assert!(original.reactions.is_empty());
        assert_eq!(reacted.reactions, vec!["👍", "🎉"]);
    }

    #[test]
    fn recipient_label_prefers_display_name() {
        let by_id = ChatMessage::new("m1", "u1", "Ann", "psst", 0).private_to("u2");
        assert_eq!(by_id.recipient_label(), Some("u2"));

        let by_name = by_id.with_recipient_name("Bob");
        assert_eq!(by_name.recipient_label(), Some("Bob"));
    }

    #[test]
    fn private_without_recipient_is_not_addressed() {
        let mut message = ChatMessage::new("m1", "u1", "Ann", "psst", 0);
        message.is_private = true;

        assert!(!message.is_addressed_privately());
        assert!(message.has_recipient_mismatch());
    }
}
