use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::common::{ChatMessage, StoreEvent};

#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("failed to read transcript {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse transcript {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// One recorded happening in the conference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TranscriptEntry {
    Message(ChatMessage),
    #[serde(rename_all = "camelCase")]
    Reaction {
        message_id: String,
        symbol: String,
    },
    #[serde(rename_all = "camelCase")]
    ParticipantJoined {
        participant_id: String,
    },
    #[serde(rename_all = "camelCase")]
    ParticipantLeft {
        participant_id: String,
    },
    Admitted,
    Knocking,
}

impl From<TranscriptEntry> for StoreEvent {
    fn from(entry: TranscriptEntry) -> Self {
        match entry {
            TranscriptEntry::Message(message) => StoreEvent::MessageReceived(message),
            TranscriptEntry::Reaction { message_id, symbol } => {
                StoreEvent::ReactionAdded { message_id, symbol }
            }
            TranscriptEntry::ParticipantJoined { participant_id } => {
                StoreEvent::ParticipantJoined(participant_id)
            }
            TranscriptEntry::ParticipantLeft { participant_id } => {
                StoreEvent::ParticipantLeft(participant_id)
            }
            TranscriptEntry::Admitted => StoreEvent::LobbyAdmitted,
            TranscriptEntry::Knocking => StoreEvent::KnockingChanged(true),
        }
    }
}

pub fn parse_transcript(content: &str) -> Result<Vec<TranscriptEntry>, serde_json::Error> {
    let entries: Vec<TranscriptEntry> = serde_json::from_str(content)?;
    for entry in &entries {
        if let TranscriptEntry::Message(message) = entry {
            if message.has_recipient_mismatch() {
                log::warn!(
                    "Transcript message {} mismatches isPrivate/recipientId",
                    message.message_id
                );
            }
        }
    }
    Ok(entries)
}

pub fn load_transcript(path: impl AsRef<Path>) -> Result<Vec<TranscriptEntry>, TranscriptError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| TranscriptError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let entries = parse_transcript(&content).map_err(|source| TranscriptError::Parse {
        path: path.display().to_string(),
        source,
    })?;
    log::info!("Loaded {} transcript entries from {}", entries.len(), path.display());
    Ok(entries)
}
