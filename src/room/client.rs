use std::collections::VecDeque;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::common::{ChatCommand, ChatMessage, Recipient, StoreEvent};

use super::transcript::TranscriptEntry;

/// Identity the client posts local messages as.
#[derive(Debug, Clone)]
pub struct LocalIdentity {
    pub participant_id: String,
    pub display_name: String,
}

/// Stands in for the conference: replays a recorded transcript and echoes
/// whatever the UI sends.
pub struct RoomClient {
    event_sender: mpsc::Sender<StoreEvent>,
    command_receiver: mpsc::Receiver<ChatCommand>,
    identity: LocalIdentity,
    pending: VecDeque<TranscriptEntry>,
    replay_interval: Duration,
}

impl RoomClient {
    pub fn new(
        event_sender: mpsc::Sender<StoreEvent>,
        command_receiver: mpsc::Receiver<ChatCommand>,
        identity: LocalIdentity,
        transcript: Vec<TranscriptEntry>,
        replay_interval: Duration,
    ) -> Self {
        Self {
            event_sender,
            command_receiver,
            identity,
            pending: transcript.into(),
            replay_interval,
        }
    }

    /// Runs until the command channel closes or the UI stops listening.
    pub async fn run(mut self) {
        log::info!(
            "Room client started as {} with {} transcript entries",
            self.identity.participant_id,
            self.pending.len()
        );
        let mut ticker = tokio::time::interval(self.replay_interval.max(Duration::from_millis(1)));

        loop {
            tokio::select! {
                command = self.command_receiver.recv() => {
                    match command {
                        Some(command) => {
                            if !self.handle_command(command).await {
                                break;
                            }
                        }
                        None => break,
                    }
                }
                _ = ticker.tick(), if !self.pending.is_empty() => {
                    if let Some(entry) = self.pending.pop_front() {
                        if !self.emit(entry.into()).await {
                            break;
                        }
                        if self.pending.is_empty() {
                            log::info!("Transcript replay finished");
                        }
                    }
                }
            }
        }

        log::info!("Room client stopped");
    }

    async fn handle_command(&mut self, command: ChatCommand) -> bool {
        match command {
            ChatCommand::SendMessage { text, recipient } => {
                let message = self.local_message(text, recipient);
                log::debug!("Echoing local message {}", message.message_id);
                self.emit(StoreEvent::MessageReceived(message)).await
            }
            ChatCommand::React { message_id, symbol } => {
                self.emit(StoreEvent::ReactionAdded { message_id, symbol })
                    .await
            }
        }
    }

    fn local_message(&self, text: String, recipient: Option<Recipient>) -> ChatMessage {
        let message = ChatMessage::new(
            Uuid::new_v4().to_string(),
            self.identity.participant_id.clone(),
            self.identity.display_name.clone(),
            text,
            Utc::now().timestamp_millis(),
        );
        match recipient {
            Some(recipient) => message
                .private_to(recipient.participant_id)
                .with_recipient_name(recipient.display_name),
            None => message,
        }
    }

    async fn emit(&self, event: StoreEvent) -> bool {
        match self.event_sender.send(event).await {
            Ok(()) => true,
            Err(err) => {
                log::warn!("UI stopped receiving store events: {err}");
                false
            }
        }
    }
}
