use chrono::{DateTime, FixedOffset, Local, Offset, Utc};

use crate::common::{ChatMessage, MessageKind};

use super::classify::Authorship;

const TIMESTAMP_FORMAT: &str = "%-H:%M";
const INVALID_TIMESTAMP: &str = "--:--";

pub trait TimestampFormatter {
    fn format(&self, message: &ChatMessage) -> String;
}

/// Wall-clock `H:mm` at a fixed UTC offset.
#[derive(Debug, Clone, Copy)]
pub struct ClockFormatter {
    offset: FixedOffset,
}

impl ClockFormatter {
    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    /// Offset of the machine's local zone right now.
    pub fn local() -> Self {
        Self {
            offset: Local::now().offset().fix(),
        }
    }

    pub fn with_offset_minutes(minutes: i32) -> Option<Self> {
        FixedOffset::east_opt(minutes.checked_mul(60)?).map(|offset| Self { offset })
    }
}

impl Default for ClockFormatter {
    fn default() -> Self {
        Self::utc()
    }
}

impl TimestampFormatter for ClockFormatter {
    fn format(&self, message: &ChatMessage) -> String {
        match DateTime::from_timestamp_millis(message.timestamp) {
            Some(at) => at
                .with_timezone(&self.offset)
                .format(TIMESTAMP_FORMAT)
                .to_string(),
            None => INVALID_TIMESTAMP.to_string(),
        }
    }
}

/// Builds the line shown under private and lobby messages.
pub trait NoticeBuilder {
    fn build_notice(&self, message: &ChatMessage, authorship: Authorship) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StandardNotices;

impl NoticeBuilder for StandardNotices {
    fn build_notice(&self, message: &ChatMessage, authorship: Authorship) -> String {
        match (message.recipient_label(), authorship) {
            (Some(recipient), Authorship::Local) if message.is_private => {
                format!("Private message to {recipient}")
            }
            (Some(_), Authorship::Remote) if message.is_private => {
                "Private message to you".to_string()
            }
            _ => "Lobby chat message".to_string(),
        }
    }
}

/// Text handed to the text renderer. Error messages are wrapped with the
/// delivery failure reason.
pub fn message_text(message: &ChatMessage) -> String {
    match message.kind {
        MessageKind::Error => {
            format!("Error: your message was not sent. Reason: {}", message.text)
        }
        MessageKind::Regular | MessageKind::Reaction => message.text.clone(),
    }
}

/// Screen-reader prefix for the body.
pub fn accessible_title(message: &ChatMessage, authorship: Authorship) -> String {
    match authorship {
        Authorship::Local => "me says:".to_string(),
        Authorship::Remote => format!("{} says:", message.display_name),
    }
}

/// Reaction symbols with their counts, in order of first appearance.
pub fn reaction_summary(reactions: &[String]) -> Vec<(&str, usize)> {
    let mut summary: Vec<(&str, usize)> = Vec::new();
    for symbol in reactions {
        match summary.iter_mut().find(|(seen, _)| *seen == symbol.as_str()) {
            Some((_, count)) => *count += 1,
            None => summary.push((symbol.as_str(), 1)),
        }
    }
    summary
}
