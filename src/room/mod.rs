pub mod client;
pub mod transcript;

pub use client::{LocalIdentity, RoomClient};
pub use transcript::{TranscriptEntry, TranscriptError, load_transcript, parse_transcript};
