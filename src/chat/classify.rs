//! Render-flag derivation for a single chat message.
//!
//! Everything here is a pure function of its arguments so it can be called on
//! every frame without caching.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::common::{ChatMessage, ViewerContext};

/// Relationship between a message and the participant viewing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Authorship {
    /// The viewer sent the message.
    Local,
    Remote,
}

impl Authorship {
    pub fn of(message: &ChatMessage, viewer: &ViewerContext) -> Self {
        if message.sender_id == viewer.viewer_id {
            Self::Local
        } else {
            Self::Remote
        }
    }

    pub fn is_local(self) -> bool {
        self == Self::Local
    }
}

/// Decides whether the viewer may answer a message privately. Backed by room
/// state owned outside the classification layer.
pub trait ReplyPolicy {
    fn can_reply(&self, message: &ChatMessage, viewer: &ViewerContext) -> bool;
}

/// Policy that never offers a reply.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoReplies;

impl ReplyPolicy for NoReplies {
    fn can_reply(&self, _message: &ChatMessage, _viewer: &ViewerContext) -> bool {
        false
    }
}

/// Participants currently in the conference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomState {
    participants: BTreeSet<String>,
}

impl RoomState {
    pub fn with_participants<I, S>(participants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            participants: participants.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns `true` if the participant was not present before.
    pub fn join(&mut self, participant_id: impl Into<String>) -> bool {
        self.participants.insert(participant_id.into())
    }

    /// Returns `true` if the participant was present.
    pub fn leave(&mut self, participant_id: &str) -> bool {
        self.participants.remove(participant_id)
    }

    pub fn contains(&self, participant_id: &str) -> bool {
        self.participants.contains(participant_id)
    }

    pub fn participants(&self) -> impl Iterator<Item = &str> {
        self.participants.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}

impl ReplyPolicy for RoomState {
    /// Replies go to someone else who is still in the room, and only on
    /// conversations that are already private or lobby-scoped for this viewer.
    fn can_reply(&self, message: &ChatMessage, viewer: &ViewerContext) -> bool {
        self.contains(&message.sender_id)
            && !Authorship::of(message, viewer).is_local()
            && show_private_notice(message, viewer)
    }
}

pub fn can_react(message: &ChatMessage, viewer: &ViewerContext) -> bool {
    message.sender_id != viewer.viewer_id
}

pub fn is_self_options_visible(message: &ChatMessage, viewer: &ViewerContext) -> bool {
    message.sender_id == viewer.viewer_id
}

pub fn is_other_options_visible(message: &ChatMessage, viewer: &ViewerContext) -> bool {
    message.sender_id != viewer.viewer_id
}

/// Private messages always carry a notice. Lobby messages carry one only once
/// the viewer has stopped knocking.
pub fn show_private_notice(message: &ChatMessage, viewer: &ViewerContext) -> bool {
    message.is_addressed_privately() || (message.is_lobby_chat && !viewer.is_knocking_in_lobby)
}

/// Every flag the presentation layer needs for one message.
///
/// The self/other affordances hang off a single [`Authorship`], so a
/// combination with both (or neither) option menus cannot be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RenderFlags {
    pub authorship: Authorship,
    pub can_reply: bool,
    pub show_private_notice: bool,
    /// Lobby styling uses the same knocking gate as the notice.
    pub lobby_visible: bool,
}

impl RenderFlags {
    pub fn can_react(&self) -> bool {
        !self.authorship.is_local()
    }

    pub fn kebab_self_visible(&self) -> bool {
        self.authorship.is_local()
    }

    pub fn kebab_other_visible(&self) -> bool {
        !self.authorship.is_local()
    }

    /// Reaction trigger or the other-options menu has something to show.
    pub fn has_remote_controls(&self) -> bool {
        self.can_react() || self.kebab_other_visible()
    }
}

pub fn classify(
    message: &ChatMessage,
    viewer: &ViewerContext,
    policy: &dyn ReplyPolicy,
) -> RenderFlags {
    RenderFlags {
        authorship: Authorship::of(message, viewer),
        can_reply: policy.can_reply(message, viewer),
        show_private_notice: show_private_notice(message, viewer),
        lobby_visible: message.is_lobby_chat && !viewer.is_knocking_in_lobby,
    }
}
