//! Maps a message and its render flags to a view tree.

use crate::common::{ChatMessage, DisplayPreferences, MessageKind};

use super::classify::{Authorship, RenderFlags};
use super::format::{
    self, ClockFormatter, NoticeBuilder, StandardNotices, TimestampFormatter,
};
use super::text::{LinkifyRenderer, TextRenderer};
use super::view::{Control, Region, Variant, VariantSet, ViewNode};

/// Rendering capabilities the bubble delegates to.
pub struct Collaborators {
    pub text: Box<dyn TextRenderer + Send + Sync>,
    pub timestamps: Box<dyn TimestampFormatter + Send + Sync>,
    pub notices: Box<dyn NoticeBuilder + Send + Sync>,
}

impl Collaborators {
    pub fn new(
        text: impl TextRenderer + Send + Sync + 'static,
        timestamps: impl TimestampFormatter + Send + Sync + 'static,
        notices: impl NoticeBuilder + Send + Sync + 'static,
    ) -> Self {
        Self {
            text: Box::new(text),
            timestamps: Box::new(timestamps),
            notices: Box::new(notices),
        }
    }
}

impl Default for Collaborators {
    fn default() -> Self {
        Self::new(
            LinkifyRenderer::default(),
            ClockFormatter::default(),
            StandardNotices,
        )
    }
}

/// Styling labels for the bubble.
pub fn variants(message: &ChatMessage, flags: &RenderFlags) -> VariantSet {
    let mut set = VariantSet::new();
    set.insert(match flags.authorship {
        Authorship::Local => Variant::Local,
        Authorship::Remote => Variant::Remote,
    });
    match message.kind {
        MessageKind::Error => {
            set.insert(Variant::Error);
        }
        MessageKind::Reaction => {
            set.insert(Variant::Reaction);
        }
        MessageKind::Regular => {}
    }
    if message.is_private {
        set.insert(Variant::Private);
    }
    if flags.lobby_visible {
        set.insert(Variant::Lobby);
    }
    set
}

pub fn present(
    message: &ChatMessage,
    flags: &RenderFlags,
    prefs: DisplayPreferences,
    collaborators: &Collaborators,
) -> ViewNode {
    let mut children = Vec::with_capacity(4);

    if flags.kebab_self_visible() {
        children.push(ViewNode::region(
            Region::SelfOptions,
            vec![ViewNode::control(Control::OptionsMenu(Authorship::Local))],
        ));
    }

    children.push(bubble(message, flags, prefs, collaborators));

    if flags.has_remote_controls() {
        let mut controls = Vec::with_capacity(2);
        if flags.can_react() {
            controls.push(ViewNode::control(Control::ReactionTrigger));
        }
        if flags.kebab_other_visible() {
            controls.push(ViewNode::control(Control::OptionsMenu(Authorship::Remote)));
        }
        children.push(ViewNode::region(Region::Controls, controls));
    }

    if prefs.show_timestamp {
        children.push(ViewNode::region(
            Region::Timestamp,
            vec![ViewNode::text(collaborators.timestamps.format(message))],
        ));
    }

    ViewNode::Message {
        id: message.message_id.clone(),
        children,
    }
}

fn bubble(
    message: &ChatMessage,
    flags: &RenderFlags,
    prefs: DisplayPreferences,
    collaborators: &Collaborators,
) -> ViewNode {
    let mut content = Vec::new();

    if prefs.show_display_name {
        content.push(ViewNode::region(
            Region::DisplayName,
            vec![ViewNode::text(message.display_name.clone())],
        ));
    }

    content.push(ViewNode::region(
        Region::Body,
        vec![
            ViewNode::region(
                Region::AccessibleTitle,
                vec![ViewNode::text(format::accessible_title(
                    message,
                    flags.authorship,
                ))],
            ),
            collaborators.text.render(&format::message_text(message)),
        ],
    ));

    if flags.show_private_notice {
        content.push(ViewNode::region(
            Region::Notice,
            vec![ViewNode::text(
                collaborators
                    .notices
                    .build_notice(message, flags.authorship),
            )],
        ));
    }

    let summary = format::reaction_summary(&message.reactions);
    if !summary.is_empty() {
        content.push(ViewNode::region(
            Region::Reactions,
            summary
                .into_iter()
                .map(|(symbol, count)| ViewNode::text(format!("{symbol} {count}")))
                .collect(),
        ));
    }

    let mut children = vec![ViewNode::region(Region::Content, content)];
    if flags.can_reply {
        children.push(ViewNode::control(Control::Reply));
    }

    ViewNode::Bubble {
        variants: variants(message, flags),
        children,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::classify::{NoReplies, RoomState, classify};
    use crate::common::ViewerContext;

    fn collaborators() -> Collaborators {
        Collaborators::new(LinkifyRenderer::default(), ClockFormatter::utc(), StandardNotices)
    }

    fn top_level(node: &ViewNode) -> Vec<String> {
        node.children()
            .iter()
            .map(|child| match child {
                ViewNode::Region { region, .. } => region.as_str().to_string(),
                ViewNode::Bubble { .. } => "bubble".to_string(),
                other => format!("{other:?}"),
            })
            .collect()
    }

    #[test]
    fn own_message_mounts_self_options_first() {
        let msg = ChatMessage::new("m1", "u1", "Ann", "hi", 0);
        let flags = classify(&msg, &ViewerContext::new("u1"), &NoReplies);
        let node = present(&msg, &flags, DisplayPreferences::default(), &collaborators());

        assert_eq!(top_level(&node), vec!["self-options", "bubble", "timestamp"]);
        assert_eq!(node.controls(), vec![Control::OptionsMenu(Authorship::Local)]);
    }

    #[test]
    fn remote_message_mounts_controls_after_bubble() {
        let msg = ChatMessage::new("m1", "u2", "Bob", "hi", 0);
        let flags = classify(&msg, &ViewerContext::new("u1"), &NoReplies);
        let node = present(&msg, &flags, DisplayPreferences::default(), &collaborators());

        assert_eq!(top_level(&node), vec!["bubble", "controls", "timestamp"]);
        assert_eq!(
            node.controls(),
            vec![Control::ReactionTrigger, Control::OptionsMenu(Authorship::Remote)]
        );
    }

    #[test]
    fn preferences_hide_name_and_timestamp() {
        let msg = ChatMessage::new("m1", "u2", "Bob", "hi", 0);
        let flags = classify(&msg, &ViewerContext::new("u1"), &NoReplies);
        let prefs = DisplayPreferences {
            show_display_name: false,
            show_timestamp: false,
        };
        let node = present(&msg, &flags, prefs, &collaborators());

        assert!(node.find_region(Region::DisplayName).is_none());
        assert!(node.find_region(Region::Timestamp).is_none());
        assert!(node.find_region(Region::Body).is_some());
    }

    #[test]
    fn notice_follows_flag() {
        let msg = ChatMessage::new("m1", "u2", "Bob", "hi", 0).lobby();
        let knocking = ViewerContext::new("u1").knocking(true);
        let admitted = ViewerContext::new("u1");
        let prefs = DisplayPreferences::default();

        let hidden = present(&msg, &classify(&msg, &knocking, &NoReplies), prefs, &collaborators());
        let shown = present(&msg, &classify(&msg, &admitted, &NoReplies), prefs, &collaborators());

        assert!(hidden.find_region(Region::Notice).is_none());
        assert!(shown.find_region(Region::Notice).is_some());
    }

    #[test]
    fn reply_control_needs_policy_consent() {
        let msg = ChatMessage::new("m1", "u2", "Bob", "hi", 0).private_to("u1");
        let viewer = ViewerContext::new("u1");
        let prefs = DisplayPreferences::default();

        let room = RoomState::with_participants(["u1", "u2"]);
        let with_reply = present(&msg, &classify(&msg, &viewer, &room), prefs, &collaborators());
        let without = present(&msg, &classify(&msg, &viewer, &NoReplies), prefs, &collaborators());

        assert!(with_reply.controls().contains(&Control::Reply));
        assert!(!without.controls().contains(&Control::Reply));
    }

    #[test]
    fn variants_are_deterministic() {
        let msg = ChatMessage::new("m1", "u1", "Ann", "boom", 0)
            .with_kind(MessageKind::Error)
            .private_to("u2");
        let flags = classify(&msg, &ViewerContext::new("u1"), &NoReplies);

        assert_eq!(
            variants(&msg, &flags),
            VariantSet::from([Variant::Local, Variant::Error, Variant::Private])
        );
        assert_eq!(variants(&msg, &flags), variants(&msg, &flags));
    }

    #[test]
    fn reactions_region_only_when_reacted() {
        let msg = ChatMessage::new("m1", "u2", "Bob", "hi", 0);
        let viewer = ViewerContext::new("u1");
        let prefs = DisplayPreferences::default();

        let bare = present(&msg, &classify(&msg, &viewer, &NoReplies), prefs, &collaborators());
        assert!(bare.find_region(Region::Reactions).is_none());

        let reacted = msg.with_reaction("👍").with_reaction("👍");
        let node = present(&reacted, &classify(&reacted, &viewer, &NoReplies), prefs, &collaborators());
        let region = node.find_region(Region::Reactions).unwrap();
        assert_eq!(region.children(), &[ViewNode::text("👍 2")]);
    }
}
