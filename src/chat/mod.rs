//! Chat message bubble model: classification, presentation and the
//! collaborators they delegate to.

pub mod classify;
pub mod format;
pub mod present;
pub mod text;
pub mod view;

pub use classify::{Authorship, NoReplies, RenderFlags, ReplyPolicy, RoomState, classify};
pub use format::{ClockFormatter, NoticeBuilder, StandardNotices, TimestampFormatter};
pub use present::{Collaborators, present};
pub use text::{LinkifyRenderer, PlainRenderer, TextRenderer};
pub use view::{Control, Region, Span, Variant, VariantSet, ViewNode};

use crate::common::{ChatMessage, DisplayPreferences, ViewerContext};

/// Classify then present one message.
pub fn render_message(
    message: &ChatMessage,
    viewer: &ViewerContext,
    policy: &dyn ReplyPolicy,
    prefs: DisplayPreferences,
    collaborators: &Collaborators,
) -> ViewNode {
    let flags = classify(message, viewer, policy);
    present(message, &flags, prefs, collaborators)
}
