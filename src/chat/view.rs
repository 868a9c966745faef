use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use super::classify::Authorship;

/// Styling variant attached to a bubble. Declaration order is outline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    Local,
    Remote,
    Error,
    Reaction,
    Private,
    Lobby,
}

impl Variant {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Remote => "remote",
            Self::Error => "error",
            Self::Reaction => "reaction",
            Self::Private => "private",
            Self::Lobby => "lobby",
        }
    }
}

pub type VariantSet = BTreeSet<Variant>;

/// Structural slots of a rendered message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    SelfOptions,
    Content,
    DisplayName,
    Body,
    AccessibleTitle,
    Notice,
    Reactions,
    Controls,
    Timestamp,
}

impl Region {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SelfOptions => "self-options",
            Self::Content => "content",
            Self::DisplayName => "display-name",
            Self::Body => "body",
            Self::AccessibleTitle => "accessible-title",
            Self::Notice => "notice",
            Self::Reactions => "reactions",
            Self::Controls => "controls",
            Self::Timestamp => "timestamp",
        }
    }
}

/// Interactive controls mounted by the bubble. Their internals belong to the
/// host UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "control", content = "scope", rename_all = "snake_case")]
pub enum Control {
    ReactionTrigger,
    OptionsMenu(Authorship),
    Reply,
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReactionTrigger => f.write_str("reaction-trigger"),
            Self::OptionsMenu(Authorship::Local) => f.write_str("options-menu(own)"),
            Self::OptionsMenu(Authorship::Remote) => f.write_str("options-menu(others)"),
            Self::Reply => f.write_str("reply"),
        }
    }
}

/// Inline piece of rendered message text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "span", rename_all = "snake_case")]
pub enum Span {
    Text { text: String },
    Link { label: String, url: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum ViewNode {
    Message {
        id: String,
        children: Vec<ViewNode>,
    },
    Bubble {
        variants: VariantSet,
        children: Vec<ViewNode>,
    },
    Region {
        region: Region,
        children: Vec<ViewNode>,
    },
    Text {
        text: String,
    },
    Rich {
        spans: Vec<Span>,
    },
    Control {
        control: Control,
    },
}

impl ViewNode {
    pub fn region(region: Region, children: Vec<ViewNode>) -> Self {
        Self::Region { region, children }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn control(control: Control) -> Self {
        Self::Control { control }
    }

    pub fn children(&self) -> &[ViewNode] {
        match self {
            Self::Message { children, .. }
            | Self::Bubble { children, .. }
            | Self::Region { children, .. } => children,
            Self::Text { .. } | Self::Rich { .. } | Self::Control { .. } => &[],
        }
    }

    /// Depth-first search for the first region of the given kind.
    pub fn find_region(&self, wanted: Region) -> Option<&ViewNode> {
        if let Self::Region { region, .. } = self {
            if *region == wanted {
                return Some(self);
            }
        }
        self.children()
            .iter()
            .find_map(|child| child.find_region(wanted))
    }

    /// All controls in document order.
    pub fn controls(&self) -> Vec<Control> {
        let mut found = Vec::new();
        self.collect_controls(&mut found);
        found
    }

    fn collect_controls(&self, found: &mut Vec<Control>) {
        if let Self::Control { control } = self {
            found.push(*control);
        }
        for child in self.children() {
            child.collect_controls(found);
        }
    }

    fn write_outline(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        match self {
            Self::Message { id, .. } => writeln!(f, "{indent}message {id}")?,
            Self::Bubble { variants, .. } => {
                if variants.is_empty() {
                    writeln!(f, "{indent}bubble")?;
                } else {
                    let labels: Vec<&str> = variants.iter().map(|v| v.as_str()).collect();
                    writeln!(f, "{indent}bubble [{}]", labels.join(" "))?;
                }
            }
            Self::Region { region, .. } => writeln!(f, "{indent}{}", region.as_str())?,
            Self::Text { text } => writeln!(f, "{indent}{text:?}")?,
            Self::Rich { spans } => {
                writeln!(f, "{indent}rich")?;
                for span in spans {
                    match span {
                        Span::Text { text } => writeln!(f, "{indent}  text {text:?}")?,
                        Span::Link { label, url } => {
                            writeln!(f, "{indent}  link {label:?} -> {url}")?;
                        }
                    }
                }
            }
            Self::Control { control } => writeln!(f, "{indent}control {control}")?,
        }
        for child in self.children() {
            child.write_outline(f, depth + 1)?;
        }
        Ok(())
    }
}

/// Indented outline, one node per line.
impl fmt::Display for ViewNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_outline(f, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outline_indents_children() {
        let node = ViewNode::Message {
            id: "m1".into(),
            children: vec![
                ViewNode::region(Region::Timestamp, vec![ViewNode::text("9:05")]),
                ViewNode::control(Control::OptionsMenu(Authorship::Remote)),
            ],
        };

        assert_eq!(
            node.to_string(),
            "message m1\n  timestamp\n    \"9:05\"\n  control options-menu(others)\n"
        );
    }

    #[test]
    fn find_region_searches_depth_first() {
        let node = ViewNode::Bubble {
            variants: VariantSet::from([Variant::Private, Variant::Local]),
            children: vec![ViewNode::region(
                Region::Content,
                vec![ViewNode::region(Region::Notice, vec![ViewNode::text("n")])],
            )],
        };

        assert!(node.find_region(Region::Notice).is_some());
        assert!(node.find_region(Region::Timestamp).is_none());
        assert!(node.to_string().starts_with("bubble [local private]"));
    }
}
