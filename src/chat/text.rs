use std::sync::LazyLock;

use regex::Regex;

use super::view::{Span, ViewNode};

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:https?://|www\.)[^\s<>]+").expect("URL pattern is valid")
});

/// Punctuation that ends a sentence rather than a link.
const TRAILING_PUNCTUATION: &[char] = &['.', ',', '!', '?', ';', ':', ')', '"', '\''];

const EMOTICONS: &[(&str, &str)] = &[
    (":)", "🙂"),
    (":-)", "🙂"),
    (":(", "🙁"),
    (":D", "😄"),
    (";)", "😉"),
    (":P", "😛"),
    ("<3", "❤️"),
];

/// Turns raw message text into display content.
pub trait TextRenderer {
    fn render(&self, text: &str) -> ViewNode;
}

/// Renders text verbatim as one span.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainRenderer;

impl TextRenderer for PlainRenderer {
    fn render(&self, text: &str) -> ViewNode {
        ViewNode::Rich {
            spans: vec![Span::Text {
                text: text.to_string(),
            }],
        }
    }
}

/// Detects links and swaps standalone emoticons for emoji.
#[derive(Debug, Clone, Copy)]
pub struct LinkifyRenderer {
    pub emoticons: bool,
}

impl Default for LinkifyRenderer {
    fn default() -> Self {
        Self { emoticons: true }
    }
}

impl TextRenderer for LinkifyRenderer {
    fn render(&self, text: &str) -> ViewNode {
        let mut spans = Vec::new();
        let mut cursor = 0;

        for found in URL_PATTERN.find_iter(text) {
            let raw = found.as_str().trim_end_matches(TRAILING_PUNCTUATION);
            if raw.is_empty() {
                continue;
            }
            let start = found.start();
            let end = start + raw.len();

            self.push_text(&mut spans, &text[cursor..start]);
            let url = if raw.to_ascii_lowercase().starts_with("www.") {
                format!("https://{raw}")
            } else {
                raw.to_string()
            };
            spans.push(Span::Link {
                label: raw.to_string(),
                url,
            });
            cursor = end;
        }
        self.push_text(&mut spans, &text[cursor..]);

        ViewNode::Rich { spans }
    }
}

impl LinkifyRenderer {
    fn push_text(&self, spans: &mut Vec<Span>, segment: &str) {
        if segment.is_empty() {
            return;
        }
        let segment = if self.emoticons {
            replace_emoticons(segment)
        } else {
            segment.to_string()
        };
        // Keep neighbouring text in a single span.
        if let Some(Span::Text { text }) = spans.last_mut() {
            text.push_str(&segment);
        } else {
            spans.push(Span::Text { text: segment });
        }
    }
}

/// Replaces whitespace-delimited emoticons, leaving the whitespace intact.
fn replace_emoticons(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for piece in segment.split_inclusive(char::is_whitespace) {
        let word = piece.trim_end_matches(char::is_whitespace);
        let tail = &piece[word.len()..];
        match EMOTICONS.iter().find(|(emoticon, _)| *emoticon == word) {
            Some((_, emoji)) => out.push_str(emoji),
            None => out.push_str(word),
        }
        out.push_str(tail);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(node: ViewNode) -> Vec<Span> {
        match node {
            ViewNode::Rich { spans } => spans,
            other => panic!("expected rich node, got {other:?}"),
        }
    }

    fn text(value: &str) -> Span {
        Span::Text {
            text: value.to_string(),
        }
    }

    #[test]
    fn plain_text_is_one_span() {
        let rendered = spans(LinkifyRenderer::default().render("just words"));
        assert_eq!(rendered, vec![text("just words")]);
    }

    #[test]
    fn links_are_split_out_without_trailing_punctuation() {
        let rendered = spans(LinkifyRenderer::default().render("see https://meet.example.org/room, ok"));

        assert_eq!(
            rendered,
            vec![
                text("see "),
                Span::Link {
                    label: "https://meet.example.org/room".into(),
                    url: "https://meet.example.org/room".into(),
                },
                text(", ok"),
            ]
        );
    }

    #[test]
    fn www_links_get_a_scheme() {
        let rendered = spans(LinkifyRenderer::default().render("www.example.com"));

        assert_eq!(
            rendered,
            vec![Span::Link {
                label: "www.example.com".into(),
                url: "https://www.example.com".into(),
            }]
        );
    }

    #[test]
    fn standalone_emoticons_become_emoji() {
        let rendered = spans(LinkifyRenderer::default().render("hi :) <3\nbye:)"));
        assert_eq!(rendered, vec![text("hi 🙂 ❤️\nbye:)")]);
    }

    #[test]
    fn emoticons_can_be_disabled() {
        let renderer = LinkifyRenderer { emoticons: false };
        assert_eq!(spans(renderer.render(":D")), vec![text(":D")]);
    }

    #[test]
    fn plain_renderer_keeps_urls_as_text() {
        assert_eq!(
            spans(PlainRenderer.render("https://example.com")),
            vec![text("https://example.com")]
        );
    }
}
