//! Markdown-subset parsing for vision responses.
//!
//! The remote model is instructed to answer with a small set of markup cues:
//! `### ` headings, `## ` subheadings, `- ` list items, triple-backtick code
//! fences and `**bold**` spans. This module turns such text into a sequence
//! of styled blocks, keeping the parsing free of any display concerns so it
//! can be exercised without a UI; `ui::rendering` translates the blocks into
//! display calls.
//!
//! Processing is line-oriented with one piece of cross-line state: whether
//! the parser is inside a fenced code block. Content buffered after an
//! unclosed fence is dropped, matching the behavior this tool has always had.

use regex::Regex;
use std::sync::LazyLock;

static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("bold pattern compiles"));

/// Block-level styling of a non-code line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Heading,
    Subheading,
    ListItem,
    Plain,
}

/// A run of text within a line, optionally bold on top of the line's style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub bold: bool,
}

impl Span {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            bold: false,
        }
    }

    fn bold(text: &str) -> Self {
        Self {
            text: text.to_string(),
            bold: true,
        }
    }
}

/// One parsed block of the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Lines accumulated between two fences, joined by newlines, verbatim.
    Code(String),
    /// A single source line with its block style and inline spans.
    Line { kind: LineKind, spans: Vec<Span> },
}

/// Parses response text into styled blocks.
///
/// Rules, in priority order per line:
/// 1. a trimmed line starting with ``` toggles code-block mode; the closing
///    fence emits everything accumulated since the opening one,
/// 2. inside code-block mode lines accumulate verbatim,
/// 3. `### ` starts a heading, `## ` a subheading, `- ` a list item,
/// 4. anything else is a plain line, kept untrimmed,
/// 5. outside code, `**…**` pairs become bold spans — leftmost-first,
///    non-overlapping; unmatched delimiters stay literal.
pub fn parse_markup(content: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut in_code_block = false;
    let mut code_lines: Vec<&str> = Vec::new();

    for line in content.lines() {
        let stripped = line.trim();

        if stripped.starts_with("```") {
            if in_code_block {
                blocks.push(Block::Code(code_lines.join("\n")));
                in_code_block = false;
            } else {
                in_code_block = true;
                code_lines = Vec::new();
            }
            continue;
        }

        if in_code_block {
            code_lines.push(line);
            continue;
        }

        let (kind, text) = if let Some(rest) = stripped.strip_prefix("### ") {
            (LineKind::Heading, rest.trim())
        } else if let Some(rest) = stripped.strip_prefix("## ") {
            (LineKind::Subheading, rest.trim())
        } else if stripped.starts_with("- ") {
            // The whole trimmed line, dash included
            (LineKind::ListItem, stripped)
        } else {
            // Plain lines keep their original indentation
            (LineKind::Plain, line)
        };

        blocks.push(Block::Line {
            kind,
            spans: split_bold(text),
        });
    }

    blocks
}

/// Splits a line into plain and bold spans around `**…**` pairs.
fn split_bold(line: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut last = 0;

    for caps in BOLD_RE.captures_iter(line) {
        if let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) {
            if whole.start() > last {
                spans.push(Span::plain(&line[last..whole.start()]));
            }
            spans.push(Span::bold(inner.as_str()));
            last = whole.end();
        }
    }

    if last < line.len() {
        spans.push(Span::plain(&line[last..]));
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_strips_marker_and_whitespace() {
        let blocks = parse_markup("###  Title ");
        assert_eq!(
            blocks,
            vec![Block::Line {
                kind: LineKind::Heading,
                spans: vec![Span::plain("Title")],
            }]
        );
    }

    #[test]
    fn subheading_is_distinct_from_heading() {
        let blocks = parse_markup("## Section");
        assert_eq!(
            blocks,
            vec![Block::Line {
                kind: LineKind::Subheading,
                spans: vec![Span::plain("Section")],
            }]
        );
    }

    #[test]
    fn list_item_keeps_dash() {
        let blocks = parse_markup("  - item one");
        assert_eq!(
            blocks,
            vec![Block::Line {
                kind: LineKind::ListItem,
                spans: vec![Span::plain("- item one")],
            }]
        );
    }

    #[test]
    fn plain_line_keeps_indentation() {
        let blocks = parse_markup("  indented text");
        assert_eq!(
            blocks,
            vec![Block::Line {
                kind: LineKind::Plain,
                spans: vec![Span::plain("  indented text")],
            }]
        );
    }

    #[test]
    fn bold_spans_compose_with_block_style() {
        let blocks = parse_markup("plain **bold** text");
        assert_eq!(
            blocks,
            vec![Block::Line {
                kind: LineKind::Plain,
                spans: vec![
                    Span::plain("plain "),
                    Span::bold("bold"),
                    Span::plain(" text"),
                ],
            }]
        );
    }

    #[test]
    fn unmatched_bold_delimiter_stays_literal() {
        let blocks = parse_markup("a **b and c");
        assert_eq!(
            blocks,
            vec![Block::Line {
                kind: LineKind::Plain,
                spans: vec![Span::plain("a **b and c")],
            }]
        );
    }

    #[test]
    fn bold_matching_is_leftmost_non_overlapping() {
        let blocks = parse_markup("**a** mid **b**");
        assert_eq!(
            blocks,
            vec![Block::Line {
                kind: LineKind::Plain,
                spans: vec![Span::bold("a"), Span::plain(" mid "), Span::bold("b")],
            }]
        );
    }

    #[test]
    fn code_fence_accumulates_verbatim() {
        let blocks = parse_markup("```\nlet x = 1;\n  indented\n```");
        assert_eq!(blocks, vec![Block::Code("let x = 1;\n  indented".into())]);
    }

    #[test]
    fn markup_inside_code_is_not_parsed() {
        let blocks = parse_markup("```\n### not a heading\n**not bold**\n```");
        assert_eq!(
            blocks,
            vec![Block::Code("### not a heading\n**not bold**".into())]
        );
    }

    #[test]
    fn full_response_scenario() {
        let input = "### Title\nplain **bold** text\n- item one\n- item **two**\n```\ncode line\n```";
        let blocks = parse_markup(input);
        assert_eq!(
            blocks,
            vec![
                Block::Line {
                    kind: LineKind::Heading,
                    spans: vec![Span::plain("Title")],
                },
                Block::Line {
                    kind: LineKind::Plain,
                    spans: vec![
                        Span::plain("plain "),
                        Span::bold("bold"),
                        Span::plain(" text"),
                    ],
                },
                Block::Line {
                    kind: LineKind::ListItem,
                    spans: vec![Span::plain("- item one")],
                },
                Block::Line {
                    kind: LineKind::ListItem,
                    spans: vec![Span::plain("- item "), Span::bold("two")],
                },
                Block::Code("code line".into()),
            ]
        );
    }

    #[test]
    fn unterminated_fence_swallows_content() {
        // Buffered lines are only flushed by a closing fence.
        let blocks = parse_markup("```\nabc");
        assert!(blocks.is_empty());
    }

    #[test]
    fn empty_line_yields_empty_spans() {
        let blocks = parse_markup("a\n\nb");
        assert_eq!(blocks.len(), 3);
        assert_eq!(
            blocks[1],
            Block::Line {
                kind: LineKind::Plain,
                spans: vec![],
            }
        );
    }
}
