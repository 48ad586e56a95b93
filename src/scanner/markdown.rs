//! MarkdownLinks - markdown-style link extraction
//!
//! Two literal syntaxes are recognised, in this order:
//! - `@[label](payload)` - recovered as a **UserHandle** range (legacy typing)
//! - `[label](payload)`  - recovered as an **Action** range, unless an
//!   earlier recovered range already carried the same payload
//!
//! Both are rewritten to just `label` in the display text. Range recovery
//! scans the raw text for each syntax, so a `[..](..)` that only forms once
//! an `@[..](..)` is rewritten is not recovered. Unbalanced brackets/parens
//! simply don't match and pass through unchanged.

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::sync::LazyLock;

use crate::text::{LinkRange, LinkType, TextRange, Utf16Index};

// ==================== PATTERNS ====================

/// `@[label](payload)` - Group 1: label, Group 2: payload
static MENTION_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@\[([^\]]+)\]\(([^)]+)\)").expect("mention link pattern is valid")
});

/// `[label](payload)` - Group 1: label, Group 2: payload
static ACTION_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("action link pattern is valid")
});

// ==================== TYPE DEFINITIONS ====================

/// How recovered labels are positioned in the display text
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LabelOffsets {
    /// Positions recorded while rewriting; duplicate labels land where they belong
    #[default]
    Exact,
    /// `display.find(label)`: duplicate labels all resolve to the first occurrence
    FirstOccurrence,
}

/// Which syntax a markdown span was written in
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkdownSyntax {
    /// `@[label](payload)`
    Mention,
    /// `[label](payload)`
    Link,
}

/// One rewritten markdown link
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkdownSpan {
    pub syntax: MarkdownSyntax,
    pub label: String,
    pub payload: String,
    /// Byte span of the label in the display text. `None` when a later
    /// rewrite swallowed the label into another link's payload.
    pub display_bytes: Option<Range<usize>>,
}

/// Result of rewriting raw text into display text
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MarkdownRewrite {
    pub display: String,
    pub spans: Vec<MarkdownSpan>,
}

/// A pass-2 replacement, kept to map pass-1 positions through it
struct Replacement {
    /// Whole match in the intermediate text
    matched: Range<usize>,
    /// Label inside the match, in the intermediate text
    label: Range<usize>,
    /// Where the label starts in the display text
    display_start: usize,
}

// ==================== REWRITE ====================

/// Strip markdown link delimiters, keeping only the labels
pub fn strip_markdown(raw: &str) -> String {
    rewrite(raw).display
}

/// Rewrite raw text into display text, recording where every label lands
pub fn rewrite(raw: &str) -> MarkdownRewrite {
    // Pass 1: @[label](payload) -> label
    let mut intermediate = String::with_capacity(raw.len());
    let mut mention_spans: Vec<(Range<usize>, String, String)> = Vec::new();
    let mut last = 0;
    for cap in MENTION_LINK_RE.captures_iter(raw) {
        let Some((full, label, payload)) = split_captures(&cap) else {
            continue;
        };
        intermediate.push_str(&raw[last..full.start]);
        let label_start = intermediate.len();
        intermediate.push_str(label);
        mention_spans.push((label_start..intermediate.len(), label.to_string(), payload.to_string()));
        last = full.end;
    }
    intermediate.push_str(&raw[last..]);

    // Pass 2: [label](payload) -> label, over the pass-1 output
    let mut display = String::with_capacity(intermediate.len());
    let mut replacements = Vec::new();
    let mut link_spans = Vec::new();
    let mut last = 0;
    for cap in ACTION_LINK_RE.captures_iter(&intermediate) {
        let Some((full, label, payload)) = split_captures(&cap) else {
            continue;
        };
        let label_bytes = cap.get(1).map(|m| m.range()).unwrap_or(full.start..full.start);
        display.push_str(&intermediate[last..full.start]);
        let display_start = display.len();
        display.push_str(label);
        link_spans.push(MarkdownSpan {
            syntax: MarkdownSyntax::Link,
            label: label.to_string(),
            payload: payload.to_string(),
            display_bytes: Some(display_start..display.len()),
        });
        replacements.push(Replacement {
            matched: full.clone(),
            label: label_bytes,
            display_start,
        });
        last = full.end;
    }
    display.push_str(&intermediate[last..]);

    let mut spans: Vec<MarkdownSpan> = mention_spans
        .into_iter()
        .map(|(bytes, label, payload)| MarkdownSpan {
            syntax: MarkdownSyntax::Mention,
            display_bytes: map_through(&replacements, bytes),
            label,
            payload,
        })
        .collect();
    spans.extend(link_spans);

    MarkdownRewrite { display, spans }
}

fn split_captures<'t>(cap: &Captures<'t>) -> Option<(Range<usize>, &'t str, &'t str)> {
    let full = cap.get(0)?;
    let label = cap.get(1)?;
    let payload = cap.get(2)?;
    Some((full.range(), label.as_str(), payload.as_str()))
}

/// Map an intermediate-text span through the pass-2 replacements
fn map_through(replacements: &[Replacement], span: Range<usize>) -> Option<Range<usize>> {
    let mut removed = 0;
    for rep in replacements {
        if rep.matched.end <= span.start {
            // Entire replacement precedes the span: delimiters + payload vanish
            removed += (rep.matched.end - rep.matched.start) - (rep.label.end - rep.label.start);
            continue;
        }
        if rep.matched.start >= span.end {
            break;
        }
        // Overlap: only survives if wholly inside the replacement's label
        if span.start >= rep.label.start && span.end <= rep.label.end {
            let start = rep.display_start + (span.start - rep.label.start);
            return Some(start..start + (span.end - span.start));
        }
        return None;
    }
    Some(span.start - removed..span.end - removed)
}

// ==================== RANGE RECOVERY ====================

/// Recover link ranges for markdown links in `raw`, positioned over `display`
///
/// `@[..](..)` links come first (typed UserHandle), followed by `[..](..)`
/// links (typed Action) whose payload was not already recovered.
pub fn extract_links(raw: &str, display: &str, offsets: LabelOffsets) -> Vec<LinkRange> {
    let index = Utf16Index::new(display);
    if offsets == LabelOffsets::Exact {
        let rewritten = rewrite(raw);
        if rewritten.display == display {
            return extract_exact(raw, &rewritten, &index);
        }
        // Display text was not derived from this raw text; positions would lie
    }
    extract_first_occurrence(raw, display, &index)
}

/// [`extract_links`] over an existing rewrite of `raw`
///
/// `index` must index `rewritten.display`.
pub fn extract_rewritten(
    raw: &str,
    rewritten: &MarkdownRewrite,
    index: &Utf16Index,
    offsets: LabelOffsets,
) -> Vec<LinkRange> {
    match offsets {
        LabelOffsets::Exact => extract_exact(raw, rewritten, index),
        LabelOffsets::FirstOccurrence => extract_first_occurrence(raw, &rewritten.display, index),
    }
}

fn extract_exact(raw: &str, rewritten: &MarkdownRewrite, index: &Utf16Index) -> Vec<LinkRange> {
    let mut ranges: Vec<LinkRange> = Vec::new();
    for span in rewritten.spans.iter().filter(|s| s.syntax == MarkdownSyntax::Mention) {
        if let Some(range) = span.display_bytes.clone().and_then(|b| index.range_from_bytes(b)) {
            ranges.push(LinkRange::new(LinkType::UserHandle, range, span.payload.clone()));
        }
    }

    // Rewritten `[..](..)` spans, consumed in order as raw matches claim them
    let mut placed: Vec<&MarkdownSpan> = rewritten
        .spans
        .iter()
        .filter(|s| s.syntax == MarkdownSyntax::Link)
        .collect();

    for cap in ACTION_LINK_RE.captures_iter(raw) {
        let Some((_, label, payload)) = split_captures(&cap) else {
            continue;
        };
        if is_recovered(&ranges, payload) {
            continue;
        }
        let exact = placed
            .iter()
            .position(|s| s.label == label && s.payload == payload)
            .map(|i| placed.remove(i))
            .and_then(|s| s.display_bytes.clone())
            .and_then(|b| index.range_from_bytes(b));
        if let Some(range) = exact.or_else(|| locate_label(&rewritten.display, label, index)) {
            ranges.push(LinkRange::new(LinkType::Action, range, payload));
        }
    }

    ranges
}

fn extract_first_occurrence(raw: &str, display: &str, index: &Utf16Index) -> Vec<LinkRange> {
    let mut ranges: Vec<LinkRange> = Vec::new();

    for cap in MENTION_LINK_RE.captures_iter(raw) {
        let Some((_, label, payload)) = split_captures(&cap) else {
            continue;
        };
        if let Some(range) = locate_label(display, label, index) {
            ranges.push(LinkRange::new(LinkType::UserHandle, range, payload));
        }
    }

    for cap in ACTION_LINK_RE.captures_iter(raw) {
        let Some((_, label, payload)) = split_captures(&cap) else {
            continue;
        };
        if is_recovered(&ranges, payload) {
            continue;
        }
        if let Some(range) = locate_label(display, label, index) {
            ranges.push(LinkRange::new(LinkType::Action, range, payload));
        }
    }

    ranges
}

/// Scanning the raw text re-matches the `[..](..)` tail of every `@[..](..)`;
/// the payload check keeps those out, along with repeated payloads.
fn is_recovered(ranges: &[LinkRange], payload: &str) -> bool {
    ranges.iter().any(|r| r.link == payload)
}

fn locate_label(display: &str, label: &str, index: &Utf16Index) -> Option<TextRange> {
    let Some(start) = display.find(label) else {
        #[cfg(target_arch = "wasm32")]
        web_sys::console::warn_1(&format!("[MarkdownLinks] label not found in display text: {:?}", label).into());
        return None;
    };
    index.range_from_bytes(start..start + label.len())
}

// ==================== TESTS ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_mention_link() {
        assert_eq!(strip_markdown("@[Link Label](target)"), "Link Label");
    }

    #[test]
    fn test_strip_action_link() {
        assert_eq!(
            strip_markdown("Go [here](open-menu) now"),
            "Go here now"
        );
    }

    #[test]
    fn test_strip_leaves_malformed_syntax() {
        let text = "broken [label(payload) and @[x](y";
        assert_eq!(strip_markdown(text), text);
    }

    #[test]
    fn test_mention_link_is_user_handle() {
        let raw = "@[Link Label](target)";
        let display = strip_markdown(raw);
        let ranges = extract_links(raw, &display, LabelOffsets::Exact);

        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].link_type, LinkType::UserHandle);
        assert_eq!(ranges[0].link, "target");
        assert_eq!(ranges[0].range, TextRange::new(0, 10));
    }

    #[test]
    fn test_plain_link_is_action() {
        let raw = "[Label](target2)";
        let display = strip_markdown(raw);
        let ranges = extract_links(raw, &display, LabelOffsets::Exact);

        assert_eq!(ranges, vec![LinkRange::new(LinkType::Action, TextRange::new(0, 5), "target2")]);
    }

    #[test]
    fn test_duplicate_payload_keeps_mention() {
        let raw = "@[Ann](user-1) and [Profile](user-1)";
        let display = strip_markdown(raw);
        assert_eq!(display, "Ann and Profile");

        for offsets in [LabelOffsets::Exact, LabelOffsets::FirstOccurrence] {
            let ranges = extract_links(raw, &display, offsets);
            assert_eq!(ranges.len(), 1, "{:?}", offsets);
            assert_eq!(ranges[0].link_type, LinkType::UserHandle);
            assert_eq!(ranges[0].range, TextRange::new(0, 3));
        }
    }

    #[test]
    fn test_exact_offsets_for_repeated_labels() {
        let raw = "[more](a) and [more](b)";
        let display = strip_markdown(raw);
        assert_eq!(display, "more and more");

        let exact = extract_links(raw, &display, LabelOffsets::Exact);
        assert_eq!(exact[0].range, TextRange::new(0, 4));
        assert_eq!(exact[1].range, TextRange::new(9, 4));

        let legacy = extract_links(raw, &display, LabelOffsets::FirstOccurrence);
        assert_eq!(legacy[0].range, TextRange::new(0, 4));
        assert_eq!(legacy[1].range, TextRange::new(0, 4), "legacy mode resolves to first occurrence");
    }

    #[test]
    fn test_label_repeated_in_plain_text() {
        // Label text also appears before the link
        let raw = "Read more: [more](next-page)";
        let display = strip_markdown(raw);
        assert_eq!(display, "Read more: more");

        let exact = extract_links(raw, &display, LabelOffsets::Exact);
        assert_eq!(exact[0].range, TextRange::new(11, 4));
    }

    #[test]
    fn test_offsets_shift_past_earlier_links() {
        let raw = "[a](1) then @[bob](u2) then [c](3)";
        let display = strip_markdown(raw);
        assert_eq!(display, "a then bob then c");

        let ranges = extract_links(raw, &display, LabelOffsets::Exact);
        assert_eq!(ranges.len(), 3);
        assert_eq!(ranges[0], LinkRange::new(LinkType::UserHandle, TextRange::new(7, 3), "u2"));
        assert_eq!(ranges[1], LinkRange::new(LinkType::Action, TextRange::new(0, 1), "1"));
        assert_eq!(ranges[2], LinkRange::new(LinkType::Action, TextRange::new(16, 1), "3"));
    }

    #[test]
    fn test_link_formed_by_mention_rewrite_is_not_recovered() {
        // Raw text matches `[@[a](p)` with payload `p`, already recovered
        let raw = "[@[a](p)](q)";
        let rewritten = rewrite(raw);
        assert_eq!(rewritten.display, "a");

        for offsets in [LabelOffsets::Exact, LabelOffsets::FirstOccurrence] {
            let ranges = extract_links(raw, &rewritten.display, offsets);
            assert_eq!(
                ranges,
                vec![LinkRange::new(LinkType::UserHandle, TextRange::new(0, 1), "p")],
                "{:?}",
                offsets
            );
        }
    }

    #[test]
    fn test_repeated_action_payload_keeps_first() {
        let raw = "[a](x) and [b](x)";
        let display = strip_markdown(raw);
        assert_eq!(display, "a and b");

        for offsets in [LabelOffsets::Exact, LabelOffsets::FirstOccurrence] {
            let ranges = extract_links(raw, &display, offsets);
            assert_eq!(
                ranges,
                vec![LinkRange::new(LinkType::Action, TextRange::new(0, 1), "x")],
                "{:?}",
                offsets
            );
        }
    }

    #[test]
    fn test_mention_inside_payload_stays_in_payload() {
        // The raw `[x](..)` payload runs up to the first `)`
        let raw = "[x](@[a](b))";
        let rewritten = rewrite(raw);
        assert_eq!(rewritten.display, "x");

        let ranges = extract_links(raw, &rewritten.display, LabelOffsets::Exact);
        assert_eq!(ranges, vec![LinkRange::new(LinkType::Action, TextRange::new(0, 1), "@[a](b")]);
    }

    #[test]
    fn test_extract_rewritten_matches_extract_links() {
        let raw = "@[Ann](u1) and [more](a) and [more](b)";
        let rewritten = rewrite(raw);
        let index = Utf16Index::new(&rewritten.display);
        for offsets in [LabelOffsets::Exact, LabelOffsets::FirstOccurrence] {
            assert_eq!(
                extract_rewritten(raw, &rewritten, &index, offsets),
                extract_links(raw, &rewritten.display, offsets)
            );
        }
    }

    #[test]
    fn test_utf16_offsets() {
        let raw = "😀 [tap](go)";
        let display = strip_markdown(raw);
        let ranges = extract_links(raw, &display, LabelOffsets::Exact);
        assert_eq!(ranges[0].range, TextRange::new(3, 3));
    }

    #[test]
    fn test_sample_action_text() {
        let raw = "There is also a 'Action' type that detects some basic markdown links like this: \
                   [This is a link to DevsDNA's site](http://www.devsdna.com); or this: \
                   [This is a call-to-action](the parameter to pass to call-to-action listener).";
        let display = strip_markdown(raw);
        let ranges = extract_links(raw, &display, LabelOffsets::Exact);

        assert_eq!(ranges.len(), 2);
        assert_eq!(ranges[0].link, "http://www.devsdna.com");
        assert_eq!(ranges[1].link, "the parameter to pass to call-to-action listener");
        let index = Utf16Index::new(&display);
        let label = &display[index.byte_range(ranges[1].range).unwrap()];
        assert_eq!(label, "This is a call-to-action");
    }

    #[test]
    fn test_missing_label_is_dropped_in_legacy_mode() {
        let ranges = extract_links("[gone](x)", "unrelated text", LabelOffsets::FirstOccurrence);
        assert!(ranges.is_empty());
    }
}
