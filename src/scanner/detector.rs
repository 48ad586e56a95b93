//! LinkDetector - runs the selected matchers and aggregates their ranges
//!
//! Order for `All`: Action (markdown links), UserHandle, Hashtag, URL.
//! Each category is ignore-filtered, then concatenated. No cross-category
//! overlap resolution: sigils and syntax keep categories disjoint.

use instant::Instant;
use serde::{Deserialize, Serialize};

use super::ignore::IgnoredKeywords;
use super::markdown::{extract_links, extract_rewritten, LabelOffsets, MarkdownRewrite};
use super::patterns::{scan_hashtags, scan_urls, scan_user_handles};
use crate::text::{LinkRange, LinkType, LinkTypeOption, Utf16Index};

// ==================== TYPE DEFINITIONS ====================

/// Per-pass counts and timing for one detection run
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct DetectionStats {
    pub total_time_ms: f64,
    /// Display text length in UTF-16 units
    pub text_length: usize,
    pub action_count: usize,
    pub user_handle_count: usize,
    pub hashtag_count: usize,
    pub url_count: usize,
    /// Candidates dropped by the ignore filter
    pub ignored_count: usize,
}

impl DetectionStats {
    pub fn link_count(&self) -> usize {
        self.action_count + self.user_handle_count + self.hashtag_count + self.url_count
    }

    fn record(&mut self, link_type: LinkType, count: usize) {
        match link_type {
            LinkType::Action => self.action_count += count,
            LinkType::UserHandle => self.user_handle_count += count,
            LinkType::Hashtag => self.hashtag_count += count,
            LinkType::Url => self.url_count += count,
        }
    }
}

/// Output of one detection run
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Detection {
    pub ranges: Vec<LinkRange>,
    pub stats: DetectionStats,
}

// ==================== MAIN IMPLEMENTATION ====================

/// Link detector configured with a category selection and an ignore list
#[derive(Clone, Debug, Default)]
pub struct LinkDetector {
    option: LinkTypeOption,
    ignored: IgnoredKeywords,
    label_offsets: LabelOffsets,
}

impl LinkDetector {
    pub fn new(option: LinkTypeOption) -> Self {
        Self {
            option,
            ..Self::default()
        }
    }

    pub fn with_ignored(mut self, ignored: IgnoredKeywords) -> Self {
        self.ignored = ignored;
        self
    }

    pub fn with_label_offsets(mut self, label_offsets: LabelOffsets) -> Self {
        self.label_offsets = label_offsets;
        self
    }

    pub fn option(&self) -> LinkTypeOption {
        self.option
    }

    pub fn ignored(&self) -> &IgnoredKeywords {
        &self.ignored
    }

    /// Detect links in `display`; markdown links are recovered from `raw`
    ///
    /// `display` must be the markdown-stripped form of `raw`. Empty text or
    /// `LinkTypeOption::None` short-circuits without running any pass.
    pub fn detect(&self, raw: &str, display: &str) -> Detection {
        self.run(raw, display, None)
    }

    /// Like [`LinkDetector::detect`], reusing the label positions `rewritten`
    /// recorded instead of rewriting `raw` again
    pub fn detect_rewritten(&self, raw: &str, rewritten: &MarkdownRewrite) -> Detection {
        self.run(raw, &rewritten.display, Some(rewritten))
    }

    fn run(&self, raw: &str, display: &str, rewritten: Option<&MarkdownRewrite>) -> Detection {
        if self.option.is_none() || (raw.is_empty() && display.is_empty()) {
            return Detection::default();
        }

        let start = Instant::now();
        let index = Utf16Index::new(display);
        let mut stats = DetectionStats {
            text_length: index.len(),
            ..DetectionStats::default()
        };

        let mut ranges = Vec::new();
        for &link_type in self.option.link_types() {
            let candidates = match (link_type, rewritten) {
                (LinkType::Action, Some(rewritten)) => extract_rewritten(raw, rewritten, &index, self.label_offsets),
                _ => self.scan(link_type, raw, display, &index),
            };
            let before = candidates.len();
            let kept = self.ignored.filter(candidates);

            stats.ignored_count += before - kept.len();
            stats.record(link_type, kept.len());
            ranges.extend(kept);
        }

        stats.total_time_ms = start.elapsed().as_secs_f64() * 1000.0;

        Detection { ranges, stats }
    }

    /// Run a single category's matcher
    pub fn scan(&self, link_type: LinkType, raw: &str, display: &str, index: &Utf16Index) -> Vec<LinkRange> {
        match link_type {
            LinkType::Action => extract_links(raw, display, self.label_offsets),
            LinkType::UserHandle => scan_user_handles(display, index),
            LinkType::Hashtag => scan_hashtags(display, index),
            LinkType::Url => scan_urls(display, index),
        }
    }
}

// ==================== TESTS ====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::markdown::strip_markdown;
    use crate::text::TextRange;

    fn detect(option: LinkTypeOption, raw: &str) -> Vec<LinkRange> {
        let display = strip_markdown(raw);
        LinkDetector::new(option).detect(raw, &display).ranges
    }

    const MIXED: &str = "@alice says hi #devsdna see http://x.com";

    #[test]
    fn test_all_finds_each_category() {
        let ranges = detect(LinkTypeOption::All, MIXED);
        assert_eq!(
            ranges,
            vec![
                LinkRange::new(LinkType::UserHandle, TextRange::new(0, 6), "@alice"),
                LinkRange::new(LinkType::Hashtag, TextRange::new(15, 8), "#devsdna"),
                LinkRange::new(LinkType::Url, TextRange::new(28, 12), "http://x.com"),
            ]
        );
    }

    #[test]
    fn test_single_option_runs_one_matcher() {
        let handles = detect(LinkTypeOption::UserHandle, MIXED);
        assert_eq!(handles.len(), 1);
        assert_eq!(handles[0].link_type, LinkType::UserHandle);

        let tags = detect(LinkTypeOption::Hashtag, MIXED);
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].link, "#devsdna");

        let urls = detect(LinkTypeOption::Url, MIXED);
        assert_eq!(urls.len(), 1);
        assert_eq!(urls[0].link, "http://x.com");

        assert!(detect(LinkTypeOption::Action, MIXED).is_empty());
    }

    #[test]
    fn test_none_produces_nothing() {
        assert!(detect(LinkTypeOption::None, MIXED).is_empty());
        let detection = LinkDetector::new(LinkTypeOption::None).detect(MIXED, MIXED);
        assert_eq!(detection.stats, DetectionStats::default(), "no pass should run");
    }

    #[test]
    fn test_no_sigils_is_empty_for_every_option() {
        let text = "nothing to see here, move along";
        for option in [
            LinkTypeOption::None,
            LinkTypeOption::UserHandle,
            LinkTypeOption::Hashtag,
            LinkTypeOption::Url,
            LinkTypeOption::Action,
            LinkTypeOption::All,
        ] {
            assert!(detect(option, text).is_empty(), "{:?}", option);
        }
    }

    #[test]
    fn test_empty_text() {
        assert!(detect(LinkTypeOption::All, "").is_empty());
    }

    #[test]
    fn test_actions_come_first() {
        let raw = "#tag then [menu](open-menu)";
        let ranges = detect(LinkTypeOption::All, raw);
        assert_eq!(ranges[0].link_type, LinkType::Action);
        assert_eq!(ranges[0].link, "open-menu");
        assert_eq!(ranges[1].link_type, LinkType::Hashtag);
    }

    #[test]
    fn test_mention_link_payload_not_rescanned_as_handle() {
        let raw = "@[Link Label](target)";
        let ranges = detect(LinkTypeOption::All, raw);
        assert_eq!(ranges, vec![LinkRange::new(LinkType::UserHandle, TextRange::new(0, 10), "target")]);
    }

    #[test]
    fn test_ignore_filter_drops_only_listed() {
        let ignored: IgnoredKeywords = ["@ALICE"].into_iter().collect();
        let detector = LinkDetector::new(LinkTypeOption::All).with_ignored(ignored);
        let detection = detector.detect(MIXED, MIXED);

        let literals: Vec<_> = detection.ranges.iter().map(|r| r.link.as_str()).collect();
        assert_eq!(literals, vec!["#devsdna", "http://x.com"]);
        assert_eq!(detection.stats.ignored_count, 1);
    }

    #[test]
    fn test_ignore_filter_applies_to_action_payload() {
        let raw = "[menu](Open-Menu) and [help](help)";
        let display = strip_markdown(raw);
        let ignored: IgnoredKeywords = ["open-menu"].into_iter().collect();
        let ranges = LinkDetector::new(LinkTypeOption::Action)
            .with_ignored(ignored)
            .detect(raw, &display)
            .ranges;
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].link, "help");
    }

    #[test]
    fn test_detection_is_idempotent() {
        let raw = "@[Ann](u1) met @bob at #rustconf, see [slides](deck) or https://rust-lang.org";
        let display = strip_markdown(raw);
        let detector = LinkDetector::new(LinkTypeOption::All);
        let first = detector.detect(raw, &display).ranges;
        let second = detector.detect(raw, &display).ranges;
        assert_eq!(first, second);
        assert_eq!(first.len(), 5);
    }

    #[test]
    fn test_stats_counts() {
        let raw = "[a](x) @b #c #d www.e.com";
        let display = strip_markdown(raw);
        let stats = LinkDetector::new(LinkTypeOption::All).detect(raw, &display).stats;
        assert_eq!(stats.action_count, 1);
        assert_eq!(stats.user_handle_count, 1);
        assert_eq!(stats.hashtag_count, 2);
        assert_eq!(stats.url_count, 1);
        assert_eq!(stats.link_count(), 5);
        assert_eq!(stats.text_length, display.encode_utf16().count());
    }

    #[test]
    fn test_detect_rewritten_matches_detect() {
        let raw = "@[Ann](u1) met @bob, see [slides](deck) and [more](deck)";
        let rewritten = crate::scanner::markdown::rewrite(raw);
        let detector = LinkDetector::new(LinkTypeOption::All);

        let reused = detector.detect_rewritten(raw, &rewritten);
        assert_eq!(reused.ranges, detector.detect(raw, &rewritten.display).ranges);
        // Counted per pass: the mention link and the first `deck` link
        assert_eq!(reused.stats.action_count, 2);
        assert_eq!(reused.stats.user_handle_count, 1);
    }

    #[test]
    fn test_sample_user_handle_page() {
        let text = "This is an example of a 'UserHandle' type detection: @devsdna. As you can see, \
                    hashtags like #devsdna and links like http://www.devsdna.com are not active.";
        let ranges = detect(LinkTypeOption::UserHandle, text);
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].link, "@devsdna");
    }
}
