//! Text cleanup for titles, authors and abstracts extracted from feed and
//! API payloads.

use regex::Regex;
use std::sync::OnceLock;

static TAG_RE: OnceLock<Regex> = OnceLock::new();
static TITLE_ANNOTATION_RE: OnceLock<Regex> = OnceLock::new();

fn tag_re() -> &'static Regex {
    TAG_RE.get_or_init(|| Regex::new(r"<[^<]+?>").expect("tag pattern is valid"))
}

fn title_annotation_re() -> &'static Regex {
    TITLE_ANNOTATION_RE.get_or_init(|| {
        Regex::new(r"\(arXiv:[0-9]+\.[0-9]+v[0-9]+ \[.*\]\)$").expect("annotation pattern is valid")
    })
}

/// Remove HTML/XML tags.
pub fn strip_tags(text: &str) -> String {
    tag_re().replace_all(text, "").into_owned()
}

/// Decode HTML entities ("&amp;" and friends) into characters.
pub fn decode_entities(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}

/// Replace embedded newlines with single spaces.
pub fn collapse_newlines(text: &str) -> String {
    text.replace('\n', " ")
}

/// Clean a feed summary: tags stripped, newlines collapsed, entities decoded.
pub fn clean_feed_summary(text: &str) -> String {
    decode_entities(&collapse_newlines(&strip_tags(text)))
}

/// Clean an API summary. The search API serves plain text, so only newlines
/// and entities need attention.
pub fn clean_api_summary(text: &str) -> String {
    decode_entities(&collapse_newlines(text))
}

/// Drop the trailing `(arXiv:2401.01234v1 [cs.AI])` annotation some feed
/// titles carry.
pub fn strip_title_annotation(title: &str) -> String {
    title_annotation_re().replace(title, "").trim().to_string()
}

/// Split the feed's author field into display names.
///
/// The feed joins multiple authors into one comma-separated string, with
/// newlines between groups; each name may carry markup and entities.
/// Segments that clean down to nothing (stray commas, trailing
/// separators) are dropped rather than kept as empty names.
pub fn split_authors(raw: &str) -> Vec<String> {
    raw.replace('\n', ", ")
        .split(',')
        .map(|author| decode_entities(&strip_tags(author)).trim().to_string())
        .filter(|author| !author.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_title_annotation() {
        assert_eq!(
            strip_title_annotation("Foo Bar (arXiv:2401.01234v1 [cs.AI])"),
            "Foo Bar"
        );
    }

    #[test]
    fn test_strip_title_annotation_only_at_end() {
        let title = "On (arXiv:2401.01234v1 [cs.AI]) notation in titles";
        assert_eq!(strip_title_annotation(title), title);
    }

    #[test]
    fn test_strip_title_annotation_absent() {
        assert_eq!(strip_title_annotation("Plain title"), "Plain title");
    }

    #[test]
    fn test_split_authors_commas_and_newlines() {
        assert_eq!(split_authors("A, B\nC, D"), vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_split_authors_markup_and_entities() {
        assert_eq!(
            split_authors("<a href=\"x\">Jane Doe</a>, John O&#39;Brien"),
            vec!["Jane Doe", "John O'Brien"]
        );
    }

    #[test]
    fn test_split_authors_drops_empty_segments() {
        assert_eq!(split_authors("A,, B,"), vec!["A", "B"]);
    }

    #[test]
    fn test_clean_feed_summary() {
        assert_eq!(
            clean_feed_summary("<p>Line one\nline two &amp; three</p>"),
            "Line one line two & three"
        );
    }

    #[test]
    fn test_clean_api_summary_keeps_angle_text() {
        // The API serves plain text; inequality signs must survive.
        assert_eq!(clean_api_summary("a &lt; b\nand c"), "a < b and c");
    }
}
