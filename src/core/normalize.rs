//! Lyrics text normalization
//!
//! Raw lyrics come with section markers such as `[Chorus]` or
//! `[Verse 2: Taylor Swift]`, LRC timestamps like `[00:12.34]`, ragged
//! whitespace and empty lines. `clean_lyrics` removes all of that so the
//! text can be displayed and fed into the word cloud.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// `[` up to the first following `]` on the same line.
    static ref BRACKET_TAG: Regex = Regex::new(r"\[.*?\]").expect("valid bracket tag pattern");
}

/// Strip bracketed tags, trim every line and drop the ones left empty.
///
/// Surviving lines keep their order and are joined with `\n`. Empty input
/// yields an empty string. Applying this twice gives the same result as
/// applying it once.
pub fn clean_lyrics(raw: &str) -> String {
    let without_tags = BRACKET_TAG.replace_all(raw, "");

    without_tags
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Whether the text has nothing worth rendering.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

pub fn line_count(text: &str) -> usize {
    text.lines().filter(|line| !line.trim().is_empty()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_tags_and_blank_lines() {
        let raw = "[Chorus]\nHello world  \n\n   \n[Verse]\nGoodbye";
        assert_eq!(clean_lyrics(raw), "Hello world\nGoodbye");
    }

    #[test]
    fn test_plain_text_is_only_trimmed() {
        let raw = "  first line\nsecond line  \n\tthird line\t";
        assert_eq!(clean_lyrics(raw), "first line\nsecond line\nthird line");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(clean_lyrics(""), "");
        assert_eq!(clean_lyrics("\n\n  \n"), "");
        assert_eq!(clean_lyrics("[Intro]\n[Outro]"), "");
    }

    #[test]
    fn test_inline_tags_are_non_greedy() {
        let raw = "keep [drop] this [and drop] too";
        assert_eq!(clean_lyrics(raw), "keep  this  too");
    }

    #[test]
    fn test_lrc_timestamps_are_removed() {
        let raw = "[00:12.34]We were both young\n[00:15.80]\n[00:17.02]I close my eyes";
        assert_eq!(clean_lyrics(raw), "We were both young\nI close my eyes");
    }

    #[test]
    fn test_nested_brackets_match_first_close() {
        // `[a [b]` goes, the stray `c]` stays
        assert_eq!(clean_lyrics("x [a [b] c] y"), "x  c] y");
    }

    #[test]
    fn test_tags_do_not_span_lines() {
        assert_eq!(clean_lyrics("open [\nclose ]"), "open [\nclose ]");
    }

    #[test]
    fn test_crlf_line_endings() {
        assert_eq!(clean_lyrics("one\r\n\r\n[Bridge]\r\ntwo\r\n"), "one\ntwo");
    }

    #[test]
    fn test_invariants_hold_for_varied_inputs() {
        let samples = [
            "",
            "   ",
            "[Chorus]",
            "a\n\n\nb",
            "[x]]][[y]",
            "  [Verse 1: Artist]  \n  line  \n[",
            "]] [[ ]]\n\t\n[a][b][c]d",
            "x [a [b] c] y\n[open\nclose]",
            "unicode ♪ [Refrão] coração  \n  ",
        ];

        for sample in samples {
            let once = clean_lyrics(sample);
            for line in once.split('\n') {
                if !once.is_empty() {
                    assert!(!line.trim().is_empty(), "blank line in {:?}", once);
                }
            }
            assert!(!BRACKET_TAG.is_match(&once), "tag survived in {:?}", once);
            assert_eq!(clean_lyrics(&once), once, "not idempotent for {:?}", sample);
        }
    }

    #[test]
    fn test_is_blank_and_line_count() {
        assert!(is_blank(""));
        assert!(is_blank(" \n\t "));
        assert!(!is_blank(" a "));
        assert_eq!(line_count("a\n\n b\n  \nc"), 3);
    }
}
