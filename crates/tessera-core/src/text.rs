#![forbid(unsafe_code)]

//! Grapheme clusters and their cell width.
//!
//! A cell holds exactly one extended grapheme cluster. Its matrix width is
//! the cluster's display width in terminal columns, with emoji forced to two
//! columns and zero-width clusters reported as zero.

use unicode_display_width::{is_double_width, width as unicode_display_width};
use unicode_segmentation::{Graphemes, UnicodeSegmentation};
use unicode_width::UnicodeWidthChar;

/// Zero-width space. Word scans treat it as a hard break.
pub const ZWSP: char = '\u{200B}';

/// Iterate extended grapheme clusters.
#[inline]
pub fn clusters(text: &str) -> Graphemes<'_> {
    text.graphemes(true)
}

/// The first extended grapheme cluster, or `""`.
#[inline]
pub fn first_cluster(text: &str) -> &str {
    text.graphemes(true).next().unwrap_or("")
}

/// The first codepoint as a scalar value, or `0` for empty text.
#[inline]
pub fn first_codepoint(text: &str) -> u32 {
    text.chars().next().map_or(0, |c| c as u32)
}

#[inline]
fn is_zero_width_codepoint(c: char) -> bool {
    let u = c as u32;
    matches!(u, 0x0000..=0x001F | 0x007F..=0x009F)
        || matches!(u, 0x0300..=0x036F | 0x1AB0..=0x1AFF | 0x1DC0..=0x1DFF | 0x20D0..=0x20FF)
        || matches!(u, 0xFE20..=0xFE2F | 0xFE00..=0xFE0F | 0xE0100..=0xE01EF)
        || matches!(u, 0x00AD | 0x200B..=0x200F | 0x2060 | 0xFEFF)
}

#[inline]
fn is_probable_emoji(c: char) -> bool {
    let u = c as u32;
    matches!(
        u,
        0x1F000..=0x1FAFF | 0x2600..=0x27BF | 0x2B00..=0x2BFF
    ) && u != 0x2764
}

/// Display width of a single codepoint.
#[inline]
pub fn char_width(ch: char) -> usize {
    if ch.is_ascii() {
        return usize::from((' '..='~').contains(&ch));
    }
    if is_zero_width_codepoint(ch) {
        return 0;
    }
    if is_double_width(ch) || is_probable_emoji(ch) {
        return 2;
    }
    ch.width().unwrap_or(0)
}

/// Display width of one grapheme cluster.
pub fn grapheme_width(grapheme: &str) -> usize {
    if grapheme.is_ascii() {
        return grapheme.bytes().filter(|b| (0x20..=0x7E).contains(b)).count();
    }
    if grapheme.chars().all(is_zero_width_codepoint) {
        return 0;
    }
    if grapheme.chars().any(|c| c as u32 == 0xFE0F || is_probable_emoji(c)) {
        return 2;
    }
    unicode_display_width(grapheme) as usize
}

/// Display width of a whole string, cluster by cluster.
pub fn display_width(text: &str) -> usize {
    if text.bytes().all(|b| (0x20..=0x7E).contains(&b)) {
        return text.len();
    }
    clusters(text).map(grapheme_width).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_is_one_column() {
        assert_eq!(grapheme_width("a"), 1);
        assert_eq!(display_width("hello"), 5);
    }

    #[test]
    fn control_chars_have_no_width() {
        assert_eq!(char_width('\x07'), 0);
        assert_eq!(grapheme_width("\x1b"), 0);
    }

    #[test]
    fn cjk_is_two_columns() {
        assert_eq!(grapheme_width("中"), 2);
        assert_eq!(char_width('中'), 2);
        assert_eq!(display_width("中文"), 4);
    }

    #[test]
    fn emoji_is_two_columns() {
        assert_eq!(grapheme_width("😀"), 2);
        assert_eq!(grapheme_width("👍🏽"), 2);
    }

    #[test]
    fn zwsp_is_zero_width() {
        assert_eq!(char_width(ZWSP), 0);
        assert_eq!(grapheme_width("\u{200B}"), 0);
    }

    #[test]
    fn first_cluster_keeps_combining_marks() {
        assert_eq!(first_cluster("e\u{301}x"), "e\u{301}");
        assert_eq!(first_cluster(""), "");
        assert_eq!(first_codepoint("é"), 0xE9);
        assert_eq!(first_codepoint(""), 0);
    }
}
