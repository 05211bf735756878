//! Inline markup transformations for message bodies.
//!
//! Threema message text carries a small fixed markup vocabulary:
//! `*bold*`, `_italics_` and `~strikethrough~`. Spans do not nest and a
//! span's content never contains its own delimiter. This module HTML-escapes
//! raw text and rewrites those delimiter pairs into `<span>` tags.
//!
//! Replacement is deliberately iterative: one pair at a time, re-scanning
//! from the start of the string after every substitution. Each replacement
//! consumes two delimiter characters, so the loop always terminates, and
//! overlapping candidates resolve left-to-right.

use regex::Regex;

/// Replaces every HTML-reserved character with its entity.
///
/// The substitution set is `& < > " ' / `` ` `` =`. No entry's entity
/// contains another entry's character, so a single left-to-right pass is
/// order-independent. Tab and newline characters pass through untouched;
/// the parser relies on that when it re-locates media markers after
/// escaping.
///
/// # Example
///
/// ```rust
/// use threema2html::markup::escape_html;
///
/// assert_eq!(escape_html("a < b & c"), "a &lt; b &amp; c");
/// assert_eq!(escape_html("plain text"), "plain text");
/// ```
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '/' => out.push_str("&#x2F;"),
            '`' => out.push_str("&#x60;"),
            '=' => out.push_str("&#x3D;"),
            _ => out.push(c),
        }
    }
    out
}

/// One delimiter-based inline style.
///
/// Holds the compiled pair pattern for a single delimiter character. The
/// pattern is `D([^D]*)D`: a span's content must not contain the delimiter
/// itself.
pub struct InlineStyle {
    class: &'static str,
    pair: Regex,
}

impl InlineStyle {
    /// Builds a style for `delimiter`, emitting `<span class="css_class">`.
    pub fn new(delimiter: char, css_class: &'static str) -> Self {
        let d = regex::escape(&delimiter.to_string());
        let pair = Regex::new(&format!("{d}([^{d}]*){d}")).expect("valid style pattern");
        Self {
            class: css_class,
            pair,
        }
    }

    /// Rewrites all delimiter pairs in `s` into `<span>` tags.
    ///
    /// Finds the engine's first pair, substitutes, and re-scans from the
    /// start until no pair remains. Unmatched delimiters are left as-is.
    pub fn apply(&self, s: &str) -> String {
        let mut text = s.to_string();
        while self.pair.is_match(&text) {
            text = self
                .pair
                .replace(&text, |caps: &regex::Captures<'_>| {
                    format!("<span class=\"{}\">{}</span>", self.class, &caps[1])
                })
                .into_owned();
        }
        text
    }
}

/// Applies the three Threema styles in their fixed order: bold, italics,
/// strikethrough.
///
/// The order matters: later passes run over text that already contains
/// emitted `<span>` tags, and the tags reuse none of the style delimiters,
/// so earlier output is never reprocessed.
pub fn apply_inline_styles(s: &str) -> String {
    let bold = InlineStyle::new('*', "bold");
    let italics = InlineStyle::new('_', "italics");
    let strikethrough = InlineStyle::new('~', "strikethrough");

    let s = bold.apply(s);
    let s = italics.apply(&s);
    strikethrough.apply(&s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_all_reserved() {
        assert_eq!(
            escape_html("&<>\"'/`="),
            "&amp;&lt;&gt;&quot;&#39;&#x2F;&#x60;&#x3D;"
        );
    }

    #[test]
    fn test_escape_identity_on_clean_text() {
        let clean = "Hello World, nothing special here 123 äöü";
        assert_eq!(escape_html(clean), clean);
    }

    #[test]
    fn test_escape_keeps_tabs_and_newlines() {
        assert_eq!(escape_html("a\tb\nc"), "a\tb\nc");
    }

    #[test]
    fn test_bold_basic() {
        let style = InlineStyle::new('*', "bold");
        assert_eq!(
            style.apply("Hello *world*!"),
            "Hello <span class=\"bold\">world</span>!"
        );
    }

    #[test]
    fn test_unmatched_delimiter_untouched() {
        let style = InlineStyle::new('*', "bold");
        assert_eq!(style.apply("5 * 3"), "5 * 3");
        assert_eq!(style.apply("no delimiter"), "no delimiter");
    }

    #[test]
    fn test_multiple_pairs_left_to_right() {
        let style = InlineStyle::new('*', "bold");
        assert_eq!(
            style.apply("*a* and *b*"),
            "<span class=\"bold\">a</span> and <span class=\"bold\">b</span>"
        );
    }

    #[test]
    fn test_odd_delimiter_count_leaves_tail() {
        let style = InlineStyle::new('*', "bold");
        // first pair consumed, trailing lone delimiter stays
        assert_eq!(
            style.apply("*a* leftover *"),
            "<span class=\"bold\">a</span> leftover *"
        );
    }

    #[test]
    fn test_empty_span() {
        let style = InlineStyle::new('*', "bold");
        assert_eq!(style.apply("**"), "<span class=\"bold\"></span>");
    }

    #[test]
    fn test_all_styles_in_order() {
        assert_eq!(
            apply_inline_styles("*b* _i_ ~s~"),
            "<span class=\"bold\">b</span> <span class=\"italics\">i</span> <span class=\"strikethrough\">s</span>"
        );
    }

    #[test]
    fn test_styles_inside_bold_content() {
        // italics pass runs over the already-emitted bold span
        assert_eq!(
            apply_inline_styles("*_x_*"),
            "<span class=\"bold\"><span class=\"italics\">x</span></span>"
        );
    }

    #[test]
    fn test_strikethrough_excludes_tilde_content() {
        assert_eq!(
            apply_inline_styles("~a_b~"),
            "<span class=\"strikethrough\">a_b</span>"
        );
    }
}
