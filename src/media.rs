//! Media reference resolution.
//!
//! A message body may embed `<filename>` placeholders naming files that
//! were unpacked next to the messages file. This module turns one extracted
//! placeholder into the HTML fragment that replaces it: an inline image, an
//! audio or video player, a generic download link, or — when the file is
//! not present in the index — the escaped literal text of the placeholder.
//!
//! Resolution failure is deliberately not an error. A chat regularly
//! references media that was expired or never exported; those references
//! degrade to visible text instead of broken tags.

use mime_guess::mime;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::index::FileIndex;
use crate::markup::escape_html;

/// Characters percent-encoded in `src`/`href` attribute values: controls
/// plus everything a browser would reject in a raw URI.
const URI_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'\\')
    .add(b'^')
    .add(b'%');

/// One media placeholder extracted from a message body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRef {
    /// The whole placeholder as it appeared, brackets included.
    pub outer: String,
    /// The filename between the brackets.
    pub inner: String,
}

impl MediaRef {
    /// Creates a reference from its bracketed and bare forms.
    pub fn new(outer: impl Into<String>, inner: impl Into<String>) -> Self {
        Self {
            outer: outer.into(),
            inner: inner.into(),
        }
    }
}

/// Percent-encodes a filename for use as a URI component.
fn encode_uri(s: &str) -> String {
    utf8_percent_encode(s, URI_ENCODE_SET).to_string()
}

/// Resolves one media reference against the file index.
///
/// The referenced basename is looked up case-insensitively. A hit renders
/// according to the file's guessed content type:
///
/// - `image/*` — `<br><img …>`
/// - `audio/*` — `<audio controls>` with a fallback sentence
/// - `video/*` — `<br><video controls>` with a fallback sentence
/// - anything else (including no recognizable type) — a download link
///   opening in a new tab
///
/// A miss returns the HTML-escaped placeholder text itself, brackets and
/// all.
pub fn resolve(media: &MediaRef, index: &FileIndex) -> String {
    let Some(entry) = index.lookup(&media.inner) else {
        return escape_html(&media.outer);
    };

    let src = encode_uri(&media.inner);
    let label = escape_html(&media.inner);

    match &entry.content_type {
        Some(ct) if ct.type_() == mime::IMAGE => {
            format!("<br><img src=\"{src}\" alt=\"{label}\">")
        }
        Some(ct) if ct.type_() == mime::AUDIO => format!(
            "<audio controls><source src=\"{src}\" type=\"{}\">Your browser does not support the audio tag.</audio>",
            ct.essence_str()
        ),
        Some(ct) if ct.type_() == mime::VIDEO => format!(
            "<br><video controls><source src=\"{src}\" type=\"{}\">Your browser does not support the video tag.</video>",
            ct.essence_str()
        ),
        _ => format!("<a href=\"{src}\" target=\"_blank\">{label}</a>"),
    }
}
