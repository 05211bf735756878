//! Threema messages-file parser.
//!
//! The messages file is line-oriented: every message starts with a header
//! line `[YYYY-MM-DD, HH:MM] Sender: body`, and a message body may continue
//! over any number of following lines that do not themselves match the
//! header pattern. [`ArchiveParser`] reconstructs those logical blocks,
//! splits out the structured fields and runs each body through the full
//! markup pipeline, producing one ready-to-embed HTML fragment per message.
//!
//! # Pipeline
//!
//! Per message, in order:
//!
//! 1. field split (timestamp, sender, body), tabs in the body normalized to
//!    single spaces
//! 2. media placeholders (`<filename>`) extracted right-to-left, each
//!    leaving a tab marker at its position — tabs cannot clash with body
//!    text because of step 1
//! 3. HTML escaping (markers pass through)
//! 4. inline styles: bold, italics, strikethrough
//! 5. markers replaced left-to-right by the resolved media fragments
//! 6. remaining newlines become `<br>`
//!
//! The only fatal grammar error is a first line that is not a header:
//! every later line is by definition either a header or a continuation.

use std::fs;
use std::path::Path;

use regex::Regex;

use crate::error::{ArchiveError, Result};
use crate::index::FileIndex;
use crate::markup::{apply_inline_styles, escape_html};
use crate::media::{self, MediaRef};
use crate::palette::SenderRegistry;

/// Header pattern of a Threema message line. Group 1 is the timestamp,
/// group 2 the sender, group 3 the body (spanning continuation lines once
/// the block is assembled).
const HEADER_PATTERN: &str =
    r"^\s*\[(\d{4}-\d{2}-\d{2},\s*\d{2}:\d{2})\]\s+([^:]*):\s*([\S\s]*)$";

/// One fully rendered message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    /// Timestamp exactly as written in the archive (`YYYY-MM-DD, HH:MM`).
    /// Kept verbatim; never parsed into a date type.
    pub timestamp: String,
    /// Sender with internal whitespace collapsed to underscores. Doubles
    /// as the message's CSS class token.
    pub sender: String,
    /// The complete `<div>` fragment for this message.
    pub html: String,
}

/// Everything one parse pass produces.
#[derive(Debug)]
pub struct ParseOutcome {
    /// Rendered messages in input order.
    pub messages: Vec<RenderedMessage>,
    /// Senders in first-appearance order, `"Me"` pre-seeded.
    pub senders: SenderRegistry,
}

/// Parser for Threema `messages.txt` archives.
///
/// # Example
///
/// ```rust,no_run
/// use threema2html::index::FileIndex;
/// use threema2html::parser::ArchiveParser;
///
/// let index = FileIndex::build("chat_export/".as_ref())?;
/// let parser = ArchiveParser::new();
/// let outcome = parser.parse_file("chat_export/messages.txt".as_ref(), &index)?;
/// println!("{} messages", outcome.messages.len());
/// # Ok::<(), threema2html::ArchiveError>(())
/// ```
pub struct ArchiveParser {
    header: Regex,
}

impl ArchiveParser {
    /// Creates a parser.
    pub fn new() -> Self {
        Self {
            header: Regex::new(HEADER_PATTERN).expect("valid header pattern"),
        }
    }

    /// Reads and parses a messages file.
    pub fn parse_file(&self, path: &Path, index: &FileIndex) -> Result<ParseOutcome> {
        let content = fs::read_to_string(path)
            .map_err(|e| ArchiveError::file_system(path, e))?;
        self.parse_str(&content, index)
    }

    /// Parses messages-file content.
    ///
    /// # Errors
    ///
    /// [`ArchiveError::NotAnArchive`] when the first line (or an empty
    /// file's sole empty line) does not match the header pattern. No
    /// partial result is returned.
    pub fn parse_str(&self, content: &str, index: &FileIndex) -> Result<ParseOutcome> {
        let blocks = self.assemble_blocks(content)?;

        let mut senders = SenderRegistry::new();
        let mut messages = Vec::with_capacity(blocks.len());

        for block in &blocks {
            messages.push(self.render_block(block, index, &mut senders));
        }

        Ok(ParseOutcome { messages, senders })
    }

    /// Merges physical lines into logical message blocks.
    fn assemble_blocks(&self, content: &str) -> Result<Vec<String>> {
        let trimmed = content.trim_end_matches(['\n', '\r']);
        let normalized = trimmed.replace("\r\n", "\n").replace('\r', "\n");

        let mut blocks: Vec<String> = Vec::new();
        for line in normalized.split('\n') {
            if self.header.is_match(line) {
                blocks.push(line.to_string());
            } else if let Some(open) = blocks.last_mut() {
                open.push('\n');
                open.push_str(line);
            } else {
                return Err(ArchiveError::not_an_archive(line));
            }
        }
        Ok(blocks)
    }

    /// Runs the full per-message pipeline over one block.
    fn render_block(
        &self,
        block: &str,
        index: &FileIndex,
        senders: &mut SenderRegistry,
    ) -> RenderedMessage {
        let caps = self
            .header
            .captures(block)
            .expect("block starts with a matched header line");

        let timestamp = caps[1].to_string();
        let sender: String = caps[2]
            .chars()
            .map(|c| if c.is_whitespace() { '_' } else { c })
            .collect();
        let mut body = caps[3].replace('\t', " ");

        let media = extract_media(&mut body);

        body = escape_html(&body);
        body = apply_inline_styles(&body);
        body = substitute_media(&body, &media, index);
        body = body.replace('\n', "<br>");

        let html = format!(
            "<div class=\"{sender}\"><span class=\"prefix\">{timestamp} ({sender}):</span> {body}</div>"
        );

        senders.register(&sender);

        RenderedMessage {
            timestamp,
            sender,
            html,
        }
    }
}

impl Default for ArchiveParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Extracts media placeholders from `body`, right-to-left, leaving one tab
/// marker per placeholder. Returns the references in extraction order
/// (last placeholder first).
fn extract_media(body: &mut String) -> Vec<MediaRef> {
    let mut media = Vec::new();
    while let Some((start, end)) = find_last_placeholder(body) {
        let outer = body[start..end].to_string();
        let inner = body[start + 1..end - 1].to_string();
        media.push(MediaRef::new(outer, inner));
        body.replace_range(start..end, "\t");
    }
    media
}

/// Byte range of the rightmost `<...>` span: the last `<` that still has a
/// `>` somewhere after it, closed at the first `>` that follows.
fn find_last_placeholder(s: &str) -> Option<(usize, usize)> {
    let mut search_end = s.len();
    while let Some(lt) = s[..search_end].rfind('<') {
        if let Some(gt) = s[lt + 1..].find('>') {
            return Some((lt, lt + 1 + gt + 1));
        }
        search_end = lt;
    }
    None
}

/// Replaces the i-th tab marker with the fragment of the i-th placeholder
/// in positional (left-to-right) order, in one pass.
fn substitute_media(body: &str, media: &[MediaRef], index: &FileIndex) -> String {
    if media.is_empty() {
        return body.to_string();
    }

    // extraction was right-to-left, so positional order is the reverse
    let mut fragments = media.iter().rev().map(|m| media::resolve(m, index));

    let mut out = String::with_capacity(body.len());
    for c in body.chars() {
        if c == '\t' {
            if let Some(fragment) = fragments.next() {
                out.push_str(&fragment);
            }
        } else {
            out.push(c);
        }
    }
    out
}
