//! # threema2html
//!
//! A Rust library and CLI for converting archived Threema chats into
//! standalone HTML documents.
//!
//! ## Overview
//!
//! Threema stores archived chats as password protected zip files. Unpacked
//! into a folder, an archive consists of a plain text `messages.txt` plus
//! the chat's media files. This crate parses the messages file, resolves
//! the media references embedded in message bodies, and produces a single
//! HTML document: one colored `<div>` per message, with images inlined and
//! audio/video playable in the browser.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use threema2html::config::Config;
//! use threema2html::index::FileIndex;
//! use threema2html::parser::ArchiveParser;
//! use threema2html::render::render_document;
//!
//! fn main() -> threema2html::Result<()> {
//!     let config = Config::default();
//!     let index = FileIndex::build("chat_export/".as_ref())?;
//!     let messages_file = index
//!         .lookup(&config.messages_filename)
//!         .expect("messages file present");
//!
//!     let outcome = ArchiveParser::new().parse_file(&messages_file.path, &index)?;
//!     let html = render_document(&outcome.messages, &outcome.senders, &config);
//!     std::fs::write("chat.html", html)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] — the core: block assembly and the per-message pipeline
//!   - [`ArchiveParser`](parser::ArchiveParser), [`RenderedMessage`](parser::RenderedMessage)
//! - [`index`] — case-insensitive recursive file index ([`FileIndex`](index::FileIndex))
//! - [`markup`] — HTML escaping and `*bold*` / `_italics_` / `~strikethrough~` spans
//! - [`media`] — media placeholder resolution ([`MediaRef`](media::MediaRef))
//! - [`palette`] — sender registry and color assignment
//! - [`render`] — final document assembly
//! - [`config`] — defaults and `.config` overlay files
//! - [`outfile`] — timestamped output path generation
//! - [`cli`] — clap argument structure
//! - [`error`] — unified error types ([`ArchiveError`], [`Result`])

pub mod cli;
pub mod config;
pub mod error;
pub mod index;
pub mod markup;
pub mod media;
pub mod outfile;
pub mod palette;
pub mod parser;
pub mod render;

// Re-export the main types at the crate root for convenience
pub use error::{ArchiveError, Result};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use threema2html::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{Config, ConfigLoad};
    pub use crate::error::{ArchiveError, Result};
    pub use crate::index::{FileEntry, FileIndex};
    pub use crate::markup::{apply_inline_styles, escape_html};
    pub use crate::media::MediaRef;
    pub use crate::palette::{SenderRegistry, assign_colors};
    pub use crate::parser::{ArchiveParser, ParseOutcome, RenderedMessage};
    pub use crate::render::render_document;
}
