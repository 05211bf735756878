//! Final HTML document assembly.
//!
//! Deterministic string building only: a fixed head template filled from
//! the configuration, one generated CSS rule per registered sender, then
//! every message fragment in input order. Messages are never re-ordered or
//! deduplicated, and the document is assembled completely in memory before
//! anything touches the filesystem.

use crate::config::Config;
use crate::palette::{SenderRegistry, assign_colors};
use crate::parser::RenderedMessage;

/// Assembles the complete HTML document.
///
/// The `<style>` block contains the configured base rules followed by one
/// rule per sender: class selector = sender token, `color` = the sender's
/// palette color, plus the configured per-message declarations. The
/// pre-seeded `"Me"` sender always gets a rule, present in the chat or
/// not.
pub fn render_document(
    messages: &[RenderedMessage],
    senders: &SenderRegistry,
    config: &Config,
) -> String {
    let mut style = String::new();
    for rule in &config.html_base_styles {
        style.push_str(rule);
        style.push('\n');
    }
    for (sender, color) in assign_colors(senders, &config.named_colors) {
        style.push_str(&format!(
            ".{sender} {{ color: {color}; {} }}\n",
            config.html_single_message_style
        ));
    }

    let body = messages
        .iter()
        .map(|m| m.html.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"{lang}\">\n\
         <head>\n\
         <meta charset=\"UTF-8\">\n\
         <title>{title}</title>\n\
         <style>\n{style}</style>\n\
         </head>\n\
         <body>\n{body}\n</body>\n\
         </html>\n",
        lang = config.html_primary_language,
        title = config.html_title,
    )
}
