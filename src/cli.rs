//! Command-line interface definition using clap.

use std::path::PathBuf;

use clap::Parser;

/// Convert an unpacked Threema chat archive into a single HTML file with
/// all media files embedded as images, players or links.
#[derive(Parser, Debug, Clone)]
#[command(name = "threema2html")]
#[command(version, about, long_about = None)]
#[command(after_help = "PREPARING AN ARCHIVE:
    1. In Threema, select the chat and choose \"Archive chat\".
    2. Copy the resulting archive file to your PC.
    3. Unpack it into a new, empty folder (it is a password protected zip).
    4. Run this program with that folder as the directory argument.

CONFIGURATION:
    An optional JSON file 'threema2html.config' can override rendering
    defaults (title, language, styles, colors, messages filename). The
    first file found in the target directory, the current directory or
    next to the executable is used; without one, built-in defaults apply.

EXAMPLES:
    threema2html
    threema2html ~/chats/family
    threema2html ~/chats/family messages.txt
    threema2html ~/chats/family -o family.html")]
pub struct Args {
    /// Path to the folder containing the extracted Threema files
    #[arg(default_value = ".")]
    pub directory: PathBuf,

    /// Name of the messages file (default: from configuration)
    pub messages_filename: Option<String>,

    /// Write the HTML document to this path instead of a generated
    /// timestamped file inside the directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["threema2html"]);
        assert_eq!(args.directory, PathBuf::from("."));
        assert!(args.messages_filename.is_none());
        assert!(args.output.is_none());
    }

    #[test]
    fn test_positionals() {
        let args = Args::parse_from(["threema2html", "/chat", "msgs.txt"]);
        assert_eq!(args.directory, PathBuf::from("/chat"));
        assert_eq!(args.messages_filename.as_deref(), Some("msgs.txt"));
    }

    #[test]
    fn test_output_flag() {
        let args = Args::parse_from(["threema2html", "/chat", "-o", "out.html"]);
        assert_eq!(args.output, Some(PathBuf::from("out.html")));
    }
}
