//! Conversion configuration and `.config` overlay files.
//!
//! All rendering knobs live in [`Config`]: the default messages filename,
//! the HTML document language and title, the base CSS rules, the
//! per-message style string and the sender color palette.
//!
//! A JSON file named `<program>.config` can override any subset of keys.
//! The first existing file in the candidate directory list wins (target
//! directory, then current directory, then the executable's directory).
//! A malformed file — not a JSON object, an unknown key, a wrong value
//! type — never aborts the run: the loader reports a warning and falls
//! back to the built-in defaults wholesale.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Extension of the optional configuration file next to the program or the
/// chat folder.
pub const CONFIG_FILE_EXTENSION: &str = ".config";

/// Rendering and lookup configuration.
///
/// Construct with [`Config::default`] and optionally overlay a parsed
/// `.config` file with [`Config::merged`]. The value is built once and
/// passed by reference into the parser and renderer; nothing mutates it
/// afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Default basename of the Threema messages text file.
    pub messages_filename: String,

    /// `lang` attribute of the generated document.
    pub html_primary_language: String,

    /// `<title>` of the generated document.
    pub html_title: String,

    /// Raw CSS rules copied verbatim into the `<style>` block.
    pub html_base_styles: Vec<String>,

    /// Declarations appended to every generated per-sender rule.
    pub html_single_message_style: String,

    /// Sender color palette, assigned in first-appearance order.
    pub named_colors: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            messages_filename: "messages.txt".to_string(),
            html_primary_language: "de".to_string(),
            html_title: "Threema".to_string(),
            html_base_styles: [
                "body{ font-family:Arial,Helvetica,sans-serif; }",
                "img{ width:100%; max-width:500px; }",
                ".bold { font-weight: bold; }",
                ".italics { font-style: italic; }",
                ".strikethrough { text-decoration: line-through; }",
                ".prefix { font-style: italic; font-size:x-small; }",
            ]
            .iter()
            .map(|s| (*s).to_string())
            .collect(),
            html_single_message_style:
                "margin-top: 15px; margin-bottom: 0px; margin-right: 0px; margin-left: 0px;"
                    .to_string(),
            named_colors: [
                "FireBrick", "DarkBlue", "Green", "Purple", "Maroon", "AliceBlue",
                "AntiqueWhite", "Aqua", "Aquamarine", "Azure", "Beige", "Bisque", "Black",
                "BlanchedAlmond", "Blue", "BlueViolet", "Brown", "BurlyWood", "CadetBlue",
                "Chartreuse", "Chocolate", "Coral", "CornflowerBlue", "Cornsilk", "Crimson",
                "Cyan", "DarkCyan", "DarkGoldenRod", "DarkGray", "DarkGrey", "DarkGreen",
                "DarkKhaki", "DarkMagenta", "DarkOliveGreen", "DarkOrange", "DarkOrchid",
                "DarkRed", "DarkSalmon", "DarkSeaGreen", "DarkSlateBlue", "DarkSlateGray",
                "DarkSlateGrey", "DarkTurquoise", "DarkViolet", "DeepPink", "DeepSkyBlue",
                "DimGray", "DimGrey", "DodgerBlue", "FloralWhite", "ForestGreen", "Fuchsia",
                "Gainsboro", "GhostWhite", "Gold", "GoldenRod", "Gray", "Grey", "GreenYellow",
                "HoneyDew", "HotPink", "IndianRed", "Indigo", "Ivory", "Khaki", "Lavender",
                "LavenderBlush", "LawnGreen", "LemonChiffon", "LightBlue", "LightCoral",
                "LightCyan", "LightGoldenRodYellow", "LightGray", "LightGrey", "LightGreen",
                "LightPink", "LightSalmon", "LightSeaGreen", "LightSkyBlue", "LightSlateGray",
                "LightSlateGrey", "LightSteelBlue", "LightYellow", "Lime", "LimeGreen",
                "Linen", "Magenta", "MediumAquaMarine", "MediumBlue", "MediumOrchid",
                "MediumPurple", "MediumSeaGreen", "MediumSlateBlue", "MediumSpringGreen",
                "MediumTurquoise", "MediumVioletRed", "MidnightBlue", "MintCream",
                "MistyRose", "Moccasin", "NavajoWhite", "Navy", "OldLace", "Olive",
                "OliveDrab", "Orange", "OrangeRed", "Orchid", "PaleGoldenRod", "PaleGreen",
                "PaleTurquoise", "PaleVioletRed", "PapayaWhip", "PeachPuff", "Peru", "Pink",
                "Plum", "PowderBlue", "RebeccaPurple", "Red", "RosyBrown", "RoyalBlue",
                "SaddleBrown", "Salmon", "SandyBrown", "SeaGreen", "SeaShell", "Sienna",
                "Silver", "SkyBlue", "SlateBlue", "SlateGray", "SlateGrey", "Snow",
                "SpringGreen", "SteelBlue", "Tan", "Teal", "Thistle", "Tomato", "Turquoise",
                "Violet", "Wheat", "White", "WhiteSmoke", "Yellow", "YellowGreen",
            ]
            .iter()
            .map(|s| (*s).to_string())
            .collect(),
        }
    }
}

/// Partial configuration parsed from a `.config` file.
///
/// Every field is optional; present fields replace the corresponding
/// default. Unknown keys are rejected so a typo cannot silently do
/// nothing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigOverlay {
    pub messages_filename: Option<String>,
    pub html_primary_language: Option<String>,
    pub html_title: Option<String>,
    pub html_base_styles: Option<Vec<String>>,
    pub html_single_message_style: Option<String>,
    pub named_colors: Option<Vec<String>>,
}

/// Why a configuration file was rejected.
#[derive(Debug, Error)]
#[error("does not contain a valid JSON configuration object: {0}")]
pub struct ConfigError(#[from] serde_json::Error);

/// Result of a configuration lookup.
#[derive(Debug)]
pub struct ConfigLoad {
    /// The effective configuration.
    pub config: Config,
    /// The file the overlay came from, when one was accepted.
    pub source: Option<PathBuf>,
    /// Non-fatal problem with a file that was found but rejected.
    pub warning: Option<String>,
}

/// Parses overlay JSON. Pure; no filesystem access.
///
/// Rejects anything that is not a JSON object, any unknown key and any
/// wrong value type for a known key.
pub fn parse_overlay(text: &str) -> Result<ConfigOverlay, ConfigError> {
    Ok(serde_json::from_str(text)?)
}

impl Config {
    /// Returns `self` with every field present in `overlay` replaced.
    #[must_use]
    pub fn merged(mut self, overlay: ConfigOverlay) -> Self {
        if let Some(v) = overlay.messages_filename {
            self.messages_filename = v;
        }
        if let Some(v) = overlay.html_primary_language {
            self.html_primary_language = v;
        }
        if let Some(v) = overlay.html_title {
            self.html_title = v;
        }
        if let Some(v) = overlay.html_base_styles {
            self.html_base_styles = v;
        }
        if let Some(v) = overlay.html_single_message_style {
            self.html_single_message_style = v;
        }
        if let Some(v) = overlay.named_colors {
            self.named_colors = v;
        }
        self
    }

    /// Loads the configuration for a run targeting `target_dir`.
    ///
    /// Searches the candidate directories for the first existing
    /// `<program>.config` file. No file at all is not a warning; a file
    /// that cannot be read or parsed is.
    pub fn load(target_dir: &Path) -> ConfigLoad {
        for dir in candidate_dirs(target_dir) {
            let candidate = dir.join(config_file_name());
            if candidate.is_file() {
                return Config::load_from_file(&candidate);
            }
        }

        ConfigLoad {
            config: Config::default(),
            source: None,
            warning: None,
        }
    }

    /// Loads the configuration from one specific overlay file.
    pub fn load_from_file(path: &Path) -> ConfigLoad {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                return ConfigLoad {
                    config: Config::default(),
                    source: None,
                    warning: Some(format!(
                        "configuration file '{}' not readable: {e}; using default configuration values",
                        path.display()
                    )),
                };
            }
        };

        match parse_overlay(&text) {
            Ok(overlay) => ConfigLoad {
                config: Config::default().merged(overlay),
                source: Some(path.to_path_buf()),
                warning: None,
            },
            Err(e) => ConfigLoad {
                config: Config::default(),
                source: None,
                warning: Some(format!(
                    "configuration file '{}' {e}; using default configuration values",
                    path.display()
                )),
            },
        }
    }
}

/// Basename of the configuration file, derived from the executable name.
pub fn config_file_name() -> String {
    let stem = env::current_exe()
        .ok()
        .and_then(|p| p.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());
    format!("{stem}{CONFIG_FILE_EXTENSION}")
}

/// Directories searched for a configuration file, in order: the target
/// directory, the current directory, the executable's directory.
/// Duplicates are removed while keeping the first occurrence.
pub fn candidate_dirs(target_dir: &Path) -> Vec<PathBuf> {
    let mut dirs = vec![target_dir.to_path_buf()];
    if let Ok(cwd) = env::current_dir() {
        dirs.push(cwd);
    }
    if let Some(exe_dir) = env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
    {
        dirs.push(exe_dir);
    }

    let mut seen: Vec<PathBuf> = Vec::new();
    for dir in dirs {
        let canonical = dir.canonicalize().unwrap_or_else(|_| dir.clone());
        if !seen.iter().any(|s| *s == canonical) {
            seen.push(canonical);
        }
    }
    seen
}
