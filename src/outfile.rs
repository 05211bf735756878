//! Output file naming.
//!
//! The generated document is written next to the archive as
//! `threema-<timestamp>.html`, where the timestamp is the current UTC time
//! with every non-digit character replaced by a dash. A fresh name per run
//! keeps reruns from clobbering an earlier export.

use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};

/// Stem prefix of generated output files.
const OUTPUT_PREFIX: &str = "threema";

/// Returns the output path for a run started at `now`, inside `dir`.
pub fn output_path_at(dir: &Path, now: DateTime<Utc>) -> PathBuf {
    let stamp: String = now
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .trim_end_matches('Z')
        .chars()
        .map(|c| if c.is_ascii_digit() { c } else { '-' })
        .collect();
    dir.join(format!("{OUTPUT_PREFIX}-{stamp}.html"))
}

/// Returns the output path for a run started now.
pub fn output_path(dir: &Path) -> PathBuf {
    output_path_at(dir, Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_output_path_shape() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 30, 45).unwrap();
        let path = output_path_at(Path::new("/chat"), now);
        assert_eq!(
            path,
            Path::new("/chat/threema-2024-06-15-12-30-45-000.html")
        );
    }

    #[test]
    fn test_output_path_only_digits_and_dashes_in_stamp() {
        let path = output_path(Path::new("/chat"));
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        let stamp = name
            .strip_prefix("threema-")
            .unwrap()
            .strip_suffix(".html")
            .unwrap();
        assert!(stamp.chars().all(|c| c.is_ascii_digit() || c == '-'));
    }
}
