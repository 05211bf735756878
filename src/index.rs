//! Case-insensitive file index over an unpacked archive directory.
//!
//! Threema media placeholders name files by basename only, while the files
//! themselves may sit anywhere below the archive folder. [`FileIndex`]
//! enumerates every regular file under a root directory once, up front, and
//! answers case-insensitive basename lookups during parsing.
//!
//! Entries are sorted the way a file manager would list them: natural
//! (numeric-aware) ascending order by file stem, ignoring case. The sort is
//! stable, so files with identical basenames in different subdirectories
//! keep their traversal order and the first one wins a lookup.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use mime_guess::mime::Mime;
use walkdir::WalkDir;

use crate::error::{ArchiveError, Result};

/// One file discovered below the archive root.
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Full path to the file.
    pub path: PathBuf,
    /// Basename including extension, as found on disk.
    pub file_name: String,
    /// File stem (basename without extension); the sort key.
    pub stem: String,
    /// Lowercased basename; the lookup key.
    pub base_lower: String,
    /// Content type guessed from the extension, if any.
    pub content_type: Option<Mime>,
}

/// Case-insensitive basename index of all files under one directory tree.
///
/// # Example
///
/// ```rust,no_run
/// use threema2html::index::FileIndex;
///
/// let index = FileIndex::build("chat_export/".as_ref())?;
/// if let Some(entry) = index.lookup("Photo.JPG") {
///     println!("{}", entry.path.display());
/// }
/// # Ok::<(), threema2html::ArchiveError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FileIndex {
    entries: Vec<FileEntry>,
}

impl FileIndex {
    /// Recursively enumerates all regular files under `root`.
    ///
    /// Directories are recursed into but not listed. Traversal order is made
    /// deterministic by sorting directory contents by name, and the final
    /// list is stable-sorted naturally by stem.
    ///
    /// # Errors
    ///
    /// Any unreadable directory below `root` (including `root` itself)
    /// aborts the build; a partial listing is never returned.
    pub fn build(root: &Path) -> Result<Self> {
        let mut entries = Vec::new();

        for item in WalkDir::new(root).sort_by_file_name() {
            let item = item.map_err(|e| {
                let path = e.path().map_or_else(|| root.to_path_buf(), Path::to_path_buf);
                match e.into_io_error() {
                    Some(io) => ArchiveError::file_system(path, io),
                    None => ArchiveError::file_system(path, std::io::Error::other("filesystem loop")),
                }
            })?;

            if !item.file_type().is_file() {
                continue;
            }

            let path = item.path().to_path_buf();
            let file_name = item.file_name().to_string_lossy().into_owned();
            let stem = path
                .file_stem()
                .map_or_else(String::new, |s| s.to_string_lossy().into_owned());
            let base_lower = file_name.to_lowercase();
            let content_type = mime_guess::from_path(&path).first();

            entries.push(FileEntry {
                path,
                file_name,
                stem,
                base_lower,
                content_type,
            });
        }

        entries.sort_by(|a, b| natural_cmp(&a.stem, &b.stem));

        Ok(Self { entries })
    }

    /// Finds a file by basename, ignoring case.
    ///
    /// Returns the first match in index order; duplicate basenames under
    /// different subdirectories are not an error.
    pub fn lookup(&self, file_name: &str) -> Option<&FileEntry> {
        let wanted = file_name.to_lowercase();
        self.entries.iter().find(|e| e.base_lower == wanted)
    }

    /// Returns all indexed entries in sorted order.
    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    /// Returns the number of indexed files.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no files were found.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Natural string comparison: case-insensitive, digit runs compared as
/// numbers, so `img2` sorts before `img10`.
fn natural_cmp(a: &str, b: &str) -> Ordering {
    let a: Vec<char> = a.chars().flat_map(char::to_lowercase).collect();
    let b: Vec<char> = b.chars().flat_map(char::to_lowercase).collect();
    let (mut i, mut j) = (0, 0);

    while i < a.len() && j < b.len() {
        if a[i].is_ascii_digit() && b[j].is_ascii_digit() {
            let ai = i;
            let bj = j;
            while i < a.len() && a[i].is_ascii_digit() {
                i += 1;
            }
            while j < b.len() && b[j].is_ascii_digit() {
                j += 1;
            }
            // compare digit runs numerically: strip leading zeros, then by
            // length, then lexicographically
            let run_a: &[char] = &a[ai..i];
            let run_b: &[char] = &b[bj..j];
            let trim_a = run_a.iter().position(|c| *c != '0').unwrap_or(run_a.len());
            let trim_b = run_b.iter().position(|c| *c != '0').unwrap_or(run_b.len());
            let num_a = &run_a[trim_a..];
            let num_b = &run_b[trim_b..];
            let ord = num_a
                .len()
                .cmp(&num_b.len())
                .then_with(|| num_a.cmp(num_b));
            if ord != Ordering::Equal {
                return ord;
            }
        } else {
            let ord = a[i].cmp(&b[j]);
            if ord != Ordering::Equal {
                return ord;
            }
            i += 1;
            j += 1;
        }
    }

    (a.len() - i).cmp(&(b.len() - j))
}
