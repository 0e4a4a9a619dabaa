//! Line-list parsing and basename resolution for `featured.txt` and
//! `carousel.txt`.
//!
//! Both files share one format: one entry per line, blank lines and lines
//! starting with `#` or `//` ignored. An entry containing a `/` is a path and
//! is used verbatim; anything else is a bare filename looked up by
//! case-insensitive basename against the manifest.
//!
//! ```text
//! # Hero picks
//! dawn.jpg                          → matched by basename
//! assets/gallery/full/dusk.jpg      → used as-is
//! // unused.jpg                     → ignored
//! ```

use crate::types::PhotoItem;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

/// Split a list file into meaningful entries.
///
/// Lines are trimmed; empty lines and comment lines are dropped.
pub fn parse_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !is_comment_or_empty(line))
        .map(String::from)
        .collect()
}

fn is_comment_or_empty(line: &str) -> bool {
    line.is_empty() || line.starts_with('#') || line.starts_with("//")
}

/// Read and parse a list file.
pub fn read_lines(path: &Path) -> io::Result<Vec<String>> {
    let text = fs::read_to_string(path)?;
    Ok(parse_lines(&text))
}

/// Final path segment of a `/`-separated path.
pub fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Case-insensitive basename → photo lookup.
///
/// When two photos share a basename the first one in manifest order wins.
#[derive(Debug, Default)]
pub struct BasenameIndex<'a> {
    by_name: HashMap<String, &'a PhotoItem>,
}

impl<'a> BasenameIndex<'a> {
    pub fn build<I>(photos: I) -> Self
    where
        I: IntoIterator<Item = &'a PhotoItem>,
    {
        let mut by_name = HashMap::new();
        for photo in photos {
            if photo.src.is_empty() {
                continue;
            }
            by_name
                .entry(basename(&photo.src).to_lowercase())
                .or_insert(photo);
        }
        Self { by_name }
    }

    pub fn get(&self, name: &str) -> Option<&'a PhotoItem> {
        self.by_name.get(&name.to_lowercase()).copied()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// How a single list entry was resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved<'a> {
    /// The entry contained a path separator and is used unchanged.
    Verbatim(String),
    /// The entry was a bare filename that matched a manifest photo.
    Matched(&'a PhotoItem),
}

impl Resolved<'_> {
    /// Source path of the resolved entry.
    pub fn src(&self) -> &str {
        match self {
            Resolved::Verbatim(path) => path,
            Resolved::Matched(photo) => &photo.src,
        }
    }
}

/// Outcome of resolving a list: entries in list order plus the lines that
/// matched nothing.
#[derive(Debug, Default)]
pub struct Selection<'a> {
    pub entries: Vec<Resolved<'a>>,
    pub missing: Vec<String>,
}

/// Resolve list entries against the manifest.
///
/// Unresolvable entries are skipped with a warning naming `list_name`;
/// they never abort the rest of the list.
pub fn resolve_lines<'a>(
    lines: &[String],
    index: &BasenameIndex<'a>,
    list_name: &str,
) -> Selection<'a> {
    let mut selection = Selection::default();
    for line in lines {
        if line.contains('/') {
            selection.entries.push(Resolved::Verbatim(line.clone()));
        } else if let Some(photo) = index.get(line) {
            selection.entries.push(Resolved::Matched(photo));
        } else {
            log::warn!("{list_name} item not found in manifest: {line}");
            selection.missing.push(line.clone());
        }
    }
    selection
}
