// src/document/mod.rs
//! Where bill text comes from. Text extraction itself happens upstream; this
//! module reads already-extracted page text.

use anyhow::{bail, Context, Result};
use glob::glob;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Page separator written by `pdftotext`.
pub const PAGE_BREAK: char = '\x0c';

/// A bill whose text is available page by page.
pub trait DocumentSource: Send + Sync {
    /// Name used in log events.
    fn name(&self) -> String;

    fn pages(&self) -> Result<Vec<String>>;
}

impl<T: DocumentSource + ?Sized> DocumentSource for Box<T> {
    fn name(&self) -> String {
        (**self).name()
    }

    fn pages(&self) -> Result<Vec<String>> {
        (**self).pages()
    }
}

/// A `.txt` file of extracted page text, pages separated by form feeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDocument {
    path: PathBuf,
}

impl TextDocument {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentSource for TextDocument {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn pages(&self) -> Result<Vec<String>> {
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        Ok(text.split(PAGE_BREAK).map(str::to_owned).collect())
    }
}

/// Concatenate pages, each followed by a newline. The first page is the cover
/// and carries no table unless `keep_first_page` is set. Empty pages are skipped.
pub fn body_text(pages: &[String], keep_first_page: bool) -> String {
    let skip = usize::from(!keep_first_page);
    let mut text = String::new();
    for page in pages.iter().skip(skip).filter(|p| !p.is_empty()) {
        text.push_str(page);
        text.push('\n');
    }
    text
}

/// All `*.txt` files directly under `dir`, in path order. Finding none is fatal.
pub fn discover_documents(dir: &Path) -> Result<Vec<TextDocument>> {
    let pattern = format!("{}/*.txt", dir.display());
    let mut paths: Vec<PathBuf> = glob(&pattern)
        .with_context(|| format!("Failed to read glob pattern '{}'", pattern))?
        .filter_map(|entry| entry.ok())
        .filter(|p| p.is_file())
        .collect();
    if paths.is_empty() {
        bail!("No bill text files found under '{}'", pattern);
    }
    paths.sort();
    Ok(paths.into_iter().map(TextDocument::new).collect())
}
