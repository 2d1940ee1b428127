use crate::error::{Result, ScanError};
use ignore::WalkBuilder;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// Walker settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanOptions {
    /// Honour `.gitignore`, global git excludes and `.git/info/exclude`
    pub respect_gitignore: bool,

    /// Descend into hidden directories and pick up hidden files
    pub include_hidden: bool,

    /// Skip files larger than this
    pub max_file_size_bytes: Option<u64>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            respect_gitignore: false,
            include_hidden: true,
            max_file_size_bytes: None,
        }
    }
}

/// Scanner for finding Go source files in a project
pub struct FileScanner {
    root: PathBuf,
    options: ScanOptions,
}

impl FileScanner {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            options: ScanOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ScanOptions) -> Self {
        self.options = options;
        self
    }

    /// Eligible files in walk order (sorted by file name per directory)
    ///
    /// Any walk error aborts the scan.
    pub fn scan(&self) -> Result<Vec<PathBuf>> {
        if !self.root.is_dir() {
            return Err(ScanError::InvalidRoot(self.root.clone()));
        }

        let root = self.root.clone();
        let mut builder = WalkBuilder::new(&self.root);
        builder
            .standard_filters(false)
            .hidden(!self.options.include_hidden)
            .git_ignore(self.options.respect_gitignore)
            .git_global(self.options.respect_gitignore)
            .git_exclude(self.options.respect_gitignore)
            .require_git(false)
            .sort_by_file_name(|a, b| a.cmp(b));
        builder.filter_entry(move |entry| !FileScanner::is_vendored(entry.path(), &root));

        let mut files = Vec::new();
        for result in builder.build() {
            let entry = result?;
            let Some(file_type) = entry.file_type() else {
                continue;
            };
            if !file_type.is_file() {
                continue;
            }

            let path = entry.path();
            if !Self::is_source_file(path) {
                continue;
            }

            if let Some(limit) = self.options.max_file_size_bytes {
                let len = entry.metadata()?.len();
                if len > limit {
                    log::debug!(
                        "Skipping large file {} ({} bytes > {})",
                        path.display(),
                        len,
                        limit
                    );
                    continue;
                }
            }

            files.push(path.to_path_buf());
        }

        log::info!("Found {} source files", files.len());
        Ok(files)
    }

    /// `.go` files that are not tests
    fn is_source_file(path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            return false;
        };
        if name.ends_with("_test.go") {
            log::debug!("Skipping test file {}", path.display());
            return false;
        }
        path.extension().and_then(|ext| ext.to_str()) == Some("go")
    }

    fn is_vendored(path: &Path, root: &Path) -> bool {
        let Ok(relative) = path.strip_prefix(root) else {
            return false;
        };
        let vendored = relative
            .components()
            .any(|component| matches!(component, Component::Normal(name) if name == "vendor"));
        if vendored {
            log::debug!("Skipping vendored path {}", path.display());
        }
        vendored
    }
}
