//! File discovery for finding candidate images in a source tree.

use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::config::DiscoveryConfig;

/// Discovers image files in directories.
pub struct FileDiscovery {
    config: DiscoveryConfig,
    exclude: Vec<PathBuf>,
}

/// Information about a discovered file.
#[derive(Debug, Clone)]
pub struct DiscoveredFile {
    /// Full path to the file
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
}

impl DiscoveredFile {
    /// The file name as a lossy string.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

impl FileDiscovery {
    /// Create a new file discovery instance.
    pub fn new(config: DiscoveryConfig) -> Self {
        Self {
            config,
            exclude: Vec::new(),
        }
    }

    /// Never descend into `dir` (typically the destination root when it
    /// sits inside the source tree).
    pub fn exclude(mut self, dir: &Path) -> Self {
        self.exclude.push(absolutize(dir));
        self
    }

    /// Discover all candidate image files at a path.
    ///
    /// If path is a file, returns it if supported.
    /// If path is a directory, recursively finds all supported files.
    pub fn discover(&self, path: &Path) -> Vec<DiscoveredFile> {
        if path.is_file() {
            if self.is_candidate(path) {
                if let Ok(meta) = std::fs::metadata(path) {
                    return vec![DiscoveredFile {
                        path: path.to_path_buf(),
                        size: meta.len(),
                    }];
                }
            }
            return vec![];
        }

        let mut files = Vec::new();

        for entry in WalkDir::new(path)
            .follow_links(self.config.follow_links)
            .into_iter()
            .filter_entry(|e| self.should_descend(e))
            .filter_map(|e| e.ok())
        {
            let entry_path = entry.path();
            if entry.file_type().is_file() && self.is_candidate(entry_path) {
                if let Ok(meta) = entry.metadata() {
                    files.push(DiscoveredFile {
                        path: entry_path.to_path_buf(),
                        size: meta.len(),
                    });
                }
            }
        }

        // Sort by path for deterministic ordering
        files.sort_by(|a, b| a.path.cmp(&b.path));
        tracing::debug!("Discovered {} candidate file(s) under {:?}", files.len(), path);
        files
    }

    /// Whether the walk should enter (or yield) this entry.
    fn should_descend(&self, entry: &DirEntry) -> bool {
        if !entry.file_type().is_dir() || entry.depth() == 0 {
            return true;
        }
        if self.config.skip_hidden_dirs && is_hidden(entry) {
            return false;
        }
        if !self.exclude.is_empty() {
            let dir = absolutize(entry.path());
            if self.exclude.iter().any(|ex| dir.starts_with(ex)) {
                tracing::debug!("Skipping excluded directory {:?}", entry.path());
                return false;
            }
        }
        true
    }

    /// Supported extension and not a thumbnail.
    fn is_candidate(&self, path: &Path) -> bool {
        self.is_supported(path) && !(self.config.skip_thumbnails && is_thumbnail(path))
    }

    /// Check if a file has a supported extension.
    fn is_supported(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                let ext_lower = ext.to_lowercase();
                self.config
                    .extensions
                    .iter()
                    .any(|fmt| fmt.trim_start_matches('.').to_lowercase() == ext_lower)
            })
            .unwrap_or(false)
    }

    /// Get total size of all discovered files.
    pub fn total_size(files: &[DiscoveredFile]) -> u64 {
        files.iter().map(|f| f.size).sum()
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.') && name != "." && name != "..")
        .unwrap_or(false)
}

fn is_thumbnail(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().to_lowercase().contains("thumbnail"))
        .unwrap_or(false)
}

/// Canonical form of `path` when it exists, otherwise an absolute form
/// built from the current directory.
pub(crate) fn absolutize(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
