use crate::app::models::{DirectoryNode, FileEntry, RuntimeConfig, FILES_KEY};
use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::{DirEntry, WalkBuilder};
use pathdiff::diff_paths;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Builds the filtered, content-annotated tree below a root directory.
pub struct Scanner<'a> {
    root: PathBuf,
    config: &'a RuntimeConfig,
    exclude_set: GlobSet,
}

enum EntryKind {
    Dir,
    File,
    Skip,
}

impl<'a> Scanner<'a> {
    pub fn new(root: PathBuf, config: &'a RuntimeConfig) -> Result<Self> {
        Ok(Self {
            root,
            config,
            exclude_set: build_globset(&config.exclude)?,
        })
    }

    /// Walks the root and returns its tree. Per-file and per-directory
    /// failures are recorded or logged, never returned.
    pub fn scan(&self) -> DirectoryNode {
        self.visit(&self.root, 0).unwrap_or_default()
    }

    /// Returns `None` when the directory contributes nothing: it lies outside
    /// the allowed top-level directories or could not be listed.
    fn visit(&self, dir: &Path, depth: usize) -> Option<DirectoryNode> {
        if depth > 0 && !self.within_allowed_top_dir(dir) {
            log::debug!("Not descending into {}", dir.display());
            return None;
        }

        let children = match self.list_children(dir) {
            Ok(children) => children,
            Err(err) => {
                log::warn!("Skipping unreadable directory {}: {}", dir.display(), err);
                return None;
            }
        };

        let mut node = DirectoryNode::default();
        for entry in children {
            let name = entry.file_name().to_string_lossy().into_owned();
            let path = entry.path();

            if self.is_excluded(path) {
                log::debug!("Excluded {}", path.display());
                continue;
            }

            match kind_of(&entry) {
                EntryKind::Dir => {
                    if depth == 0 && !self.config.is_allowed_top_dir(&name) {
                        log::debug!("Pruned top-level directory {}", name);
                        continue;
                    }
                    // Would clash with the file group key in the JSON output
                    if name == FILES_KEY {
                        log::warn!("Skipping directory {} named {}", path.display(), FILES_KEY);
                        continue;
                    }
                    if let Some(child) = self.visit(path, depth + 1) {
                        node.subdirs.insert(name, child);
                    }
                }
                EntryKind::File => {
                    let file_entry = self.read_entry(path, &name);
                    node.files.insert(name, file_entry);
                }
                EntryKind::Skip => {}
            }
        }

        Some(node)
    }

    /// Lists the direct children of `dir`, sorted by name.
    fn list_children(&self, dir: &Path) -> std::result::Result<Vec<DirEntry>, ignore::Error> {
        // Standard filters off: every file is reported, hidden or gitignored
        let walker = WalkBuilder::new(dir)
            .standard_filters(false)
            .follow_links(false)
            .max_depth(Some(1))
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        let mut children = Vec::new();
        for result in walker {
            match result {
                Ok(entry) if entry.depth() == 0 => {}
                Ok(entry) => children.push(entry),
                // Depth 0 means the directory itself could not be read
                Err(err) if err.depth() == Some(0) => return Err(err),
                Err(err) => log::warn!("Error walking entry: {}", err),
            }
        }
        Ok(children)
    }

    fn read_entry(&self, path: &Path, name: &str) -> FileEntry {
        if !self.config.tracks(name) {
            return FileEntry::NameOnly;
        }
        let entry = FileEntry::from_read(fs::read_to_string(path));
        if let FileEntry::Unreadable(reason) = &entry {
            log::warn!("Failed to read {}: {}", path.display(), reason);
        }
        entry
    }

    fn within_allowed_top_dir(&self, dir: &Path) -> bool {
        let Some(relative) = diff_paths(dir, &self.root) else {
            return false;
        };
        match relative.components().next() {
            Some(Component::Normal(top)) => top
                .to_str()
                .is_some_and(|name| self.config.is_allowed_top_dir(name)),
            _ => false,
        }
    }

    fn is_excluded(&self, path: &Path) -> bool {
        if self.exclude_set.is_empty() {
            return false;
        }
        diff_paths(path, &self.root).is_some_and(|relative| self.exclude_set.is_match(relative))
    }
}

/// Convenience wrapper: builds the tree for `root` in one call.
pub fn build_tree(root: &Path, config: &RuntimeConfig) -> Result<DirectoryNode> {
    Ok(Scanner::new(root.to_path_buf(), config)?.scan())
}

fn kind_of(entry: &DirEntry) -> EntryKind {
    match entry.file_type() {
        Some(ft) if ft.is_dir() => EntryKind::Dir,
        // Linked directories are neither followed nor listed
        Some(ft) if ft.is_symlink() && entry.path().is_dir() => EntryKind::Skip,
        Some(_) => EntryKind::File,
        None => EntryKind::Skip,
    }
}

/// Helper to build efficient glob sets
fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        builder.add(Glob::new(pat).context(format!("Invalid glob pattern: {}", pat))?);
    }
    Ok(builder.build()?)
}
