use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::{BTreeMap, BTreeSet};

/// Key under which a directory's files are emitted in the JSON output.
pub const FILES_KEY: &str = "__files__";

pub const DEFAULT_ALLOWED_TOP_DIRS: &[&str] = &["app", "components", "lib", "types"];
pub const DEFAULT_TRACKED_EXTENSIONS: &[&str] = &[".ts", ".tsx", ".js"];

/// Represents the final configuration after merging presets and CLI args.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Directory names eligible for descent directly below the root
    pub allowed_top_dirs: BTreeSet<String>,
    /// Lowercase, dot-prefixed extensions whose content is embedded
    pub tracked_extensions: BTreeSet<String>,
    /// Glob patterns matched against root-relative paths
    pub exclude: Vec<String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            allowed_top_dirs: DEFAULT_ALLOWED_TOP_DIRS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            tracked_extensions: DEFAULT_TRACKED_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            exclude: Vec::new(),
        }
    }
}

impl RuntimeConfig {
    pub fn is_allowed_top_dir(&self, name: &str) -> bool {
        self.allowed_top_dirs.contains(name)
    }

    /// True if the content of `file_name` should be embedded.
    pub fn tracks(&self, file_name: &str) -> bool {
        extension_of(file_name).is_some_and(|ext| self.tracked_extensions.contains(&ext))
    }
}

/// Lowercased extension of a file name, including the leading dot.
///
/// Leading dots belong to the stem, so `.eslintrc` has no extension while
/// `.eslintrc.js` has `.js`.
pub fn extension_of(file_name: &str) -> Option<String> {
    let stem_start = file_name.len() - file_name.trim_start_matches('.').len();
    let rest = &file_name[stem_start..];
    rest.rfind('.')
        .map(|idx| rest[idx..].to_lowercase())
}

/// Normalizes a user supplied extension: `TSX`, `.tsx` and ` tsx ` all become `.tsx`.
pub fn normalize_extension(raw: &str) -> String {
    let trimmed = raw.trim().to_lowercase();
    if trimmed.starts_with('.') {
        trimmed
    } else {
        format!(".{}", trimmed)
    }
}

/// A single file discovered during the scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileEntry {
    /// Full text of a file with a tracked extension
    Content(String),
    /// Placeholder for files whose extension is not tracked
    NameOnly,
    /// A tracked file that could not be read, with the failure description
    Unreadable(String),
}

impl FileEntry {
    pub fn from_read(result: std::io::Result<String>) -> Self {
        match result {
            Ok(content) => FileEntry::Content(content),
            Err(err) => FileEntry::Unreadable(err.to_string()),
        }
    }
}

impl Serialize for FileEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FileEntry::Content(content) => serializer.serialize_str(content),
            FileEntry::NameOnly => serializer.serialize_none(),
            FileEntry::Unreadable(reason) => {
                serializer.collect_str(&format_args!("Error reading file: {}", reason))
            }
        }
    }
}

/// One directory of the filtered tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryNode {
    pub subdirs: BTreeMap<String, DirectoryNode>,
    pub files: BTreeMap<String, FileEntry>,
}

impl DirectoryNode {
    pub fn is_empty(&self) -> bool {
        self.subdirs.is_empty() && self.files.is_empty()
    }

    /// Number of directories below this node, not counting itself.
    pub fn dir_count(&self) -> usize {
        self.subdirs
            .values()
            .map(|child| 1 + child.dir_count())
            .sum()
    }

    pub fn file_count(&self) -> usize {
        self.files.len() + self.subdirs.values().map(DirectoryNode::file_count).sum::<usize>()
    }
}

#[cfg(test)]
impl DirectoryNode {
    /// Follows a `/` separated path of subdirectory names.
    pub(crate) fn get(&self, path: &str) -> Option<&DirectoryNode> {
        path.split('/')
            .filter(|part| !part.is_empty())
            .try_fold(self, |node, part| node.subdirs.get(part))
    }
}

impl Serialize for DirectoryNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let has_files = !self.files.is_empty();
        let mut map = serializer.serialize_map(Some(self.subdirs.len() + has_files as usize))?;
        if has_files {
            map.serialize_entry(FILES_KEY, &self.files)?;
        }
        for (name, child) in &self.subdirs {
            map.serialize_entry(name, child)?;
        }
        map.end()
    }
}
