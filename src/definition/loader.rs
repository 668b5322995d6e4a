//! Package tree discovery and definition loading

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::{COLLECTION_FILE, DEFINITION_FILE};
use crate::definition::error::DefinitionError;
use crate::definition::types::{Definition, Package, definition_file};

/// A package directory found in the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeEntry {
    /// Directory holding a `definition.yaml`
    Package(PathBuf),
    /// Directory holding a `collection.yaml`; never loaded
    Collection(PathBuf),
}

/// Walk `root` and list package directories in file-name order
///
/// A directory with a `collection.yaml` is reported as a collection even when
/// it also holds a `definition.yaml`. Unreadable entries below the root are
/// logged and skipped; a root that cannot be listed is an error.
pub fn discover(root: &Path) -> Result<Vec<TreeEntry>, DefinitionError> {
    let mut entries = Vec::new();

    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(source) if source.depth() == 0 => {
                return Err(DefinitionError::Tree {
                    path: root.to_path_buf(),
                    source,
                });
            }
            Err(e) => {
                warn!("Skipping unreadable tree entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }

        let dir = entry.into_path();
        if dir.join(COLLECTION_FILE).is_file() {
            entries.push(TreeEntry::Collection(dir));
        } else if dir.join(DEFINITION_FILE).is_file() {
            entries.push(TreeEntry::Package(dir));
        }
    }

    Ok(entries)
}

/// Load the definition stored in a package directory
pub fn load(dir: &Path) -> Result<Definition, DefinitionError> {
    let file = definition_file(dir);
    debug!("Loading definition {:?}", file);

    let content = fs::read_to_string(&file).map_err(|source| DefinitionError::Io {
        path: file.clone(),
        source,
    })?;
    let package: Package =
        serde_yaml::from_str(&content).map_err(|source| DefinitionError::Yaml {
            path: file.clone(),
            source,
        })?;

    Ok(Definition::new(package, dir))
}
