use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Catalog contract
// ---------------------------------------------------------------------------

/// A dataset known to the catalog and the directory holding its files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetEntry {
    pub name: String,
    pub root: PathBuf,
}

impl DatasetEntry {
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
        }
    }
}

/// Read-only source of dataset identifiers and their roots.
pub trait DatasetCatalog {
    /// All known datasets.
    fn list(&self) -> Vec<DatasetEntry>;

    /// Root directory of `id`, or `None` when the catalog does not know it.
    fn resolve(&self, id: &str) -> Option<PathBuf> {
        self.list()
            .into_iter()
            .find(|entry| entry.name == id)
            .map(|entry| entry.root)
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("cannot read catalog {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

// ---------------------------------------------------------------------------
// Catalog – a fixed list of datasets
// ---------------------------------------------------------------------------

/// A catalog snapshot loaded once and kept in memory.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<DatasetEntry>,
}

/// One record of a JSON catalog file.
///
/// ```json
/// [
///   { "df": "Dataset1", "fs_prefix": "/data/assembly" },
///   { "name": "Dataset2", "fs_prefix": "/data/other" }
/// ]
/// ```
#[derive(Debug, Deserialize)]
struct CatalogRecord {
    #[serde(alias = "name")]
    df: String,
    fs_prefix: PathBuf,
}

impl Catalog {
    /// Build a catalog from entries; later duplicates of a name are dropped.
    pub fn from_entries(entries: Vec<DatasetEntry>) -> Self {
        let mut unique: Vec<DatasetEntry> = Vec::with_capacity(entries.len());
        for entry in entries {
            if unique.iter().any(|e| e.name == entry.name) {
                log::warn!("duplicate dataset '{}' ignored", entry.name);
                continue;
            }
            unique.push(entry);
        }
        Self { entries: unique }
    }

    /// Load a JSON catalog. Each dataset lives at `<fs_prefix>/<df>`.
    pub fn from_json_file(path: &Path) -> Result<Self, CatalogError> {
        let text = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let records: Vec<CatalogRecord> =
            serde_json::from_str(&text).map_err(|source| CatalogError::Json {
                path: path.to_path_buf(),
                source,
            })?;

        let entries = records
            .into_iter()
            .map(|rec| {
                let root = rec.fs_prefix.join(&rec.df);
                DatasetEntry::new(rec.df, root)
            })
            .collect();
        let catalog = Self::from_entries(entries);
        log::info!(
            "loaded {} datasets from {}",
            catalog.entries.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Treat every subdirectory of `dir` as a dataset of the same name.
    ///
    /// A missing directory gives an empty catalog.
    pub fn from_prefix_dir(dir: &Path) -> Result<Self, CatalogError> {
        if !dir.is_dir() {
            log::warn!("dataset directory {} does not exist", dir.display());
            return Ok(Self::default());
        }
        let read_dir = fs::read_dir(dir).map_err(|source| CatalogError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut entries: Vec<DatasetEntry> = read_dir
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .filter_map(|path| {
                let name = path.file_name()?.to_string_lossy().into_owned();
                Some(DatasetEntry::new(name, path))
            })
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        log::info!("found {} datasets under {}", entries.len(), dir.display());
        Ok(Self::from_entries(entries))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl DatasetCatalog for Catalog {
    fn list(&self) -> Vec<DatasetEntry> {
        self.entries.clone()
    }

    fn resolve(&self, id: &str) -> Option<PathBuf> {
        self.entries
            .iter()
            .find(|entry| entry.name == id)
            .map(|entry| entry.root.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    #[test]
    fn resolve_unknown_is_none() {
        let catalog = Catalog::from_entries(vec![DatasetEntry::new("D1", "/data/D1")]);
        assert_eq!(catalog.resolve("D1"), Some(PathBuf::from("/data/D1")));
        assert_eq!(catalog.resolve("D2"), None);
    }

    #[test]
    fn first_duplicate_wins() {
        let catalog = Catalog::from_entries(vec![
            DatasetEntry::new("D1", "/a"),
            DatasetEntry::new("D1", "/b"),
        ]);
        assert_eq!(catalog.list().len(), 1);
        assert_eq!(catalog.resolve("D1"), Some(PathBuf::from("/a")));
    }

    #[test]
    fn json_catalog_joins_prefix_and_name() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("datasets.json");
        fs::write(
            &path,
            r#"[
                {"df": "Dataset1", "fs_prefix": "/data/runs"},
                {"name": "Dataset2", "fs_prefix": "/mnt"}
            ]"#,
        )
        .unwrap();

        let catalog = Catalog::from_json_file(&path).unwrap();
        let names: Vec<_> = catalog.list().into_iter().map(|e| e.name).collect();
        assert_eq!(names, ["Dataset1", "Dataset2"]);
        assert_eq!(
            catalog.resolve("Dataset1"),
            Some(PathBuf::from("/data/runs/Dataset1"))
        );
        assert_eq!(catalog.resolve("Dataset2"), Some(PathBuf::from("/mnt/Dataset2")));
    }

    #[test]
    fn invalid_json_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("datasets.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            Catalog::from_json_file(&path),
            Err(CatalogError::Json { .. })
        ));
        assert!(matches!(
            Catalog::from_json_file(&dir.path().join("missing.json")),
            Err(CatalogError::Io { .. })
        ));
    }

    #[test]
    fn prefix_dir_lists_subdirectories_sorted() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("beta")).unwrap();
        fs::create_dir(dir.path().join("alpha")).unwrap();
        fs::write(dir.path().join("stray.txt"), "").unwrap();

        let catalog = Catalog::from_prefix_dir(dir.path()).unwrap();
        let names: Vec<_> = catalog.list().into_iter().map(|e| e.name).collect();
        assert_eq!(names, ["alpha", "beta"]);
        assert_eq!(catalog.resolve("beta"), Some(dir.path().join("beta")));
    }

    #[test]
    fn missing_prefix_dir_is_empty() {
        let dir = TempDir::new().unwrap();
        let catalog = Catalog::from_prefix_dir(&dir.path().join("nope")).unwrap();
        assert!(catalog.is_empty());
    }
}
