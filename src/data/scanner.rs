use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::model::{ReadCount, ReadCountTable, COLUMNS};

/// Directory under a dataset root holding one subdirectory per sample set.
pub const SAMPLE_SETS_DIR: &str = "sample_sets";

/// Extension marking a file as a table inside a sample-set directory.
pub const TABLE_EXTENSION: &str = ".tsv";

/// Location of the read-count table relative to a sample-set directory.
const READ_COUNT_FILE: [&str; 2] = ["count", "reads_and_basepairs.tsv"];

#[derive(Debug, Error)]
pub enum ScanError {
    /// The table exists but could not be read against the expected schema.
    #[error("malformed read-count table {}: {source}", .path.display())]
    MalformedTable {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    /// The header lacks required columns; an empty file has no header at all.
    #[error("read-count table {} is missing columns {}", .path.display(), .missing.join(", "))]
    MissingColumns { path: PathBuf, missing: Vec<String> },
}

// ---------------------------------------------------------------------------
// Sample-set discovery
// ---------------------------------------------------------------------------

/// List the sample sets of a dataset.
///
/// A sample set is an immediate subdirectory of `<root>/sample_sets/` that
/// holds at least one `.tsv` file. The directory name is used verbatim.
/// A missing `sample_sets` directory is not an error: the dataset simply has
/// no sample sets. Order follows directory enumeration.
pub fn discover_sample_sets(root: &Path) -> Vec<String> {
    let dir = root.join(SAMPLE_SETS_DIR);
    if !dir.is_dir() {
        log::debug!("no sample sets under {}", dir.display());
        return Vec::new();
    }

    let entries = match fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("cannot list {}: {e}", dir.display());
            return Vec::new();
        }
    };

    let mut names = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::debug!("skipping unreadable entry in {}: {e}", dir.display());
                continue;
            }
        };
        let path = entry.path();
        if !path.is_dir() || !contains_table(&path) {
            continue;
        }
        push_unique(&mut names, entry.file_name().to_string_lossy().into_owned());
    }
    names
}

/// Whether `dir` directly contains a file ending in [`TABLE_EXTENSION`].
fn contains_table(dir: &Path) -> bool {
    let Ok(entries) = fs::read_dir(dir) else {
        return false;
    };
    entries.flatten().any(|entry| {
        entry.file_name().to_string_lossy().ends_with(TABLE_EXTENSION)
            && entry.path().is_file()
    })
}

fn push_unique(names: &mut Vec<String>, name: String) {
    if !names.contains(&name) {
        names.push(name);
    }
}

// ---------------------------------------------------------------------------
// Read-count table
// ---------------------------------------------------------------------------

/// Path of the read-count table of `sample_set` within a dataset root.
pub fn read_count_path(root: &Path, sample_set: &str) -> PathBuf {
    let mut path = root.join(SAMPLE_SETS_DIR).join(sample_set);
    path.extend(READ_COUNT_FILE);
    path
}

/// Load `reads_and_basepairs.tsv` for a sample set.
///
/// Returns an empty table when the file does not exist. The header must name
/// `Sample`, `Reads` and `BasePairs`, even when there are no data rows; other
/// columns are ignored. A 0-byte file has no header and is rejected.
pub fn load_read_counts(root: &Path, sample_set: &str) -> Result<ReadCountTable, ScanError> {
    let path = read_count_path(root, sample_set);
    if !path.exists() {
        log::debug!("no read-count table at {}", path.display());
        return Ok(ReadCountTable::empty());
    }

    let malformed = |source| ScanError::MalformedTable {
        path: path.clone(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .trim(csv::Trim::All)
        .from_path(&path)
        .map_err(malformed)?;

    let headers = reader.headers().map_err(malformed)?;
    let missing: Vec<String> = COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ScanError::MissingColumns {
            path: path.clone(),
            missing,
        });
    }

    let rows = reader
        .deserialize::<ReadCount>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(malformed)?;

    log::info!("loaded {} samples from {}", rows.len(), path.display());
    Ok(ReadCountTable::from_rows(rows))
}
