use serde::Deserialize;

// ---------------------------------------------------------------------------
// ReadCount – one row of reads_and_basepairs.tsv
// ---------------------------------------------------------------------------

/// Read and base-pair totals for a single sample.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReadCount {
    #[serde(rename = "Sample")]
    pub sample: String,
    #[serde(rename = "Reads")]
    pub reads: u64,
    #[serde(rename = "BasePairs")]
    pub base_pairs: u64,
}

impl ReadCount {
    pub fn new(sample: impl Into<String>, reads: u64, base_pairs: u64) -> Self {
        Self {
            sample: sample.into(),
            reads,
            base_pairs,
        }
    }
}

// ---------------------------------------------------------------------------
// ReadCountTable – the complete loaded table
// ---------------------------------------------------------------------------

/// Column names every read-count table carries, in file order.
pub const COLUMNS: [&str; 3] = ["Sample", "Reads", "BasePairs"];

/// An ordered sequence of [`ReadCount`] rows, as found in the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadCountTable {
    pub rows: Vec<ReadCount>,
}

impl ReadCountTable {
    /// A table with the three columns defined but no rows.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<ReadCount>) -> Self {
        Self { rows }
    }

    /// Column names of the table.
    pub fn columns(&self) -> &'static [&'static str] {
        &COLUMNS
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The `Reads` column as floats, in row order.
    pub fn reads(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.reads as f64).collect()
    }

    /// Rows ordered ascending by `Reads`; ties keep file order.
    pub fn sorted_by_reads(&self) -> Vec<ReadCount> {
        let mut rows = self.rows.clone();
        rows.sort_by_key(|r| r.reads);
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_table_keeps_columns() {
        let table = ReadCountTable::empty();
        assert!(table.is_empty());
        assert_eq!(table.columns(), &["Sample", "Reads", "BasePairs"]);
    }

    #[test]
    fn sorted_by_reads_is_ascending_and_stable() {
        let table = ReadCountTable::from_rows(vec![
            ReadCount::new("A", 30, 300),
            ReadCount::new("B", 10, 100),
            ReadCount::new("C", 20, 200),
            ReadCount::new("D", 10, 120),
        ]);
        let order: Vec<_> = table
            .sorted_by_reads()
            .into_iter()
            .map(|r| r.sample)
            .collect();
        assert_eq!(order, ["B", "D", "C", "A"]);
    }
}
