use crate::catalog::DatasetCatalog;
use crate::color::SampleColors;
use crate::data::model::ReadCountTable;
use crate::data::scanner::{discover_sample_sets, load_read_counts};
use crate::reactive::{Cell, DependencyGraph};
use crate::views::ViewSet;

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// The two dropdown values; either may be unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub dataset: Option<String>,
    pub sample_set: Option<String>,
}

impl Selection {
    /// Both values, or `None` while either is unset.
    pub fn pair(&self) -> Option<(&str, &str)> {
        Some((self.dataset.as_deref()?, self.sample_set.as_deref()?))
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    catalog: Box<dyn DatasetCatalog>,
    graph: DependencyGraph,

    /// Dataset names offered by the dataset dropdown.
    pub datasets: Vec<String>,

    /// Current dropdown values.
    pub selection: Selection,

    /// Sample sets offered for the selected dataset.
    pub sample_set_choices: Vec<String>,

    /// Charts for the last complete selection (None until one is made).
    pub views: Option<ViewSet>,

    /// Per-sample colours for the current views.
    pub sample_colors: SampleColors,

    /// Incremented every time `views` is replaced.
    pub view_generation: u64,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Start with `default_dataset` selected and no sample set.
    pub fn new(catalog: Box<dyn DatasetCatalog>, default_dataset: Option<String>) -> Self {
        let datasets = dataset_names(catalog.as_ref());
        let mut state = Self {
            catalog,
            graph: DependencyGraph::default(),
            datasets,
            selection: Selection {
                dataset: default_dataset,
                sample_set: None,
            },
            sample_set_choices: Vec::new(),
            views: None,
            sample_colors: SampleColors::default(),
            view_generation: 0,
            status_message: None,
        };
        state.propagate(&[Cell::Dataset]);
        state
    }

    /// Replace the catalog, select its first dataset and drop old charts.
    pub fn set_catalog(&mut self, catalog: Box<dyn DatasetCatalog>) {
        self.catalog = catalog;
        self.datasets = dataset_names(self.catalog.as_ref());
        self.selection = Selection {
            dataset: self.datasets.first().cloned(),
            sample_set: None,
        };
        self.views = None;
        self.status_message = None;
        self.propagate(&[Cell::Dataset]);
    }

    /// Change the dataset dropdown.
    pub fn select_dataset(&mut self, dataset: Option<String>) {
        if self.selection.dataset == dataset {
            return;
        }
        log::debug!("dataset selected: {dataset:?}");
        self.selection.dataset = dataset;
        self.propagate(&[Cell::Dataset]);
    }

    /// Change the sample-set dropdown.
    pub fn select_sample_set(&mut self, sample_set: Option<String>) {
        if self.selection.sample_set == sample_set {
            return;
        }
        log::debug!("sample set selected: {sample_set:?}");
        self.selection.sample_set = sample_set;
        self.propagate(&[Cell::SampleSet]);
    }

    /// Re-scan the filesystem for the current selection.
    pub fn reload(&mut self) {
        self.propagate(&[Cell::Dataset]);
    }

    /// Recompute every cell downstream of `changed`, upstream first.
    fn propagate(&mut self, changed: &[Cell]) {
        for cell in self.graph.affected(changed) {
            match cell {
                Cell::Dataset => {}
                Cell::SampleSetChoices => self.refresh_choices(),
                Cell::SampleSet => self.reconcile_sample_set(),
                Cell::Views => self.recompute_views(),
            }
        }
    }

    fn refresh_choices(&mut self) {
        self.sample_set_choices = self
            .selection
            .dataset
            .as_deref()
            .and_then(|id| self.catalog.resolve(id))
            .map(|root| discover_sample_sets(&root))
            .unwrap_or_default();
        log::debug!(
            "{} sample sets for {:?}",
            self.sample_set_choices.len(),
            self.selection.dataset
        );
    }

    /// Keep the sample-set selection only while the new choices contain it.
    fn reconcile_sample_set(&mut self) {
        let still_valid = self
            .selection
            .sample_set
            .as_ref()
            .is_some_and(|ss| self.sample_set_choices.contains(ss));
        if !still_valid && self.selection.sample_set.is_some() {
            log::debug!("clearing stale sample set {:?}", self.selection.sample_set);
            self.selection.sample_set = None;
        }
    }

    /// Rebuild all three charts from one snapshot of the selection.
    ///
    /// Nothing changes while either dropdown is unset or when the table
    /// cannot be parsed.
    fn recompute_views(&mut self) {
        let Some((dataset, sample_set)) = self.selection.pair() else {
            return;
        };

        let table = match self.catalog.resolve(dataset) {
            Some(root) => match load_read_counts(&root, sample_set) {
                Ok(table) => table,
                Err(e) => {
                    log::error!("Failed to load read counts: {e:#}");
                    self.status_message = Some(format!("Error: {e:#}"));
                    return;
                }
            },
            None => {
                log::warn!("dataset '{dataset}' is not in the catalog");
                ReadCountTable::empty()
            }
        };

        self.sample_colors = SampleColors::new(table.rows.iter().map(|r| r.sample.as_str()));
        self.views = Some(ViewSet::derive(dataset, sample_set, table));
        self.view_generation += 1;
        self.status_message = None;
    }
}

fn dataset_names(catalog: &dyn DatasetCatalog) -> Vec<String> {
    catalog.list().into_iter().map(|entry| entry.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;
    use std::path::{Path, PathBuf};

    use tempfile::TempDir;

    use crate::catalog::DatasetEntry;
    use crate::data::scanner::read_count_path;

    /// Catalog backed by a plain list, standing in for the dataset registry.
    struct FakeCatalog(Vec<DatasetEntry>);

    impl DatasetCatalog for FakeCatalog {
        fn list(&self) -> Vec<DatasetEntry> {
            self.0.clone()
        }
    }

    fn add_table(root: &Path, sample_set: &str, contents: &str) {
        let path = read_count_path(root, sample_set);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, contents).unwrap();
        // marker file so the directory is discovered as a sample set
        fs::write(
            root.join("sample_sets").join(sample_set).join("samples.tsv"),
            "",
        )
        .unwrap();
    }

    /// Two datasets: D1 with SS1 and SS2, D2 with SS3 and SS1.
    fn fixture() -> (TempDir, AppState) {
        let dir = TempDir::new().unwrap();
        let d1 = dir.path().join("D1");
        let d2 = dir.path().join("D2");
        add_table(
            &d1,
            "SS1",
            "Sample\tReads\tBasePairs\nx\t5\t50\ny\t15\t150\n",
        );
        add_table(&d1, "SS2", "Sample\tReads\tBasePairs\nz\t1\t10\n");
        add_table(&d2, "SS3", "Sample\tReads\tBasePairs\nw\t7\t70\n");
        add_table(&d2, "SS1", "Sample\tReads\tBasePairs\nv\t9\t90\n");

        let catalog = FakeCatalog(vec![
            DatasetEntry::new("D1", d1),
            DatasetEntry::new("D2", d2),
            DatasetEntry::new("Empty", PathBuf::from("/nonexistent/root")),
        ]);
        let state = AppState::new(Box::new(catalog), Some("D1".to_string()));
        (dir, state)
    }

    fn sorted(names: &[String]) -> Vec<String> {
        let mut names = names.to_vec();
        names.sort();
        names
    }

    #[test]
    fn starts_with_default_dataset_and_no_views() {
        let (_dir, state) = fixture();
        assert_eq!(state.selection.dataset.as_deref(), Some("D1"));
        assert_eq!(state.selection.sample_set, None);
        assert_eq!(sorted(&state.sample_set_choices), ["SS1", "SS2"]);
        assert!(state.views.is_none());
        assert_eq!(state.datasets, ["D1", "D2", "Empty"]);
    }

    #[test]
    fn unset_sample_set_never_recomputes_views() {
        let (_dir, mut state) = fixture();
        state.select_dataset(Some("D2".into()));
        state.select_dataset(Some("Empty".into()));
        state.select_dataset(None);
        assert!(state.views.is_none());
        assert_eq!(state.view_generation, 0);
    }

    #[test]
    fn end_to_end_selection_builds_all_views() {
        let (_dir, mut state) = fixture();
        state.select_sample_set(Some("SS1".into()));

        let views = state.views.as_ref().unwrap();
        assert_eq!((views.dataset.as_str(), views.sample_set.as_str()), ("D1", "SS1"));
        assert_eq!(views.bar.samples().collect::<Vec<_>>(), ["x", "y"]);
        assert_eq!(views.histogram.bins.len(), 50);
        assert_eq!(views.histogram.observations(), 2);
        assert_eq!(views.violin.points, [5.0, 15.0]);
        assert!(views.violin.stats.is_some());
        assert_eq!(state.view_generation, 1);
    }

    #[test]
    fn dataset_change_replaces_choices() {
        let (_dir, mut state) = fixture();
        state.select_dataset(Some("D2".into()));
        assert_eq!(sorted(&state.sample_set_choices), ["SS1", "SS3"]);
        state.select_dataset(Some("Empty".into()));
        assert!(state.sample_set_choices.is_empty());
    }

    #[test]
    fn valid_sample_set_is_kept_across_datasets() {
        let (_dir, mut state) = fixture();
        state.select_sample_set(Some("SS1".into()));
        state.select_dataset(Some("D2".into()));

        assert_eq!(state.selection.sample_set.as_deref(), Some("SS1"));
        let views = state.views.as_ref().unwrap();
        assert_eq!(views.dataset, "D2");
        assert_eq!(views.bar.samples().collect::<Vec<_>>(), ["v"]);
        assert_eq!(state.view_generation, 2);
    }

    #[test]
    fn stale_sample_set_is_cleared_and_views_kept() {
        let (_dir, mut state) = fixture();
        state.select_sample_set(Some("SS2".into()));
        state.select_dataset(Some("D2".into()));

        assert_eq!(state.selection.sample_set, None);
        let views = state.views.as_ref().unwrap();
        assert_eq!((views.dataset.as_str(), views.sample_set.as_str()), ("D1", "SS2"));
        assert_eq!(state.view_generation, 1);
    }

    #[test]
    fn malformed_table_keeps_previous_views() {
        let (dir, mut state) = fixture();
        state.select_sample_set(Some("SS1".into()));
        fs::write(
            read_count_path(&dir.path().join("D1"), "SS2"),
            "Sample\tReads\tBasePairs\nz\tmany\t10\n",
        )
        .unwrap();

        state.select_sample_set(Some("SS2".into()));
        let views = state.views.as_ref().unwrap();
        assert_eq!(views.sample_set, "SS1");
        assert_eq!(state.view_generation, 1);
        assert!(state.status_message.as_deref().unwrap().starts_with("Error"));
    }

    #[test]
    fn wrong_header_keeps_previous_views() {
        let (dir, mut state) = fixture();
        state.select_sample_set(Some("SS1".into()));
        fs::write(read_count_path(&dir.path().join("D1"), "SS2"), "Foo\tBar\n").unwrap();

        state.select_sample_set(Some("SS2".into()));
        let views = state.views.as_ref().unwrap();
        assert_eq!(views.sample_set, "SS1");
        assert_eq!(views.bar.samples().collect::<Vec<_>>(), ["x", "y"]);
        assert_eq!(state.view_generation, 1);
        let status = state.status_message.as_deref().unwrap();
        assert!(status.starts_with("Error") && status.contains("BasePairs"));
    }

    #[test]
    fn reload_picks_up_new_sample_sets() {
        let (dir, mut state) = fixture();
        add_table(&dir.path().join("D1"), "SS9", "Sample\tReads\tBasePairs\n");
        state.reload();
        assert_eq!(sorted(&state.sample_set_choices), ["SS1", "SS2", "SS9"]);
    }

    #[test]
    fn new_catalog_resets_selection() {
        let (dir, mut state) = fixture();
        state.select_sample_set(Some("SS1".into()));
        state.set_catalog(Box::new(FakeCatalog(vec![DatasetEntry::new(
            "D2",
            dir.path().join("D2"),
        )])));
        assert_eq!(state.selection.dataset.as_deref(), Some("D2"));
        assert_eq!(state.selection.sample_set, None);
        assert!(state.views.is_none());
        assert_eq!(sorted(&state.sample_set_choices), ["SS1", "SS3"]);
    }

    #[test]
    fn pair_requires_both_values() {
        let mut sel = Selection::default();
        assert_eq!(sel.pair(), None);
        sel.dataset = Some("D1".into());
        assert_eq!(sel.pair(), None);
        sel.sample_set = Some("SS1".into());
        assert_eq!(sel.pair(), Some(("D1", "SS1")));
    }
}
