// ---------------------------------------------------------------------------
// Dependency graph of the selection → chart cascade
// ---------------------------------------------------------------------------

/// A named slot of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Selected dataset (input).
    Dataset,
    /// Sample sets available for the selected dataset.
    SampleSetChoices,
    /// Selected sample set (input, reconciled against the choices).
    SampleSet,
    /// Bar, histogram and violin views, always recomputed together.
    Views,
}

impl Cell {
    /// Every cell, in topological order.
    pub const ALL: [Cell; 4] = [
        Cell::Dataset,
        Cell::SampleSetChoices,
        Cell::SampleSet,
        Cell::Views,
    ];
}

/// `(upstream, downstream)` edges.
pub const EDGES: [(Cell, Cell); 4] = [
    (Cell::Dataset, Cell::SampleSetChoices),
    (Cell::SampleSetChoices, Cell::SampleSet),
    (Cell::Dataset, Cell::Views),
    (Cell::SampleSet, Cell::Views),
];

/// Static DAG deciding which cells must be recomputed after a change.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    edges: Vec<(Cell, Cell)>,
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self {
            edges: EDGES.to_vec(),
        }
    }
}

impl DependencyGraph {
    /// Cells reachable from `changed` (inclusive), in topological order.
    ///
    /// Each cell appears once even when several of its inputs changed, so a
    /// downstream cell is recomputed after all of its upstream cells.
    pub fn affected(&self, changed: &[Cell]) -> Vec<Cell> {
        let mut dirty: Vec<Cell> = changed.to_vec();
        let mut frontier = dirty.clone();
        while let Some(cell) = frontier.pop() {
            for &(from, to) in &self.edges {
                if from == cell && !dirty.contains(&to) {
                    dirty.push(to);
                    frontier.push(to);
                }
            }
        }
        Cell::ALL
            .into_iter()
            .filter(|cell| dirty.contains(cell))
            .collect()
    }
}
