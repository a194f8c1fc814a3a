//! Data layer: core types, filesystem scanning and table loading.
//!
//! Architecture:
//! ```text
//!  <root>/sample_sets/<set>/count/reads_and_basepairs.tsv
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ scanner  │  discover sample sets, parse TSV → ReadCountTable
//!   └──────────┘
//!        │
//!        ▼
//!   ┌────────────────┐
//!   │ ReadCountTable │  Vec<ReadCount>, file order
//!   └────────────────┘
//! ```

pub mod model;
pub mod scanner;
