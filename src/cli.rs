use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::catalog::Catalog;

/// Dataset selected at start-up when none is given on the command line.
pub const DEFAULT_DATASET: &str = "Dataset1";

/// Read-count dashboard for sequencing sample sets
#[derive(Parser, Debug)]
#[command(name = "readcount-viewer")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// JSON catalog listing datasets as {"df": NAME, "fs_prefix": DIR}
    #[arg(long, value_name = "FILE", conflicts_with = "prefix")]
    pub catalog: Option<PathBuf>,

    /// Directory whose subdirectories are datasets
    #[arg(long, value_name = "DIR")]
    pub prefix: Option<PathBuf>,

    /// Dataset selected at start-up
    #[arg(long, value_name = "ID", default_value = DEFAULT_DATASET)]
    pub dataset: String,

    /// Log at debug level unless RUST_LOG is set
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Default `env_logger` filter for these flags.
    pub fn log_filter(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "info"
        }
    }

    /// Build the catalog named by `--catalog` or `--prefix`.
    pub fn load_catalog(&self) -> Result<Catalog> {
        if let Some(path) = &self.catalog {
            return Catalog::from_json_file(path)
                .with_context(|| format!("loading catalog {}", path.display()));
        }
        if let Some(dir) = &self.prefix {
            return Catalog::from_prefix_dir(dir)
                .with_context(|| format!("scanning datasets in {}", dir.display()));
        }
        Ok(Catalog::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["readcount-viewer"]).unwrap();
        assert_eq!(cli.dataset, DEFAULT_DATASET);
        assert!(!cli.debug);
        assert_eq!(cli.log_filter(), "info");
        assert!(cli.load_catalog().unwrap().is_empty());
    }

    #[test]
    fn catalog_and_prefix_conflict() {
        let res = Cli::try_parse_from([
            "readcount-viewer",
            "--catalog",
            "a.json",
            "--prefix",
            "/data",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn debug_raises_log_level() {
        let cli = Cli::try_parse_from(["readcount-viewer", "--debug", "--dataset", "D7"]).unwrap();
        assert_eq!(cli.log_filter(), "debug");
        assert_eq!(cli.dataset, "D7");
    }
}
