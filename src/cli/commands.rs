use clap::{Parser, Subcommand};

use size_trim::config::{AppConfig, MIB};

#[derive(Debug, Parser)] // requires `derive` feature
#[command(name = "size-trim")]
#[command(about = "Find large files, clean them up, and back up what stays", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory to scan; repeat to scan several (replaces configured roots)
    #[arg(long = "root", global = true)]
    pub roots: Vec<String>,

    /// List files larger than this many MiB
    #[arg(long, global = true)]
    pub threshold_mb: Option<u64>,

    /// Maximum number of files to list
    #[arg(long, global = true)]
    pub file_limit: Option<usize>,

    /// Maximum number of directories to list
    #[arg(long, global = true)]
    pub dir_limit: Option<usize>,
}

#[derive(Debug, Clone, Copy, Subcommand)]
pub enum Commands {
    /// Scan, clean up interactively, back up, then offer a final cleanup
    Run,
    /// Scan and print the largest files and directories
    Scan,
    /// Print configuration values
    PrintConfig,
}

impl Cli {
    /// Command-line flags win over configured values.
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if !self.roots.is_empty() {
            config.root_paths = self.roots.clone();
        }
        if let Some(mb) = self.threshold_mb {
            config.file_threshold_bytes = mb.saturating_mul(MIB);
        }
        if let Some(limit) = self.file_limit {
            config.file_limit = limit;
        }
        if let Some(limit) = self.dir_limit {
            config.dir_limit = limit;
        }
    }
}
