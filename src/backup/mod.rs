pub mod mount_wait;
pub mod transfer;

use chrono::{DateTime, Local};
use std::collections::HashSet;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use crate::config::BackupConfig;

pub use mount_wait::ensure_mounted;
pub use transfer::{RsyncTransfer, Transfer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootStatus {
    Synced,
    /// The root vanished between scan and backup.
    Skipped,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct RootOutcome {
    pub root: PathBuf,
    pub destination: PathBuf,
    pub status: RootStatus,
}

#[derive(Debug, Clone)]
pub struct BackupReport {
    pub started_at: DateTime<Local>,
    pub finished_at: DateTime<Local>,
    pub outcomes: Vec<RootOutcome>,
}

impl BackupReport {
    pub fn synced(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status == RootStatus::Synced)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, RootStatus::Failed(_)))
            .count()
    }
    /// True when `path` lies under a root that was synced in this run.
    pub fn covers(&self, path: &Path) -> bool {
        self.outcomes
            .iter()
            .any(|o| o.status == RootStatus::Synced && path.starts_with(&o.root))
    }
}

/// Runs the transfer once per root into `<mount>/<target_subdir>/<root name>`.
/// A failing root is logged and the remaining roots are still attempted.
pub struct BackupOrchestrator<'a> {
    config: &'a BackupConfig,
    transfer: &'a dyn Transfer,
}

impl<'a> BackupOrchestrator<'a> {
    pub fn new(config: &'a BackupConfig, transfer: &'a dyn Transfer) -> Self {
        Self { config, transfer }
    }

    pub fn target_base(&self) -> PathBuf {
        self.config.mount_point().join(&self.config.target_subdir)
    }

    pub fn destination_for(&self, root: &Path) -> PathBuf {
        self.target_base().join(base_name(root))
    }

    /// One destination per root. Roots sharing a base name get their parent's
    /// name prefixed (`b-Music`), then a counter, so they never merge.
    pub fn destinations(&self, roots: &[PathBuf]) -> Vec<PathBuf> {
        let mut taken: HashSet<OsString> = HashSet::new();
        roots
            .iter()
            .map(|root| {
                let name = base_name(root);
                let mut chosen = name.clone();
                if taken.contains(&chosen) {
                    let parent = root
                        .parent()
                        .and_then(Path::file_name)
                        .map(|p| p.to_os_string())
                        .unwrap_or_else(|| "root".into());
                    let mut prefixed = parent;
                    prefixed.push("-");
                    prefixed.push(&name);
                    chosen = prefixed.clone();
                    let mut n = 2;
                    while taken.contains(&chosen) {
                        chosen = prefixed.clone();
                        chosen.push(format!("-{n}"));
                        n += 1;
                    }
                    warn!(
                        "{} shares its name with another root, syncing to {}",
                        root.display(),
                        self.target_base().join(&chosen).display()
                    );
                }
                taken.insert(chosen.clone());
                self.target_base().join(chosen)
            })
            .collect()
    }

    pub fn run(&self, roots: &[PathBuf]) -> BackupReport {
        let started_at = Local::now();
        let mut outcomes = Vec::with_capacity(roots.len());

        for (root, destination) in roots.iter().zip(self.destinations(roots)) {
            let status = self.sync_root(root, &destination);
            outcomes.push(RootOutcome {
                root: root.clone(),
                destination,
                status,
            });
        }

        let report = BackupReport {
            started_at,
            finished_at: Local::now(),
            outcomes,
        };
        info!(
            "Backup finished: {} synced, {} failed",
            report.synced(),
            report.failed()
        );
        report
    }

    fn sync_root(&self, root: &Path, destination: &Path) -> RootStatus {
        if !root.exists() {
            warn!("Skipping missing root {}", root.display());
            return RootStatus::Skipped;
        }

        if let Err(e) = fs::create_dir_all(self.target_base()) {
            error!(
                "Error creating {}: {}",
                self.target_base().display(),
                e
            );
            return RootStatus::Failed(e.to_string());
        }

        info!("Syncing: {} -> {}", root.display(), destination.display());
        match self
            .transfer
            .transfer(root, destination, &self.config.exclude_patterns)
        {
            Ok(()) => RootStatus::Synced,
            Err(e) => {
                error!("Error backing up {}: {}", root.display(), e);
                RootStatus::Failed(e.to_string())
            }
        }
    }
}

fn base_name(root: &Path) -> OsString {
    root.file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "root".into())
}
