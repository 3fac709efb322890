use config::{Config, Environment, File as ConfigFile};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

use crate::error::Result;

pub const MIB: u64 = 1024 * 1024;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub root_paths: Vec<String>,
    pub ignore_patterns: Vec<String>,
    /// Files strictly larger than this are listed individually.
    pub file_threshold_bytes: u64,
    pub file_limit: usize,
    pub dir_limit: usize,
    pub done_token: String,
    pub confirm_token: String,
    pub backup: BackupConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackupConfig {
    pub remote_url: Option<String>,
    pub mount_point: String,
    pub target_subdir: String,
    pub exclude_patterns: Vec<String>,
    pub transfer_program: String,
    pub transfer_args: Vec<String>,
    pub mount_program: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            root_paths: ["~/Documents", "~/Downloads", "~/Desktop", "~/Movies", "~/Music"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            ignore_patterns: Vec::new(),
            file_threshold_bytes: MIB,
            file_limit: 30,
            dir_limit: 20,
            done_token: "done".to_string(),
            confirm_token: "YES".to_string(),
            backup: BackupConfig::default(),
        }
    }
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            remote_url: None,
            mount_point: "/Volumes/TemporaryFiles".to_string(),
            target_subdir: "MacBackup".to_string(),
            exclude_patterns: vec![".DS_Store".to_string()],
            transfer_program: "rsync".to_string(),
            transfer_args: ["-avzh", "--progress"].iter().map(|s| s.to_string()).collect(),
            mount_program: "open".to_string(),
        }
    }
}

impl AppConfig {
    /// Root paths with `~` expanded and nested roots collapsed into their ancestors.
    pub fn resolved_roots(&self) -> Vec<PathBuf> {
        let expanded = self.root_paths.iter().map(|p| expand_home(p)).collect();
        non_overlapping_directories(expanded)
    }
}

impl BackupConfig {
    pub fn mount_point(&self) -> PathBuf {
        expand_home(&self.mount_point)
    }
}

/// Layered load: defaults, then `Config.toml` if present, then `SIZE_TRIM__*` env vars.
pub fn load_configuration() -> Result<AppConfig> {
    let builder = Config::builder()
        .add_source(ConfigFile::with_name("Config").required(false))
        .add_source(
            Environment::with_prefix("SIZE_TRIM")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("root_paths")
                .with_list_parse_key("ignore_patterns")
                .with_list_parse_key("backup.exclude_patterns")
                .with_list_parse_key("backup.transfer_args"),
        )
        .build()?;
    Ok(builder.try_deserialize::<AppConfig>()?)
}

pub fn expand_home(path: &str) -> PathBuf {
    if path == "~" {
        if let Ok(home) = env::var("HOME") {
            return PathBuf::from(home);
        }
    } else if let Some(rest) = path.strip_prefix("~/") {
        if let Ok(home) = env::var("HOME") {
            return Path::new(&home).join(rest);
        }
    }
    PathBuf::from(path)
}

/// Remove directories that are subdirectories of other directories in the list.
/// Comparison is per path component, so `/a/b` does not swallow `/a/bc`.
pub fn non_overlapping_directories(dirs: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut result: Vec<PathBuf> = Vec::new();

    for dir in dirs {
        if result.iter().any(|kept| dir.starts_with(kept)) {
            continue;
        }
        result.retain(|kept| !kept.starts_with(&dir));
        result.push(dir);
    }

    result
}
