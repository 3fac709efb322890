use std::path::Path;
use std::process::Command;
use tracing::debug;

use crate::error::{Error, Result};

/// Recursive incremental copy of one root.
pub trait Transfer {
    fn transfer(&self, source: &Path, destination: &Path, excludes: &[String]) -> Result<()>;
}

/// Runs an rsync-compatible program:
/// `<program> <args>... --exclude=<p>... <source>/ <destination>`.
pub struct RsyncTransfer {
    program: String,
    args: Vec<String>,
}

impl RsyncTransfer {
    pub fn new(program: &str, args: &[String]) -> Self {
        Self {
            program: program.to_string(),
            args: args.to_vec(),
        }
    }

    pub fn command_line(
        &self,
        source: &Path,
        destination: &Path,
        excludes: &[String],
    ) -> Vec<String> {
        let mut line = Vec::with_capacity(self.args.len() + excludes.len() + 2);
        line.extend(self.args.iter().cloned());
        line.extend(excludes.iter().map(|p| format!("--exclude={p}")));
        // The trailing slash copies the root's contents rather than the root itself.
        line.push(format!("{}/", source.display()));
        line.push(destination.display().to_string());
        line
    }
}

impl Transfer for RsyncTransfer {
    fn transfer(&self, source: &Path, destination: &Path, excludes: &[String]) -> Result<()> {
        let args = self.command_line(source, destination, excludes);
        debug!("Running {} {:?}", self.program, args);

        let status = Command::new(&self.program)
            .args(&args)
            .status()
            .map_err(|e| Error::Transfer {
                root: source.to_path_buf(),
                details: format!("could not start '{}': {}", self.program, e),
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(Error::Transfer {
                root: source.to_path_buf(),
                details: format!("'{}' exited with {}", self.program, status),
            })
        }
    }
}
