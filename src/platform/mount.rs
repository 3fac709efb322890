use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

use crate::error::{Error, Result};

/// Probe and request for the backup volume.
pub trait MountProbe {
    fn is_mounted(&self, mount_point: &Path) -> bool;
    /// Fire-and-forget: returns once the request has been handed off.
    fn request_mount(&self, remote_url: &str) -> Result<()>;
}

/// Detects mount points by device id and asks the desktop to mount through an
/// opener program such as `open` on macOS.
pub struct SystemMount {
    program: String,
}

impl SystemMount {
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
        }
    }
}

impl MountProbe for SystemMount {
    fn is_mounted(&self, mount_point: &Path) -> bool {
        is_mount_point(mount_point)
    }

    fn request_mount(&self, remote_url: &str) -> Result<()> {
        let url = webdav_mount_url(remote_url);
        debug!("Requesting mount via {} {}", self.program, url);
        Command::new(&self.program)
            .arg(&url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(|_child| ())
            .map_err(|e| Error::Other(format!("failed to run '{}': {}", self.program, e)))
    }
}

/// WebDAV over HTTPS mounts as `davs://`, plain HTTP as `dav://`.
pub fn webdav_mount_url(url: &str) -> String {
    if let Some(rest) = url.strip_prefix("https://") {
        format!("davs://{rest}")
    } else if let Some(rest) = url.strip_prefix("http://") {
        format!("dav://{rest}")
    } else {
        url.to_string()
    }
}

#[cfg(unix)]
fn is_mount_point(path: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    let Ok(meta) = std::fs::metadata(path) else {
        return false;
    };
    if !meta.is_dir() {
        return false;
    }
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => return true,
    };
    match std::fs::metadata(parent) {
        Ok(parent_meta) => parent_meta.dev() != meta.dev() || parent_meta.ino() == meta.ino(),
        Err(_) => false,
    }
}

#[cfg(not(unix))]
fn is_mount_point(path: &Path) -> bool {
    path.is_dir()
}
