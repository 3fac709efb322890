use std::fs;
use std::io;
use std::path::Path;

/// Filesystem operations the deletion executor depends on.
pub trait FileSystem {
    /// True for any existing entry, including a dangling symlink.
    fn exists(&self, path: &Path) -> bool;
    /// True for a real directory; a symlink to a directory is not one.
    fn is_dir(&self, path: &Path) -> bool;
    fn remove_file(&self, path: &Path) -> io::Result<()>;
    fn remove_dir_all(&self, path: &Path) -> io::Result<()>;
}

pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn exists(&self, path: &Path) -> bool {
        fs::symlink_metadata(path).is_ok()
    }

    fn is_dir(&self, path: &Path) -> bool {
        fs::symlink_metadata(path)
            .map(|m| m.file_type().is_dir())
            .unwrap_or(false)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::remove_dir_all(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_os_filesystem_basics() {
        let tmp = tempdir().unwrap();
        let file = tmp.path().join("f.bin");
        fs::write(&file, b"abc").unwrap();

        let fs_ops = OsFileSystem;
        assert!(fs_ops.exists(&file));
        assert!(!fs_ops.is_dir(&file));
        assert!(fs_ops.is_dir(tmp.path()));

        fs_ops.remove_file(&file).unwrap();
        assert!(!fs_ops.exists(&file));
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_exists() {
        let tmp = tempdir().unwrap();
        let link = tmp.path().join("link");
        std::os::unix::fs::symlink(tmp.path().join("nowhere"), &link).unwrap();
        assert!(OsFileSystem.exists(&link));
        assert!(!OsFileSystem.is_dir(&link));
    }
}
