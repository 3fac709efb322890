pub mod fs;
pub mod mount;

pub use fs::{FileSystem, OsFileSystem};
pub use mount::{MountProbe, SystemMount};
