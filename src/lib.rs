//! Finds the largest files and directories under a set of roots, lets an
//! operator delete selected items, and drives an incremental backup of the
//! roots in between.

pub mod analysis;
pub mod backup;
pub mod config;
pub mod deletion;
pub mod engine;
pub mod error;
pub mod platform;
pub mod progress;
pub mod prompt;
pub mod render;
pub mod scanner;
pub mod selection;
pub mod session;
pub mod working_set;

pub use config::AppConfig;
pub use engine::{ScanEngine, ScanResult};
pub use error::{Error, Result};
pub use progress::{ProgressReporter, SilentReporter};
pub use session::{Collaborators, Session, SessionSummary};
pub use working_set::WorkingSet;
