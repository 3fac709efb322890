use std::cell::RefCell;
use std::fs::{self, File};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

use size_trim::backup::Transfer;
use size_trim::config::MIB;
use size_trim::platform::{MountProbe, OsFileSystem};
use size_trim::prompt::Prompter;
use size_trim::{AppConfig, Collaborators, ScanEngine, Session, SessionSummary, SilentReporter};

struct FixedMount {
    mounted: bool,
}

impl MountProbe for FixedMount {
    fn is_mounted(&self, _mount_point: &Path) -> bool {
        self.mounted
    }

    fn request_mount(&self, _remote_url: &str) -> size_trim::Result<()> {
        Ok(())
    }
}

#[derive(Default)]
struct RecordingTransfer {
    fail: bool,
    calls: RefCell<Vec<(PathBuf, PathBuf)>>,
}

impl Transfer for RecordingTransfer {
    fn transfer(
        &self,
        source: &Path,
        destination: &Path,
        _excludes: &[String],
    ) -> size_trim::Result<()> {
        self.calls
            .borrow_mut()
            .push((source.to_path_buf(), destination.to_path_buf()));
        if self.fail {
            return Err(size_trim::Error::Transfer {
                root: source.to_path_buf(),
                details: "exit status: 23".to_string(),
            });
        }
        Ok(())
    }
}

struct Fixture {
    _tmp: TempDir,
    root: PathBuf,
    volume: PathBuf,
    config: AppConfig,
}

/// Layout:
///   Downloads/
///     a.iso   5 MiB
///     b.txt   500 KiB
///     c.dmg   10 MiB
///     old/
///       d.zip 3 MiB
fn fixture() -> Fixture {
    colored::control::set_override(false);
    let tmp = tempdir().unwrap();
    let root = tmp.path().join("Downloads");
    let volume = tmp.path().join("volume");
    fs::create_dir_all(root.join("old")).unwrap();
    File::create(root.join("a.iso")).unwrap().set_len(5 * MIB).unwrap();
    File::create(root.join("b.txt")).unwrap().set_len(500 * 1024).unwrap();
    File::create(root.join("c.dmg")).unwrap().set_len(10 * MIB).unwrap();
    File::create(root.join("old/d.zip")).unwrap().set_len(3 * MIB).unwrap();

    let mut config = AppConfig {
        root_paths: vec![root.to_string_lossy().into_owned()],
        ..AppConfig::default()
    };
    config.backup.mount_point = volume.to_string_lossy().into_owned();

    Fixture {
        _tmp: tmp,
        root,
        volume,
        config,
    }
}

fn run_session(
    fixture: &Fixture,
    script: &str,
    mount: &FixedMount,
    transfer: &RecordingTransfer,
) -> (SessionSummary, String) {
    let engine = ScanEngine::new(fixture.config.clone());
    let result = engine.scan(&SilentReporter);

    let prompter = Prompter::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
    let collaborators = Collaborators {
        fs: &OsFileSystem,
        mount,
        transfer,
    };
    let mut session = Session::new(
        &fixture.config,
        result.index.roots.clone(),
        prompter,
        collaborators,
    );
    let summary = session.run(result.working_set()).unwrap();
    let output = String::from_utf8(session.into_prompter().into_output()).unwrap();
    (summary, output)
}

fn file_names(summary: &SessionSummary) -> Vec<String> {
    summary
        .remaining
        .files
        .iter()
        .map(|f| f.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn test_extension_delete_then_done_without_backup() {
    let fx = fixture();
    let mount = FixedMount { mounted: true };
    let transfer = RecordingTransfer::default();

    let (summary, output) = run_session(&fx, ".dmg\nYES\ndone\nn\n", &mount, &transfer);

    assert!(!fx.root.join("c.dmg").exists());
    assert!(fx.root.join("a.iso").exists());
    assert_eq!(file_names(&summary), vec!["a.iso", "d.zip"]);
    assert_eq!(summary.items_removed, 1);
    assert!(summary.backup.is_none());
    assert!(transfer.calls.borrow().is_empty());
    assert!(output.contains("Deleted:"));
    assert!(output.contains("Process ended."));
}

#[test]
fn test_wrong_confirmation_keeps_everything() {
    let fx = fixture();
    let mount = FixedMount { mounted: true };
    let transfer = RecordingTransfer::default();

    let (summary, output) = run_session(&fx, "F1-F3\nyes\ndone\nn\n", &mount, &transfer);

    assert!(fx.root.join("c.dmg").exists());
    assert_eq!(summary.remaining.files.len(), 3);
    assert_eq!(summary.items_removed, 0);
    assert!(output.contains("Deletion cancelled."));
}

#[test]
fn test_invalid_command_is_reported_and_loop_continues() {
    let fx = fixture();
    let mount = FixedMount { mounted: true };
    let transfer = RecordingTransfer::default();

    let (summary, output) = run_session(&fx, "F99\nD1\nYES\ndone\nn\n", &mount, &transfer);

    assert!(output.contains("No valid items selected."));
    // D1 is the old/ directory; its file leaves the listing with it
    assert!(!fx.root.join("old").exists());
    assert_eq!(file_names(&summary), vec!["c.dmg", "a.iso"]);
    assert!(summary.remaining.directories.is_empty());
}

#[test]
fn test_listing_is_rerendered_after_each_round() {
    let fx = fixture();
    let mount = FixedMount { mounted: true };
    let transfer = RecordingTransfer::default();

    let (_, output) = run_session(&fx, "F1\nYES\ndone\nn\n", &mount, &transfer);

    let listings = output.matches("CURRENT LARGE ITEMS").count();
    assert_eq!(listings, 2);
    let second = output.rsplit("CURRENT LARGE ITEMS").next().unwrap();
    assert!(!second.contains("c.dmg"));
    assert!(second.contains("a.iso"));
}

#[test]
fn test_backup_then_delete_all_backed_up_files() {
    let fx = fixture();
    let mount = FixedMount { mounted: true };
    let transfer = RecordingTransfer::default();

    let (summary, output) = run_session(&fx, "done\ny\n2\nYES\n", &mount, &transfer);

    let calls = transfer.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, fx.root);
    assert_eq!(calls[0].1, fx.volume.join("MacBackup").join("Downloads"));

    let report = summary.backup.expect("backup should have run");
    assert_eq!(report.synced(), 1);
    assert!(summary.remaining.files.is_empty());
    assert!(!fx.root.join("a.iso").exists());
    assert!(!fx.root.join("old/d.zip").exists());
    // small files were never listed and stay
    assert!(fx.root.join("b.txt").exists());
    assert!(output.contains("SUMMARY"));
}

#[test]
fn test_failed_transfer_keeps_files_out_of_post_backup_cleanup() {
    let fx = fixture();
    let mount = FixedMount { mounted: true };
    let transfer = RecordingTransfer {
        fail: true,
        ..RecordingTransfer::default()
    };

    let (summary, output) = run_session(&fx, "done\ny\n2\nYES\n", &mount, &transfer);

    let report = summary.backup.expect("backup stage should have run");
    assert_eq!(report.failed(), 1);
    assert_eq!(report.synced(), 0);
    assert!(fx.root.join("c.dmg").exists());
    assert!(fx.root.join("a.iso").exists());
    assert_eq!(summary.remaining.files.len(), 3);
    assert_eq!(summary.items_removed, 0);
    assert!(!output.contains("have been backed up"));
    assert!(output.contains("NOT backed up"));
}

#[test]
fn test_mount_cancel_aborts_backup_only() {
    let fx = fixture();
    let mount = FixedMount { mounted: false };
    let transfer = RecordingTransfer::default();

    let (summary, output) = run_session(&fx, "done\ny\nc\n", &mount, &transfer);

    assert!(summary.backup.is_none());
    assert!(transfer.calls.borrow().is_empty());
    assert_eq!(summary.remaining.files.len(), 3);
    assert!(output.contains("Aborting"));
}

#[test]
fn test_end_of_input_ends_session_cleanly() {
    let fx = fixture();
    let mount = FixedMount { mounted: true };
    let transfer = RecordingTransfer::default();

    let (summary, _) = run_session(&fx, "", &mount, &transfer);

    assert!(summary.backup.is_none());
    assert_eq!(summary.remaining.files.len(), 3);
    assert!(fx.root.join("c.dmg").exists());
}
