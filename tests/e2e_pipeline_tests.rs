use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tempfile::tempdir;

use size_trim::config::MIB;
use size_trim::selection::{select, Selection};
use size_trim::{AppConfig, ScanEngine, SilentReporter};

const KIB: u64 = 1024;

/// Sparse file of the given length; metadata reports the full size.
fn sized_file(path: &Path, len: u64) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    File::create(path).unwrap().set_len(len).unwrap();
}

fn config_for(root: &Path) -> AppConfig {
    AppConfig {
        root_paths: vec![root.to_string_lossy().into_owned()],
        ..AppConfig::default()
    }
}

fn names(paths: impl Iterator<Item = PathBuf>) -> Vec<String> {
    paths
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn test_oversized_files_ranked_and_selected_by_extension() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().join("Downloads");
    sized_file(&root.join("a.iso"), 5 * MIB);
    sized_file(&root.join("b.txt"), 500 * KIB);
    sized_file(&root.join("c.dmg"), 10 * MIB);

    let engine = ScanEngine::new(config_for(&root));
    let result = engine.scan(&SilentReporter);

    assert_eq!(
        names(result.files.iter().map(|f| f.path.clone())),
        vec!["c.dmg", "a.iso"]
    );
    assert_eq!(result.files[0].size_bytes, 10 * MIB);
    assert_eq!(result.index.total_bytes(), 15 * MIB + 500 * KIB);

    let working = result.working_set();
    match select(".dmg", &working, "done") {
        Selection::Items(set) => {
            assert_eq!(set.len(), 1);
            assert_eq!(set.entries()[0].path, root.join("c.dmg"));
        }
        other => panic!("expected one selected file, got {other:?}"),
    }
}

#[test]
fn test_nested_tree_cumulative_sizes_and_ranking() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().join("root");
    sized_file(&root.join("sub/big.bin"), 50 * MIB);
    sized_file(&root.join("other.bin"), MIB);

    let engine = ScanEngine::new(config_for(&root));
    let result = engine.scan(&SilentReporter);

    assert_eq!(result.index.cumulative_size(&root), Some(51 * MIB));
    assert_eq!(result.index.cumulative_size(&root.join("sub")), Some(50 * MIB));

    let ranked: Vec<PathBuf> = result.directories.iter().map(|d| d.path.clone()).collect();
    assert_eq!(ranked, vec![root.join("sub")]);

    // other.bin is exactly 1 MiB, which is not above the threshold
    assert_eq!(names(result.files.iter().map(|f| f.path.clone())), vec!["big.bin"]);
}

#[test]
fn test_root_total_matches_every_file_beneath_it() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().join("tree");
    let mut expected = 0;
    for (i, rel) in ["a/b/c/1.bin", "a/b/2.bin", "a/3.bin", "d/4.bin", "d/e/5.bin", "6.bin"]
        .iter()
        .enumerate()
    {
        let len = (i as u64 + 1) * 3 * KIB;
        sized_file(&root.join(rel), len);
        expected += len;
    }
    fs::create_dir_all(root.join("empty/inner")).unwrap();

    let result = ScanEngine::new(config_for(&root)).scan(&SilentReporter);

    assert_eq!(result.index.cumulative_size(&root), Some(expected));
    assert_eq!(result.index.cumulative_size(&root.join("empty")), Some(0));
    for dir in &result.index.directories {
        for child in &result.index.directories {
            if child.path.parent() == Some(dir.path.as_path()) {
                assert!(dir.cumulative_size_bytes >= child.cumulative_size_bytes);
            }
        }
    }
}

#[test]
fn test_multiple_roots_with_overlap_and_missing() {
    let tmp = tempdir().unwrap();
    let docs = tmp.path().join("Documents");
    let music = tmp.path().join("Music");
    sized_file(&docs.join("projects/video.mov"), 3 * MIB);
    sized_file(&music.join("album/track.flac"), 2 * MIB);

    let config = AppConfig {
        root_paths: vec![
            docs.to_string_lossy().into_owned(),
            docs.join("projects").to_string_lossy().into_owned(),
            tmp.path().join("Movies").to_string_lossy().into_owned(),
            music.to_string_lossy().into_owned(),
        ],
        ..AppConfig::default()
    };
    let result = ScanEngine::new(config).scan(&SilentReporter);

    assert_eq!(result.index.roots, vec![docs.clone(), music.clone()]);
    let ranked: Vec<PathBuf> = result.directories.iter().map(|d| d.path.clone()).collect();
    assert_eq!(ranked, vec![docs.join("projects"), music.join("album")]);
    assert_eq!(result.files.len(), 2);
}

#[test]
fn test_limits_cap_both_lists() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().join("many");
    for i in 0..8u64 {
        sized_file(&root.join(format!("dir{i}/file{i}.bin")), (i + 2) * MIB);
    }

    let config = AppConfig {
        file_limit: 3,
        dir_limit: 4,
        ..config_for(&root)
    };
    let result = ScanEngine::new(config).scan(&SilentReporter);

    assert_eq!(
        names(result.files.iter().map(|f| f.path.clone())),
        vec!["file7.bin", "file6.bin", "file5.bin"]
    );
    assert_eq!(result.directories.len(), 4);
    assert_eq!(result.directories[0].path, root.join("dir7"));
}
