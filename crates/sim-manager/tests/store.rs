//! Simulation store tests.
//!
//! Covers the on-disk lifecycle: create/list/delete, date markers, stats
//! seeding, and confinement of names to the store root.

use chrono::Datelike;
use sim_manager::error::StoreError;
use sim_manager::store::{initial_date, SimulationStore, DATE_FILE, DATE_NOT_FOUND, STATS_DIR};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

struct Fixture {
    _dir: TempDir,
    root: PathBuf,
    templates: PathBuf,
    store: SimulationStore,
}

fn fixture() -> Fixture {
    let dir = TempDir::new().expect("TempDir should create test directory");
    let root = dir.path().join("sims");
    let templates = dir.path().join("Stats_Templates");
    fs::create_dir(&templates).expect("template dir should be creatable");
    fs::write(templates.join("Standings.csv"), "team,wins\nA,1\n").expect("write template");
    fs::write(templates.join("Skaters.CSV"), "player,goals\n").expect("write template");
    fs::write(templates.join("notes.txt"), "not a template").expect("write template");

    let store = SimulationStore::open(&root, &templates).expect("store should open");
    Fixture {
        _dir: dir,
        root,
        templates,
        store,
    }
}

fn snapshot(dir: &Path) -> Vec<(PathBuf, Vec<u8>)> {
    WalkDir::new(dir)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .map(|entry| {
            let entry = entry.expect("walk entry should be readable");
            let bytes = if entry.file_type().is_dir() {
                Vec::new()
            } else {
                fs::read(entry.path()).expect("file should be readable")
            };
            (entry.into_path(), bytes)
        })
        .collect()
}

#[test]
fn test_open_creates_root() {
    let fx = fixture();
    assert!(fx.root.is_dir(), "store root should be created on open");
    assert!(fx.store.list().expect("list").is_empty());
}

#[test]
fn test_create_then_list_and_date() {
    let fx = fixture();

    let name = fx.store.create("alpha").expect("create should succeed");
    assert_eq!(name.as_str(), "alpha");

    assert_eq!(fx.store.list().expect("list"), vec!["alpha".to_string()]);
    assert!(fx.store.exists("alpha"));
    assert_eq!(
        fx.store.date("alpha"),
        initial_date(chrono::Local::now().year())
    );
    assert!(fx.root.join("alpha").join(STATS_DIR).is_dir());
}

#[test]
fn test_create_in_year_writes_marker() {
    let fx = fixture();

    fx.store
        .create_in_year("season", 1999)
        .expect("create should succeed");

    let marker = fs::read_to_string(fx.root.join("season").join(DATE_FILE))
        .expect("date marker should exist");
    assert_eq!(marker, "January 1, 1999");
    assert_eq!(fx.store.date("season"), "January 1, 1999");
}

#[test]
fn test_duplicate_create_conflicts_without_changes() {
    let fx = fixture();
    fx.store.create("alpha").expect("first create should succeed");
    fs::write(fx.root.join("alpha").join(DATE_FILE), "March 3, 2030")
        .expect("marker should be writable");
    let before = snapshot(&fx.root);

    let result = fx.store.create("alpha");

    assert!(
        matches!(result, Err(StoreError::AlreadyExists(ref n)) if n == "alpha"),
        "second create should report a conflict, got {result:?}"
    );
    assert_eq!(snapshot(&fx.root), before, "conflict must not touch the tree");
}

#[test]
fn test_seeding_copies_csv_only() {
    let fx = fixture();
    fx.store.create("alpha").expect("create should succeed");

    let stats = fx.root.join("alpha").join(STATS_DIR);
    for template in ["Standings.csv", "Skaters.CSV"] {
        assert_eq!(
            fs::read(stats.join(template)).expect("seeded file should exist"),
            fs::read(fx.templates.join(template)).expect("template should exist"),
            "{template} should be copied byte for byte"
        );
    }
    assert!(!stats.join("notes.txt").exists());
}

#[test]
fn test_missing_templates_leave_empty_stats() {
    let dir = TempDir::new().expect("TempDir should create test directory");
    let store = SimulationStore::open(dir.path().join("sims"), dir.path().join("missing"))
        .expect("store should open");

    store.create("alpha").expect("create should succeed");

    let stats = dir.path().join("sims").join("alpha").join(STATS_DIR);
    assert!(stats.is_dir());
    assert_eq!(fs::read_dir(stats).expect("read_dir").count(), 0);
}

#[test]
fn test_round_trip_leaves_root_unchanged() {
    let fx = fixture();
    fs::write(fx.root.join("unrelated.txt"), "keep").expect("write");
    let before = snapshot(&fx.root);

    fx.store.create("alpha").expect("create should succeed");
    assert!(fx.store.list().expect("list").contains(&"alpha".to_string()));

    assert!(fx.store.delete("alpha").expect("delete should succeed"));
    assert!(!fx.store.list().expect("list").contains(&"alpha".to_string()));

    assert!(fx.root.is_dir());
    assert_eq!(snapshot(&fx.root), before);
}

#[test]
fn test_delete_removes_nested_content() {
    let fx = fixture();
    fx.store.create("alpha").expect("create should succeed");
    let deep = fx.root.join("alpha").join(STATS_DIR).join("archive").join("2024");
    fs::create_dir_all(&deep).expect("nested dirs");
    fs::write(deep.join("games.csv"), "x").expect("write");

    assert!(fx.store.delete("alpha").expect("delete should succeed"));
    assert!(!fx.root.join("alpha").exists());
}

#[test]
fn test_delete_missing_is_silent() {
    let fx = fixture();
    fx.store.create("beta").expect("create should succeed");
    let before = snapshot(&fx.root);

    assert!(!fx.store.delete("ghost").expect("delete should not fail"));
    assert_eq!(snapshot(&fx.root), before);
}

#[test]
fn test_delete_rejects_escaping_names() {
    let dir = TempDir::new().expect("TempDir should create test directory");
    let root = dir.path().join("sims");
    let outside = dir.path().join("outside");
    fs::create_dir(&outside).expect("outside dir");
    fs::write(outside.join("keep.txt"), "keep").expect("write");
    let store = SimulationStore::open(&root, dir.path().join("missing")).expect("open");

    for name in ["../outside", "..", ".", "/tmp", "a/../../outside"] {
        assert!(!store.delete(name).expect("delete should not fail"));
    }

    assert!(outside.join("keep.txt").exists());
    assert!(root.is_dir());
}

#[test]
fn test_create_rejects_invalid_names() {
    let fx = fixture();
    let before = snapshot(&fx.root);

    for name in ["", "../escape", "has space", "a/b", "dot.name"] {
        assert!(
            matches!(fx.store.create(name), Err(StoreError::InvalidName(_))),
            "{name:?} should be rejected"
        );
    }

    assert_eq!(snapshot(&fx.root), before);
    assert!(!fx.root.parent().expect("parent").join("escape").exists());
}

#[test]
fn test_list_skips_files_and_ignores_contents() {
    let fx = fixture();
    fs::create_dir(fx.root.join("bare")).expect("bare dir");
    fs::write(fx.root.join("loose.txt"), "x").expect("write");
    fx.store.create("alpha").expect("create should succeed");

    assert_eq!(
        fx.store.list().expect("list"),
        vec!["alpha".to_string(), "bare".to_string()]
    );
}

#[test]
fn test_date_sentinels() {
    let fx = fixture();
    fs::create_dir(fx.root.join("bare")).expect("bare dir");

    assert_eq!(fx.store.date("ghost"), DATE_NOT_FOUND);
    assert_eq!(fx.store.date("bare"), DATE_NOT_FOUND);
    assert_eq!(fx.store.date("../etc"), DATE_NOT_FOUND);
}

#[test]
fn test_date_is_trimmed() {
    let fx = fixture();
    fx.store.create("alpha").expect("create should succeed");
    fs::write(fx.root.join("alpha").join(DATE_FILE), "  February 2, 2025\n").expect("write");

    assert_eq!(fx.store.date("alpha"), "February 2, 2025");
}

#[test]
fn test_exists_requires_directory() {
    let fx = fixture();
    fs::write(fx.root.join("file"), "x").expect("write");

    assert!(!fx.store.exists("file"));
    assert!(!fx.store.exists("ghost"));
    assert!(!fx.store.exists(".."));
}

#[test]
fn test_concurrent_create_single_winner() {
    let fx = fixture();

    let results: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| fx.store.create("race")))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("thread should not panic"))
            .collect()
    });

    let wins = results.iter().filter(|r| r.is_ok()).count();
    let conflicts = results
        .iter()
        .filter(|r| matches!(r, Err(StoreError::AlreadyExists(_))))
        .count();
    assert_eq!(wins, 1, "exactly one create should win");
    assert_eq!(conflicts, 7);
}
