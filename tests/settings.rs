use bookmark_search::index::SearchOptions;
use bookmark_search::settings::Settings;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn missing_file_gives_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    let s = Settings::load(path.to_str().unwrap()).unwrap();
    assert_eq!(s.max_results, 20);
    assert_eq!(s.min_score, 5);
    assert_eq!(s.command_prefix, Some('/'));
    assert!(s.enable_favicons);
    assert!(s.enable_toasts);
    assert!(!s.debug_logging);
}

#[test]
fn partial_file_fills_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{"max_results": 5, "command_prefix": ":"}"#).unwrap();
    let s = Settings::load(path.to_str().unwrap()).unwrap();
    assert_eq!(s.max_results, 5);
    assert_eq!(s.command_prefix, Some(':'));
    assert_eq!(s.favicon_timeout(), Duration::from_secs(5));

    let options = SearchOptions::from(&s);
    assert_eq!(options.max_results, 5);
    assert_eq!(options.command_prefix, Some(':'));
}

#[test]
fn save_then_load_keeps_bookmark_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    let s = Settings {
        bookmarks_path: Some(PathBuf::from("/tmp/Bookmarks")),
        ..Settings::default()
    };
    s.save(path.to_str().unwrap()).unwrap();
    let loaded = Settings::load(path.to_str().unwrap()).unwrap();
    assert_eq!(loaded.bookmarks_path(), Some(PathBuf::from("/tmp/Bookmarks")));
}

#[test]
fn invalid_timeout_falls_back() {
    let s = Settings {
        favicon_timeout_secs: -1.0,
        ..Settings::default()
    };
    assert_eq!(s.favicon_timeout(), Duration::from_secs(5));
}
