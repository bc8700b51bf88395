use std::fs;
use std::path::PathBuf;

use boardedit::config::{ConfigError, RestoreSettings, Settings, resolve_config_path};

#[test]
fn test_full_settings_file_resolves_relative_paths() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("boardedit.json");
    let content = r#"{
        "leaderboard_file": "site/src/data/leaderboard-data.ts",
        "constants_file": "site/src/constants.ts",
        "git_repo_path": "site",
        "date_file": "site/src/data/date.ts",
        "slideshow_file": "site/src/components/ImageSlideshow.tsx",
        "restore": {
            "folder": "site",
            "repo_url": "https://example.com/site.git"
        },
        "commit_message": "Weekly update",
        "remote": "upstream",
        "pull_before_push": false,
        "log_file": "boardedit.log"
    }"#;
    fs::write(&path, content).unwrap();

    let settings = Settings::load(&path).unwrap();
    let base = dir.path();
    assert_eq!(
        settings.leaderboard_file,
        base.join("site/src/data/leaderboard-data.ts")
    );
    assert_eq!(
        settings.slideshow_file().unwrap(),
        base.join("site/src/components/ImageSlideshow.tsx")
    );
    assert_eq!(
        settings.restore().unwrap(),
        &RestoreSettings {
            folder: base.join("site"),
            repo_url: "https://example.com/site.git".to_string(),
        }
    );
    assert_eq!(settings.log_file, Some(base.join("boardedit.log")));

    let sync = settings.sync_options();
    assert_eq!(sync.remote, "upstream");
    assert_eq!(sync.message, "Weekly update");
    assert!(!sync.pull_first);
}

#[test]
fn test_legacy_config_form_keys_are_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config_form.json");
    let content = r#"{
        "LEADERBOARD_FILE": "/srv/site/src/leaderboard-data.ts",
        "CONSTANTS_FILE": "/srv/site/src/constants.ts",
        "GIT_REPO_PATH": "/srv/site",
        "DATE_CONFIG": "/srv/site/src/date.ts",
        "SLIDESHOW_FILE": "/srv/site/src/ImageSlideshow.tsx"
    }"#;
    fs::write(&path, content).unwrap();

    let settings = Settings::load(&path).unwrap();
    assert_eq!(settings.git_repo_path, PathBuf::from("/srv/site"));
    assert_eq!(
        settings.slideshow_file().unwrap(),
        PathBuf::from("/srv/site/src/ImageSlideshow.tsx")
    );
    assert!(settings.restore().is_err());
}

#[test]
fn test_explicit_path_wins_even_when_missing() {
    let dir = tempfile::tempdir().unwrap();
    let local = dir.path().join("boardedit.json");
    fs::write(&local, "{}").unwrap();
    let explicit = dir.path().join("missing.json");

    let resolved = resolve_config_path(Some(&explicit), &local, &local).unwrap();
    assert_eq!(resolved, explicit);
    assert!(matches!(
        Settings::load(&resolved).unwrap_err(),
        ConfigError::Read { .. }
    ));
}

#[test]
fn test_not_found_lists_searched_locations() {
    let dir = tempfile::tempdir().unwrap();
    let local = dir.path().join("boardedit.json");
    let global = dir.path().join("config").join("config.json");
    let err = resolve_config_path(None, &local, &global).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("boardedit.json"));
    assert!(message.contains("config.json"));
}
