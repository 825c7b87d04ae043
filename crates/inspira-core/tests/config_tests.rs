use std::fs;
use std::path::Path;
use tempfile::TempDir;

use inspira_core::config::{resolve_with_base, Config, Settings, StopWords};

#[test]
fn defaults_apply_without_config_files() {
    let tmp = TempDir::new().unwrap();
    let config = Config::load_from(tmp.path(), "dev").expect("config");
    let settings = config.settings().expect("settings");

    assert_eq!(settings, Settings::default());
    assert_eq!(settings.engine.ngram_min, 1);
    assert_eq!(settings.engine.ngram_max, 2);
    assert_eq!(settings.engine.stop_words, StopWords::English);
    assert_eq!(settings.recommend.default_limit, 10);
    assert_eq!(settings.recommend.max_limit, 50);
}

#[test]
fn env_overlay_overrides_base_file() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("config.toml"),
        "[engine]\nngram_max = 3\n\n[recommend]\ndefault_limit = 5\n",
    )
    .unwrap();
    fs::write(tmp.path().join("config.test.toml"), "[engine]\nstop_words = \"none\"\n").unwrap();

    let config = Config::load_from(tmp.path(), "test").expect("config");
    let settings = config.settings().expect("settings");

    assert_eq!(settings.engine.ngram_max, 3);
    assert_eq!(settings.engine.stop_words, StopWords::None);
    assert_eq!(settings.recommend.default_limit, 5);
    assert_eq!(settings.recommend.max_limit, 50);

    let limit: usize = config.get("recommend.default_limit").expect("key");
    assert_eq!(limit, 5);
}

#[test]
fn invalid_ranges_are_rejected() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("config.toml"), "[engine]\nngram_min = 3\nngram_max = 2\n").unwrap();
    assert!(Config::load_from(tmp.path(), "dev").is_err());

    let mut settings = Settings::default();
    settings.recommend.default_limit = 80;
    assert!(settings.validate().is_err());

    settings.recommend.default_limit = 0;
    assert!(settings.validate().is_err());

    assert!(Settings::default().validate().is_ok());
}

#[test]
fn relative_paths_resolve_against_base() {
    let base = Path::new("/srv/inspira");
    assert_eq!(resolve_with_base(base, "data/catalog.json"), base.join("data/catalog.json"));
    assert_eq!(resolve_with_base(base, "/abs/catalog.json"), Path::new("/abs/catalog.json"));
}

#[test]
fn catalog_path_resolves_against_config_dir() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("config.toml"), "[data]\ncatalog_path = \"items/catalog.json\"\n").unwrap();
    let config = Config::load_from(tmp.path(), "dev").expect("config");
    assert_eq!(config.catalog_path().expect("path"), tmp.path().join("items/catalog.json"));

    fs::write(tmp.path().join("config.dev.toml"), "[data]\ncatalog_path = \"/srv/catalog.json\"\n").unwrap();
    let config = Config::load_from(tmp.path(), "dev").expect("config");
    assert_eq!(config.catalog_path().expect("path"), Path::new("/srv/catalog.json"));
}
