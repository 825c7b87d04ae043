//! Environment overrides live in their own test binary: `Jail` serializes
//! access to process env vars only among jailed tests.

use figment::Jail;

use inspira_core::config::{Config, StopWords};

#[test]
fn inspira_env_vars_override_config_files() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[recommend]\nmax_limit = 50\ndefault_limit = 5\n")?;
        jail.create_file("config.test.toml", "[engine]\nngram_max = 3\n")?;
        jail.set_env("RUST_ENV", "test");
        jail.set_env("INSPIRA_RECOMMEND__MAX_LIMIT", 20);
        jail.set_env("INSPIRA_ENGINE__STOP_WORDS", "none");
        jail.set_env("INSPIRA_DATA__CATALOG_PATH", "/data/items.json");

        let config = Config::load().map_err(|e| e.to_string())?;
        let settings = config.settings().map_err(|e| e.to_string())?;
        assert_eq!(settings.recommend.max_limit, 20);
        assert_eq!(settings.recommend.default_limit, 5);
        assert_eq!(settings.engine.ngram_max, 3);
        assert_eq!(settings.engine.stop_words, StopWords::None);
        assert_eq!(settings.data.catalog_path, "/data/items.json");
        Ok(())
    });
}

#[test]
fn env_override_is_still_validated() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[recommend]\ndefault_limit = 10\n")?;
        jail.set_env("INSPIRA_RECOMMEND__MAX_LIMIT", 5);
        assert!(Config::load().is_err());
        Ok(())
    });
}
