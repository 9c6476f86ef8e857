//! Config file discovery for the deckgen binary.
//!
//! Resolution chain: `--config` flag > `DECKGEN_CONFIG` env var >
//! `./config.toml` > `$XDG_CONFIG_HOME/deckgen/config.toml` (or
//! `~/.config/deckgen/config.toml`) > built-in defaults.
//!
//! An explicitly named file (flag or env var) must be readable. The implicit
//! locations are only used when the file exists.

use std::path::{Path, PathBuf};

use anyhow::Result;

use deckgen_core::DeckConfig;

const CONFIG_ENV: &str = "DECKGEN_CONFIG";
const CONFIG_FILE: &str = "config.toml";

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the per-user deckgen config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/deckgen` or `~/.config/deckgen`,
/// also on macOS.
pub fn user_config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg.is_empty() {
            return PathBuf::from(xdg).join("deckgen");
        }
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("deckgen")
}

/// Where the configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Flag(PathBuf),
    Env(PathBuf),
    WorkingDir(PathBuf),
    UserDir(PathBuf),
    Defaults,
}

impl ConfigSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Flag(p) | Self::Env(p) | Self::WorkingDir(p) | Self::UserDir(p) => Some(p),
            Self::Defaults => None,
        }
    }
}

/// Pick the config file to use. `cwd` is the directory searched for an
/// implicit `config.toml`.
pub fn locate(cli_path: Option<&Path>, cwd: &Path) -> ConfigSource {
    if let Some(path) = cli_path {
        return ConfigSource::Flag(path.to_path_buf());
    }
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        if !path.trim().is_empty() {
            return ConfigSource::Env(PathBuf::from(path));
        }
    }
    let local = cwd.join(CONFIG_FILE);
    if local.is_file() {
        return ConfigSource::WorkingDir(local);
    }
    let user = user_config_dir().join(CONFIG_FILE);
    if user.is_file() {
        return ConfigSource::UserDir(user);
    }
    ConfigSource::Defaults
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Fully resolved configuration, ready for use.
#[derive(Debug)]
pub struct ResolvedConfig {
    pub config: DeckConfig,
    pub source: ConfigSource,
}

/// Locate and load the configuration relative to the working directory.
pub fn resolve(cli_path: Option<&Path>) -> Result<ResolvedConfig> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    resolve_in(cli_path, &cwd)
}

fn resolve_in(cli_path: Option<&Path>, cwd: &Path) -> Result<ResolvedConfig> {
    let source = locate(cli_path, cwd);
    let config = match source.path() {
        Some(path) => DeckConfig::load(path)?,
        None => DeckConfig::default(),
    };
    tracing::info!(source = ?source, "configuration resolved");
    Ok(ResolvedConfig { config, source })
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn lock_env() -> std::sync::MutexGuard<'static, ()> {
        crate::test_util::lock_env()
    }

    /// Point the user config dir at `home` and clear DECKGEN_CONFIG, run `f`,
    /// then restore the previous environment.
    fn with_isolated_env<T>(home: &Path, f: impl FnOnce() -> T) -> T {
        let orig_xdg = std::env::var("XDG_CONFIG_HOME").ok();
        let orig_cfg = std::env::var(CONFIG_ENV).ok();
        unsafe { std::env::set_var("XDG_CONFIG_HOME", home) };
        unsafe { std::env::remove_var(CONFIG_ENV) };

        let out = f();

        match orig_xdg {
            Some(x) => unsafe { std::env::set_var("XDG_CONFIG_HOME", x) },
            None => unsafe { std::env::remove_var("XDG_CONFIG_HOME") },
        }
        match orig_cfg {
            Some(c) => unsafe { std::env::set_var(CONFIG_ENV, c) },
            None => unsafe { std::env::remove_var(CONFIG_ENV) },
        }
        out
    }

    #[test]
    fn defaults_when_nothing_is_present() {
        let _lock = lock_env();
        let tmp = tempfile::TempDir::new().unwrap();
        let cwd = tmp.path().join("work");
        std::fs::create_dir_all(&cwd).unwrap();

        let resolved = with_isolated_env(&tmp.path().join("xdg"), || resolve_in(None, &cwd)).unwrap();
        assert_eq!(resolved.source, ConfigSource::Defaults);
        assert_eq!(resolved.config, DeckConfig::default());
    }

    #[test]
    fn flag_wins_over_env_and_working_dir() {
        let _lock = lock_env();
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::write(tmp.path().join(CONFIG_FILE), "[llm]\nmodel = \"local\"\n").unwrap();
        let flag = tmp.path().join("flag.toml");
        std::fs::write(&flag, "[llm]\nmodel = \"flagged\"\n").unwrap();

        let resolved = with_isolated_env(tmp.path(), || {
            unsafe { std::env::set_var(CONFIG_ENV, tmp.path().join("env.toml")) };
            resolve_in(Some(&flag), tmp.path())
        })
        .unwrap();
        assert_eq!(resolved.source, ConfigSource::Flag(flag));
        assert_eq!(resolved.config.llm.model, "flagged");
    }

    #[test]
    fn env_var_wins_over_working_dir() {
        let _lock = lock_env();
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::write(tmp.path().join(CONFIG_FILE), "[llm]\nmodel = \"local\"\n").unwrap();
        let env_path = tmp.path().join("env.toml");
        std::fs::write(&env_path, "[llm]\nmodel = \"from-env\"\n").unwrap();

        let resolved = with_isolated_env(tmp.path(), || {
            unsafe { std::env::set_var(CONFIG_ENV, &env_path) };
            resolve_in(None, tmp.path())
        })
        .unwrap();
        assert_eq!(resolved.source, ConfigSource::Env(env_path));
        assert_eq!(resolved.config.llm.model, "from-env");
    }

    #[test]
    fn working_dir_wins_over_user_dir() {
        let _lock = lock_env();
        let tmp = tempfile::TempDir::new().unwrap();
        let xdg = tmp.path().join("xdg");
        std::fs::create_dir_all(xdg.join("deckgen")).unwrap();
        std::fs::write(xdg.join("deckgen").join(CONFIG_FILE), "[llm]\nmodel = \"user\"\n").unwrap();
        let cwd = tmp.path().join("work");
        std::fs::create_dir_all(&cwd).unwrap();

        let from_user = with_isolated_env(&xdg, || resolve_in(None, &cwd)).unwrap();
        assert_eq!(from_user.config.llm.model, "user");
        assert!(matches!(from_user.source, ConfigSource::UserDir(_)));

        std::fs::write(cwd.join(CONFIG_FILE), "[llm]\nmodel = \"local\"\n").unwrap();
        let from_cwd = with_isolated_env(&xdg, || resolve_in(None, &cwd)).unwrap();
        assert_eq!(from_cwd.config.llm.model, "local");
        assert_eq!(from_cwd.source, ConfigSource::WorkingDir(cwd.join(CONFIG_FILE)));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let _lock = lock_env();
        let tmp = tempfile::TempDir::new().unwrap();
        let missing = tmp.path().join("nope.toml");

        let err = with_isolated_env(tmp.path(), || resolve_in(Some(&missing), tmp.path())).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("nope.toml"), "unexpected error: {msg}");
    }

    #[test]
    fn relative_template_dir_follows_config_file() {
        let _lock = lock_env();
        let tmp = tempfile::TempDir::new().unwrap();
        let flag = tmp.path().join("deck.toml");
        std::fs::write(&flag, "[generator]\ntemplate_dir = \"tpl\"\n").unwrap();

        let resolved = with_isolated_env(tmp.path(), || resolve_in(Some(&flag), tmp.path())).unwrap();
        assert_eq!(resolved.config.generator.template_dir, tmp.path().join("tpl"));
    }

    #[test]
    fn user_config_dir_ends_with_deckgen() {
        let _lock = lock_env();
        assert!(user_config_dir().ends_with("deckgen"));
    }
}
