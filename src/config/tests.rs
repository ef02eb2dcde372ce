use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use crate::library::Field;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_tracklist_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("TRACKLIST_CONFIG_PATH", "/tmp/tracklist-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/tracklist-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("tracklist")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("tracklist")
            .join("config.toml")
    );
}

#[test]
fn defaults_are_valid() {
    let s = Settings::default();
    assert!(s.validate().is_ok());
    assert_eq!(s.list.scroll_mode, ScrollModeSetting::Normal);
    assert_eq!(s.list.scrolloff, 2);
    assert_eq!(
        s.list.sort,
        vec!["track", "disc", "album", "date", "albumartistsort"]
    );
    assert!(s.log.file.is_none());
}

#[test]
fn settings_load_from_config_file_and_parse_aliases() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[list]
scroll_mode = "centred"
scrolloff = 4
wrap = true
case_sensitive_sort = true
regex_search = true
sort = ["title", "artist"]
columns = ["artist", "filename", "duration"]
column_separator = "::"

[ui]
header_text = "hello"

[library]
extensions = ["mp3"]
recursive = false
include_hidden = false
follow_links = false

[log]
file = "/tmp/tracklist.log"
level = "debug"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("TRACKLIST_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("TRACKLIST__LIST__SCROLLOFF");

    let s = Settings::load().unwrap();
    assert_eq!(s.list.scroll_mode, ScrollModeSetting::Centered);
    assert_eq!(s.list.scrolloff, 4);
    assert!(s.list.wrap);
    assert!(s.list.case_sensitive_sort);
    assert!(s.list.regex_search);
    assert_eq!(s.list.sort, vec!["title", "artist"]);
    assert_eq!(s.list.columns, vec![Field::Artist, Field::File, Field::Time]);
    assert_eq!(s.list.column_separator, "::");
    assert_eq!(s.ui.header_text, "hello");
    assert_eq!(s.library.extensions, vec!["mp3".to_string()]);
    assert!(!s.library.recursive);
    assert!(!s.library.include_hidden);
    assert!(!s.library.follow_links);
    assert_eq!(
        s.log.file.as_deref(),
        Some(std::path::Path::new("/tmp/tracklist.log"))
    );
    assert_eq!(s.log.level, "debug");
    assert!(s.validate().is_ok());
}

#[test]
fn settings_reject_unknown_column() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[list]
columns = ["artist", "mood"]
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("TRACKLIST_CONFIG_PATH", cfg_path.to_str().unwrap());
    assert!(Settings::load().is_err());
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[list]
scrolloff = 5
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("TRACKLIST_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("TRACKLIST__LIST__SCROLLOFF", "0");

    let s = Settings::load().unwrap();
    assert_eq!(s.list.scrolloff, 0);
}

#[test]
fn validate_flags_bad_sort_key_and_level() {
    let mut s = Settings::default();
    s.list.sort.push("mood".to_string());
    assert!(s.validate().unwrap_err().contains("mood"));

    let mut s = Settings::default();
    s.log.level = "loud".to_string();
    assert!(s.validate().unwrap_err().contains("loud"));

    let mut s = Settings::default();
    s.list.columns.clear();
    assert!(s.validate().is_err());
}
