use std::fs::File;
use std::io::Write;
use tempfile::tempdir;

use file_name_pattern::config::Config;
use file_name_pattern::pattern::TemplateSource;

#[test]
fn config_from_path_parses_toml() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("cfg.toml");
    let mut f = File::create(&cfg_path).unwrap();
    let toml = r#"
library_root = "/tmp/music"
folder_template = "%album_artist%%path_sep%%album%"
file_template = "%title%"
log_dir = "/tmp"

[filter]
lowercase = true
"#;
    f.write_all(toml.as_bytes()).unwrap();
    let cfg = Config::from_path(&cfg_path).expect("parse config");
    assert_eq!(cfg.library_root.to_str().unwrap(), "/tmp/music");
    assert_eq!(cfg.log_dir.as_deref().and_then(|p| p.to_str()), Some("/tmp"));
    assert!(cfg.filter.lowercase);
    assert_eq!(cfg.filter.replace_spaces, None);
    assert_eq!(cfg.folder_template().unwrap(), "%album_artist%%path_sep%%album%");
    assert_eq!(cfg.file_template().unwrap(), "%title%");
}

#[test]
fn empty_config_uses_defaults() {
    let cfg: Config = toml::from_str("").unwrap();
    assert!(cfg.folder_template.is_none());
    assert!(cfg.log_dir.is_none());
    assert!(cfg.filter().is_none());
    assert!(cfg.folder_template().is_err());
    assert!(cfg.file_template().is_err());
}

#[test]
fn missing_config_file_is_an_error() {
    let td = tempdir().unwrap();
    assert!(Config::from_path(&td.path().join("nope.toml")).is_err());
}

#[test]
fn filter_replaces_spaces() {
    let cfg: Config = toml::from_str(
        r#"
[filter]
replace_spaces = "-"
"#,
    )
    .unwrap();
    let filter = cfg.filter().expect("filter configured");
    assert_eq!(filter("Album Artist/Some Song"), "Album-Artist/Some-Song");
}
