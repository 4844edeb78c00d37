//! Plugin configuration, themes and the application catalog.

use std::collections::BTreeMap;
use std::io::Write;

use zofi::infrastructure::load_apps;
use zofi::{Config, LaunchMode, MeasureKind, ZofiError};

fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

#[test]
fn empty_map_gives_defaults() {
    let config = Config::from_zellij(&BTreeMap::new()).unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.prompt(), "run: ");
}

#[test]
fn every_option_is_read() {
    let config = Config::from_zellij(&map(&[
        ("mode", "DRUN"),
        ("prompt_text", "apps> "),
        ("num_results", "8"),
        ("result_spacing", "2"),
        ("input_width", "20"),
        ("selection_padding", "-1"),
        ("padding", "0"),
        ("horizontal", "True"),
        ("fuzzy_match", "TRUE"),
        ("border", "false"),
        ("measure", "ascii"),
        ("theme", "paper"),
        ("apps_file", "/tmp/apps.toml"),
        ("trace_level", "zofi=debug"),
    ]))
    .unwrap();

    assert_eq!(config.mode, LaunchMode::Drun);
    assert_eq!(config.prompt(), "apps> ");
    assert_eq!(config.num_results, 8);
    assert_eq!(config.result_spacing, 2);
    assert_eq!(config.input_width, 20);
    assert_eq!(config.selection_padding, -1);
    assert_eq!(config.padding, 0);
    assert!(config.horizontal);
    assert!(config.fuzzy_match);
    assert!(!config.border);
    assert_eq!(config.measure, MeasureKind::Ascii);
    assert_eq!(config.load_theme().name, "paper");
    assert_eq!(config.apps_path().to_str(), Some("/tmp/apps.toml"));
    assert_eq!(config.trace_level, "zofi=debug");
    assert!(config.warnings.is_empty());

    let layout = config.layout_options();
    assert_eq!(layout.prompt, "apps> ");
    assert!(layout.horizontal);
}

#[test]
fn malformed_values_fall_back_with_warnings() {
    let config = Config::from_zellij(&map(&[
        ("num_results", "-3"),
        ("horizontal", "yes"),
        ("measure", "braille"),
    ]))
    .unwrap();

    assert_eq!(config.num_results, 0);
    assert!(!config.horizontal);
    assert_eq!(config.measure, MeasureKind::Unicode);
    assert_eq!(config.warnings.len(), 3);
    assert!(config.warnings.iter().any(|w| w.contains("horizontal")));
}

#[test]
fn invalid_mode_is_fatal() {
    let err = Config::from_zellij(&map(&[("mode", "window")])).unwrap_err();
    assert!(matches!(err, ZofiError::Config(_)));
}

#[test]
fn dmenu_prompt_default() {
    let config = Config::from_zellij(&map(&[("mode", "dmenu")])).unwrap();
    assert_eq!(config.prompt(), "> ");
}

#[test]
fn theme_file_overrides_theme_name() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r##"name = "custom"

[colors]
background = "#000000"
foreground = "#ffffff"
prompt = "#ff0000"
selection_fg = "#000000"
selection_bg = "#00ff00"
border = "#777777"
"##
    )
    .unwrap();

    let config = Config {
        theme_name: "paper".into(),
        theme_file: Some(file.path().to_string_lossy().into_owned()),
        ..Config::default()
    };
    let theme = config.load_theme();
    assert_eq!(theme.name, "custom");
    assert_eq!(theme.colors.selection_match, None);
}

#[test]
fn broken_theme_file_falls_back_to_name() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "name = 3").unwrap();

    let config = Config {
        theme_name: "paper".into(),
        theme_file: Some(file.path().to_string_lossy().into_owned()),
        ..Config::default()
    };
    assert_eq!(config.load_theme().name, "paper");

    let config = Config {
        theme_name: "neon".into(),
        ..Config::default()
    };
    assert_eq!(config.load_theme().name, "midnight");
}

#[test]
fn catalog_loads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("apps.toml");
    std::fs::write(
        &path,
        r#"
[[app]]
name = "Firefox"
exec = "firefox %u"
comment = "Web browser"

[[app]]
name = ""
exec = "nothing"

[[app]]
name = "Terminal"
exec = "alacritty"
"#,
    )
    .unwrap();

    let apps = load_apps(&path).unwrap();
    let names: Vec<&str> = apps.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Firefox", "Terminal"]);
    assert_eq!(apps[0].command(), "firefox");
    assert_eq!(apps[0].comment.as_deref(), Some("Web browser"));
}

#[test]
fn missing_or_invalid_catalog_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = load_apps(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(missing, ZofiError::Io(_)));

    let path = dir.path().join("apps.toml");
    std::fs::write(&path, "[[app]]\nname = 1\n").unwrap();
    assert!(matches!(load_apps(&path).unwrap_err(), ZofiError::Catalog(_)));
}
