//! Integration tests for loading project configuration files.
//!
//! Covers:
//! - The reference project file with every core setting written out
//! - Idempotent loading
//! - Output style validation and default
//! - Loading from disk and resolving against a project tree

use compass_config::{
    ConfigError, LoadOptions, OutputStyle, PathRole, ProjectType, load, load_file,
};
use std::path::PathBuf;
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

const REFERENCE: &str = r#"add_import_path "/shared/styles"
require "susy"
project_type = "stand-alone"
http_path = ".."
images_dir = "i"
sass_dir = "sass"
css_dir = "css"
javascripts_dir = "js"
output_style = "nested"
"#;

#[test]
fn test_reference_source_sets_exactly_nine_fields() {
    let descriptor = load(REFERENCE).unwrap();

    assert_eq!(descriptor.import_paths(), ["/shared/styles"]);
    assert_eq!(descriptor.plugins().collect::<Vec<_>>(), vec!["susy"]);
    assert_eq!(descriptor.project_type(), Some(ProjectType::StandAlone));
    assert_eq!(descriptor.path(PathRole::Http), Some(".."));
    assert_eq!(descriptor.path(PathRole::Images), Some("i"));
    assert_eq!(descriptor.path(PathRole::Sass), Some("sass"));
    assert_eq!(descriptor.path(PathRole::Css), Some("css"));
    assert_eq!(descriptor.path(PathRole::Javascripts), Some("js"));
    assert_eq!(descriptor.output_style(), OutputStyle::Nested);

    // Nothing inferred beyond what was written
    assert_eq!(descriptor.path(PathRole::Fonts), None);
    assert_eq!(descriptor.line_comments(), None);
    assert_eq!(descriptor.relative_assets(), None);
    assert_eq!(descriptor.preferred_syntax(), None);
    assert_eq!(descriptor.environment(), None);
    assert_eq!(
        descriptor.explicit_keys(),
        vec![
            "add_import_path",
            "require",
            "project_type",
            "http_path",
            "sass_dir",
            "css_dir",
            "images_dir",
            "javascripts_dir",
            "output_style",
        ]
    );
}

#[test]
fn test_load_is_idempotent() {
    let first = load(REFERENCE).unwrap();
    let second = load(REFERENCE).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_fixture_file_matches_reference() {
    let loaded = load_file(fixture("config.rb"), &LoadOptions::strict()).unwrap();
    assert!(loaded.unknown_keys.is_empty());
    assert_eq!(loaded.descriptor, load(REFERENCE).unwrap());
}

#[test]
fn test_every_other_output_style_value_rejected() {
    for value in ["invalid", "Nested", "minified", ""] {
        let source = format!("output_style = {value:?}");
        match load(&source) {
            Err(ConfigError::MalformedConfiguration { key, .. }) => {
                assert_eq!(key, "output_style", "value {value:?}");
            }
            other => panic!("Expected MalformedConfiguration for {value:?}, got {other:?}"),
        }
    }
}

#[test]
fn test_every_output_style_member_accepted() {
    for style in OutputStyle::all() {
        let descriptor = load(&format!("output_style = :{}", style.name())).unwrap();
        assert_eq!(descriptor.output_style(), *style);
    }
}

#[test]
fn test_omitted_output_style_defaults_to_nested() {
    let descriptor = load("css_dir = \"css\"\n").unwrap();
    assert_eq!(descriptor.output_style(), OutputStyle::Nested);
    assert!(!descriptor.explicit_keys().contains(&"output_style"));
}

#[test]
fn test_invalid_style_fixture_reports_key() {
    let err = load_file(fixture("invalid_style.rb"), &LoadOptions::default()).unwrap_err();
    assert_eq!(err.key(), Some("output_style"));
    assert!(err.to_string().contains("`output_style`"));
}

#[test]
fn test_resolve_fixture_layout_in_project_tree() {
    let temp = TempDir::new().unwrap();
    // No fonts/ directory: fonts_dir is not declared, so it is not checked
    for dir in ["i", "sass", "css", "js"] {
        std::fs::create_dir(temp.path().join(dir)).unwrap();
    }
    let descriptor = load(
        &std::fs::read_to_string(fixture("config.rb"))
            .unwrap()
            .replace("/shared/styles", "shared"),
    )
    .unwrap();

    let layout = descriptor.resolve(temp.path());
    // The import path directory is still missing
    let err = layout.verify().unwrap_err();
    assert_eq!(err.key(), Some("add_import_path"));

    std::fs::create_dir(temp.path().join("shared")).unwrap();
    layout.verify().unwrap();
    assert_eq!(layout.asset_url(PathRole::Javascripts, "app.js"), "../js/app.js");
}
