//! Config and catalog file loading

use tagbuf::catalog::{TagCatalog, TagValidation};
use tagbuf::codec::SerialForm;
use tagbuf::config::TagEditorConfig;
use tagbuf::ConfigError;
use tempfile::TempDir;

#[test]
fn test_config_save_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.yaml");

    let config = TagEditorConfig {
        form: SerialForm::List,
        trim_text: true,
        validation: TagValidation::Any,
        promote_typed_tokens: true,
        history_limit: 7,
    };
    config.save_to(&path).unwrap();

    assert_eq!(TagEditorConfig::load_from(&path).unwrap(), config);
}

#[test]
fn test_config_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = TagEditorConfig::load_from(&dir.path().join("missing.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn test_catalog_load_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalog.yaml");
    std::fs::write(&path, "gift: Gift card\nname: First name\n").unwrap();

    let catalog = TagCatalog::load(&path).unwrap();
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.label("name"), Some("First name"));
}

#[test]
fn test_catalog_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalog.yaml");
    std::fs::write(&path, "gift: [unclosed\n").unwrap();

    assert!(matches!(TagCatalog::load(&path), Err(ConfigError::Parse(_))));
}
