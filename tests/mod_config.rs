use aqlfilter::FilterError;
use aqlfilter::config::{FilterConfig, load_config_with};
use std::fs;

#[test]
fn explicit_file_then_search_paths_then_env() {
    let dir = tempfile::tempdir().unwrap();
    let explicit = dir.path().join("explicit.toml");
    fs::write(&explicit, "doc_var = \"first\"\n[fields]\nsport = \"sports\"\n").unwrap();
    let other = dir.path().join("other.toml");
    fs::write(
        &other,
        "doc_var = \"second\"\ncollection = \"players\"\n[fields]\nsport = \"games\"\nemail = \"email\"\n",
    )
    .unwrap();

    let cfg = load_config_with(Some(&explicit), &[other.clone(), dir.path().join("absent.toml")], |k| {
        (k == "AQLFILTER_VERT_VAR").then(|| "v".to_string())
    })
    .unwrap();
    assert_eq!(cfg.doc_var(), "first");
    assert_eq!(cfg.collection.as_deref(), Some("players"));
    assert_eq!(cfg.vert_var.as_deref(), Some("v"));
    assert_eq!(cfg.fields.get("sport"), Some("sports"));
    assert_eq!(cfg.fields.get("email"), Some("email"));
}

#[test]
fn broken_discovered_file_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let broken = dir.path().join("broken.toml");
    fs::write(&broken, "doc_var = ").unwrap();
    let cfg = load_config_with(None, &[broken], |_| None).unwrap();
    assert_eq!(cfg, FilterConfig::default());
}

#[test]
fn missing_explicit_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_config_with(Some(&dir.path().join("nope.toml")), &[], |_| None).unwrap_err();
    assert!(matches!(err, FilterError::Io(_)));
}
