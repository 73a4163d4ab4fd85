use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use season_switcher::catalog::build_catalog;
use season_switcher::seasons::{
    ReleaseChannel, builtin_records, load_records_from_file, parse_records_json,
};

fn fixture_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    path
}

#[test]
fn parses_season_feed_fixture() {
    let raw = fs::read_to_string(fixture_path("seasons.json")).expect("fixture file should be readable");
    let records = parse_records_json(&raw).expect("fixture should parse");
    assert_eq!(records.len(), 4);
    assert_eq!(records[0].slug, "df1");
    assert_eq!(records[0].season_icon, "/icons/df1.png");
    assert_eq!(records[0].short_name, "DF1");
    assert_eq!(records[0].channel(), ReleaseChannel::Ptr);
    assert_eq!(records[1].release_channel, None);
}

#[test]
fn accepts_tooltip_source_alias() {
    let records = load_records_from_file(&fixture_path("seasons.json")).expect("fixture should load");
    assert_eq!(records[2].release_channel.as_deref(), Some("beta"));
    assert_eq!(records[2].channel(), ReleaseChannel::Beta);
}

#[test]
fn missing_optional_fields_default_to_empty() {
    let records = load_records_from_file(&fixture_path("seasons.json")).expect("fixture should load");
    let bare = &records[3];
    assert!(bare.season_icon.is_empty());
    assert!(bare.short_name.is_empty());
    assert_eq!(bare.channel(), ReleaseChannel::Live);
}

#[test]
fn missing_feed_file_is_an_error_with_path() {
    let err = load_records_from_file(&fixture_path("does_not_exist.json")).unwrap_err();
    assert!(format!("{err:#}").contains("does_not_exist.json"));
}

#[test]
fn builtin_feed_has_unique_slugs() {
    let records = builtin_records();
    assert!(!records.is_empty());
    let slugs = records.iter().map(|r| r.slug.as_str()).collect::<HashSet<_>>();
    assert_eq!(slugs.len(), records.len());
}

#[test]
fn builtin_feed_builds_ptr_and_live_groups() {
    let catalog = build_catalog(builtin_records());
    let labels = catalog
        .groups()
        .iter()
        .map(|g| g.label.as_str())
        .collect::<Vec<_>>();
    assert_eq!(labels, vec!["PTR Seasons", "Live Seasons"]);
}
