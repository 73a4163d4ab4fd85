use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use season_switcher::catalog::{Catalog, build_catalog};
use season_switcher::keyboard::{KeyHub, Propagation};
use season_switcher::matcher::{FuzzyMatcher, SubstringMatcher};
use season_switcher::picker::{
    PLACEHOLDER_AVATAR, PLACEHOLDER_LABEL, PickerEvent, SeasonSwitcher,
};
use season_switcher::route::Navigator;
use season_switcher::seasons::SeasonRecord;

#[derive(Default)]
struct RecordingNavigator {
    paths: Vec<String>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&mut self, path: &str) {
        self.paths.push(path.to_string());
    }
}

fn record(slug: &str, name: &str, channel: Option<&str>) -> SeasonRecord {
    SeasonRecord {
        name: name.to_string(),
        slug: slug.to_string(),
        season_icon: format!("/icons/{slug}.png"),
        short_name: slug.to_uppercase(),
        release_channel: channel.map(str::to_string),
    }
}

fn catalog() -> Rc<Catalog> {
    Rc::new(build_catalog(&[
        record("df1", "Season One", Some("ptr")),
        record("df2", "Season Two", None),
        record("df3", "Season Three", Some("beta")),
    ]))
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl_k() -> KeyEvent {
    KeyEvent::new(KeyCode::Char('k'), KeyModifiers::CONTROL)
}

fn cmd_k() -> KeyEvent {
    KeyEvent::new(KeyCode::Char('k'), KeyModifiers::SUPER)
}

#[test]
fn mount_selects_season_from_route_param() {
    let hub = KeyHub::new();
    let picker = SeasonSwitcher::mount(catalog(), Some("df2"), &hub);
    assert_eq!(picker.selected().map(|s| s.value), Some("df2".to_string()));
    assert!(!picker.is_open());
}

#[test]
fn mount_without_match_has_no_selection() {
    let hub = KeyHub::new();
    let unknown = SeasonSwitcher::mount(catalog(), Some("unknown"), &hub);
    assert!(unknown.selected().is_none());
    drop(unknown);

    let absent = SeasonSwitcher::mount(catalog(), None, &hub);
    assert!(absent.selected().is_none());
    let trigger = absent.trigger_view();
    assert!(trigger.placeholder);
    assert_eq!(trigger.label, PLACEHOLDER_LABEL);
    assert_eq!(trigger.avatar, PLACEHOLDER_AVATAR);
}

#[test]
fn selecting_updates_state_closes_and_navigates_once() {
    let hub = KeyHub::new();
    let mut picker = SeasonSwitcher::mount(catalog(), Some("df2"), &hub);
    let mut nav = RecordingNavigator::default();
    picker.set_open(true);

    let season = picker
        .catalog()
        .find(Some("df3"))
        .cloned()
        .expect("df3 exists");
    picker.select(&season, &mut nav);

    assert_eq!(picker.selected().map(|s| s.value), Some("df3".to_string()));
    assert!(!picker.is_open());
    assert_eq!(nav.paths, vec!["/season/df3".to_string()]);
}

#[test]
fn shortcut_toggles_and_stops_propagation() {
    let hub = KeyHub::new();
    let picker = SeasonSwitcher::mount(catalog(), None, &hub);

    assert_eq!(hub.dispatch(&ctrl_k()), Propagation::Stop);
    assert!(picker.is_open());
    assert_eq!(hub.dispatch(&cmd_k()), Propagation::Stop);
    assert!(!picker.is_open());

    assert_eq!(hub.dispatch(&key(KeyCode::Char('k'))), Propagation::Continue);
    assert!(!picker.is_open());
}

#[test]
fn unmount_releases_the_shortcut() {
    let hub = KeyHub::new();
    let picker = SeasonSwitcher::mount(catalog(), None, &hub);
    assert_eq!(hub.listener_count(), 1);

    let last = picker.unmount();
    assert!(!last.open);
    assert_eq!(hub.listener_count(), 0);
    assert_eq!(hub.dispatch(&ctrl_k()), Propagation::Continue);
}

#[test]
fn remount_keeps_a_single_listener() {
    let hub = KeyHub::new();
    let mut picker = SeasonSwitcher::mount(catalog(), Some("df1"), &hub);
    for _ in 0..3 {
        picker = picker.remount(Some("df3"), &hub);
    }
    assert_eq!(hub.listener_count(), 1);
    assert_eq!(picker.selected().map(|s| s.value), Some("df3".to_string()));

    // One press, one toggle.
    hub.dispatch(&ctrl_k());
    assert!(picker.is_open());
}

#[test]
fn list_view_orders_groups_and_marks_selection() {
    let hub = KeyHub::new();
    let mut picker = SeasonSwitcher::mount(catalog(), Some("df1"), &hub);
    picker.set_open(true);

    let view = picker.list_view(&FuzzyMatcher);
    let headings = view
        .groups
        .iter()
        .map(|g| g.heading.as_str())
        .collect::<Vec<_>>();
    assert_eq!(headings, vec!["Beta Seasons", "PTR Seasons", "Live Seasons"]);

    let rows = view
        .groups
        .iter()
        .flat_map(|g| g.rows.iter())
        .collect::<Vec<_>>();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].value, "df3");
    assert!(rows[0].highlighted);
    let checked = rows
        .iter()
        .filter(|r| r.checked)
        .map(|r| r.value.as_str())
        .collect::<Vec<_>>();
    assert_eq!(checked, vec!["df1"]);
    assert_eq!(rows[1].avatar, "DF1");
}

#[test]
fn typing_filters_and_enter_selects_highlighted_row() {
    let hub = KeyHub::new();
    let mut picker = SeasonSwitcher::mount(catalog(), None, &hub);
    let mut nav = RecordingNavigator::default();

    hub.dispatch(&ctrl_k());
    for c in "two".chars() {
        assert_eq!(
            picker.handle_key(&key(KeyCode::Char(c)), &SubstringMatcher, &mut nav),
            PickerEvent::Handled
        );
    }
    let view = picker.list_view(&SubstringMatcher);
    assert_eq!(view.query, "two");
    assert_eq!(view.row_count(), 1);

    let outcome = picker.handle_key(&key(KeyCode::Enter), &SubstringMatcher, &mut nav);
    match outcome {
        PickerEvent::Selected(season) => assert_eq!(season.value, "df2"),
        other => panic!("expected selection, got {other:?}"),
    }
    assert!(!picker.is_open());
    assert_eq!(nav.paths, vec!["/season/df2".to_string()]);
}

#[test]
fn arrows_clamp_and_pick_the_row_under_the_cursor() {
    let hub = KeyHub::new();
    let mut picker = SeasonSwitcher::mount(catalog(), None, &hub);
    let mut nav = RecordingNavigator::default();
    picker.set_open(true);

    picker.handle_key(&key(KeyCode::Up), &FuzzyMatcher, &mut nav);
    assert_eq!(picker.snapshot().highlighted, 0);
    for _ in 0..5 {
        picker.handle_key(&key(KeyCode::Down), &FuzzyMatcher, &mut nav);
    }
    assert_eq!(picker.snapshot().highlighted, 2);
    picker.handle_key(&key(KeyCode::Home), &FuzzyMatcher, &mut nav);
    picker.handle_key(&key(KeyCode::Down), &FuzzyMatcher, &mut nav);

    picker.handle_key(&key(KeyCode::Enter), &FuzzyMatcher, &mut nav);
    assert_eq!(picker.selected().map(|s| s.value), Some("df1".to_string()));
    assert_eq!(nav.paths, vec!["/season/df1".to_string()]);
}

#[test]
fn escape_closes_and_clears_the_query() {
    let hub = KeyHub::new();
    let mut picker = SeasonSwitcher::mount(catalog(), None, &hub);
    let mut nav = RecordingNavigator::default();
    picker.set_open(true);

    picker.handle_key(&key(KeyCode::Char('x')), &FuzzyMatcher, &mut nav);
    picker.handle_key(&key(KeyCode::Esc), &FuzzyMatcher, &mut nav);
    assert!(!picker.is_open());

    picker.set_open(true);
    assert_eq!(picker.snapshot().query, "");
    assert!(nav.paths.is_empty());
}

#[test]
fn enter_with_no_visible_rows_does_nothing() {
    let hub = KeyHub::new();
    let mut picker = SeasonSwitcher::mount(catalog(), Some("df2"), &hub);
    let mut nav = RecordingNavigator::default();
    picker.set_open(true);

    for c in "zzz".chars() {
        picker.handle_key(&key(KeyCode::Char(c)), &FuzzyMatcher, &mut nav);
    }
    assert!(picker.list_view(&FuzzyMatcher).is_empty());
    assert_eq!(
        picker.handle_key(&key(KeyCode::Enter), &FuzzyMatcher, &mut nav),
        PickerEvent::Handled
    );
    assert!(picker.is_open());
    assert_eq!(picker.selected().map(|s| s.value), Some("df2".to_string()));
    assert!(nav.paths.is_empty());

    picker.handle_key(&key(KeyCode::Backspace), &FuzzyMatcher, &mut nav);
    assert_eq!(picker.snapshot().query, "zz");
}

#[test]
fn closed_trigger_opens_on_enter_and_ignores_other_keys() {
    let hub = KeyHub::new();
    let mut picker = SeasonSwitcher::mount(catalog(), None, &hub);
    let mut nav = RecordingNavigator::default();

    assert_eq!(
        picker.handle_key(&key(KeyCode::Char('q')), &FuzzyMatcher, &mut nav),
        PickerEvent::Ignored
    );
    assert!(!picker.is_open());
    assert_eq!(
        picker.handle_key(&key(KeyCode::Enter), &FuzzyMatcher, &mut nav),
        PickerEvent::Handled
    );
    assert!(picker.is_open());
    assert!(picker.trigger_view().expanded);
}

#[test]
fn control_chords_are_not_typed_into_the_query() {
    let hub = KeyHub::new();
    let mut picker = SeasonSwitcher::mount(catalog(), None, &hub);
    let mut nav = RecordingNavigator::default();
    picker.set_open(true);

    let chord = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL);
    assert_eq!(
        picker.handle_key(&chord, &FuzzyMatcher, &mut nav),
        PickerEvent::Ignored
    );
    assert_eq!(picker.snapshot().query, "");
}
