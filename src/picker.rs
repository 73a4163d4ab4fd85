use std::cell::RefCell;
use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::catalog::{Catalog, Season};
use crate::keyboard::{KeyHub, Propagation, Subscription, is_toggle_shortcut};
use crate::matcher::RowMatcher;
use crate::route::{Navigator, season_path};

pub const TRIGGER_TITLE: &str = "Select a season";
pub const PLACEHOLDER_LABEL: &str = "Select a Season";
pub const PLACEHOLDER_AVATAR: &str = "WoW";
pub const SEARCH_PLACEHOLDER: &str = "Search season...";
pub const EMPTY_LABEL: &str = "No season found.";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PickerState {
    pub open: bool,
    pub selected: Option<Season>,
    pub query: String,
    // Index into the flattened visible rows.
    pub highlighted: usize,
}

impl PickerState {
    fn set_open(&mut self, open: bool) {
        if self.open != open {
            self.query.clear();
            self.highlighted = 0;
        }
        self.open = open;
    }

    fn toggle(&mut self) {
        self.set_open(!self.open);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerEvent {
    Ignored,
    Handled,
    Selected(Season),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerView {
    pub avatar: String,
    pub label: String,
    pub placeholder: bool,
    pub expanded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub value: String,
    pub label: String,
    pub avatar: String,
    pub checked: bool,
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupView {
    pub heading: String,
    pub rows: Vec<RowView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    pub query: String,
    pub groups: Vec<GroupView>,
}

impl ListView {
    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(|group| group.rows.is_empty())
    }

    pub fn row_count(&self) -> usize {
        self.groups.iter().map(|group| group.rows.len()).sum()
    }
}

/// A mounted season picker. Dropping it releases its keyboard shortcut.
pub struct SeasonSwitcher {
    catalog: Rc<Catalog>,
    state: Rc<RefCell<PickerState>>,
    _shortcut: Subscription,
}

impl SeasonSwitcher {
    pub fn mount(catalog: Rc<Catalog>, route_param: Option<&str>, hub: &KeyHub) -> Self {
        let state = Rc::new(RefCell::new(PickerState {
            selected: catalog.find(route_param).cloned(),
            ..PickerState::default()
        }));

        let weak = Rc::downgrade(&state);
        let shortcut = hub.subscribe(move |key| {
            if !is_toggle_shortcut(key) {
                return Propagation::Continue;
            }
            let Some(state) = weak.upgrade() else {
                return Propagation::Continue;
            };
            state.borrow_mut().toggle();
            Propagation::Stop
        });

        Self {
            catalog,
            state,
            _shortcut: shortcut,
        }
    }

    /// Tears this instance down before mounting a fresh one.
    pub fn remount(self, route_param: Option<&str>, hub: &KeyHub) -> Self {
        let catalog = Rc::clone(&self.catalog);
        drop(self);
        Self::mount(catalog, route_param, hub)
    }

    /// Releases the shortcut and returns the final state.
    pub fn unmount(self) -> PickerState {
        self.snapshot()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn snapshot(&self) -> PickerState {
        self.state.borrow().clone()
    }

    pub fn is_open(&self) -> bool {
        self.state.borrow().open
    }

    pub fn selected(&self) -> Option<Season> {
        self.state.borrow().selected.clone()
    }

    pub fn set_open(&mut self, open: bool) {
        self.state.borrow_mut().set_open(open);
    }

    pub fn select(&mut self, season: &Season, navigator: &mut dyn Navigator) {
        {
            let mut state = self.state.borrow_mut();
            state.selected = Some(season.clone());
            state.set_open(false);
        }
        navigator.navigate(&season_path(&season.value));
    }

    /// Keys aimed at the picker itself. The global shortcut is handled by the hub.
    pub fn handle_key(
        &mut self,
        key: &KeyEvent,
        matcher: &dyn RowMatcher,
        navigator: &mut dyn Navigator,
    ) -> PickerEvent {
        if !self.is_open() {
            return match key.code {
                KeyCode::Enter | KeyCode::Char(' ') if key.modifiers.is_empty() => {
                    self.set_open(true);
                    PickerEvent::Handled
                }
                _ => PickerEvent::Ignored,
            };
        }

        let rows = self.visible_seasons(matcher);
        let last = rows.len().saturating_sub(1);
        match key.code {
            KeyCode::Esc => {
                self.set_open(false);
                PickerEvent::Handled
            }
            KeyCode::Enter => {
                let highlighted = self.state.borrow().highlighted;
                let Some(season) = rows.get(highlighted).cloned() else {
                    return PickerEvent::Handled;
                };
                self.select(&season, navigator);
                PickerEvent::Selected(season)
            }
            KeyCode::Up => {
                let mut state = self.state.borrow_mut();
                state.highlighted = state.highlighted.saturating_sub(1);
                PickerEvent::Handled
            }
            KeyCode::Down => {
                let mut state = self.state.borrow_mut();
                state.highlighted = (state.highlighted + 1).min(last);
                PickerEvent::Handled
            }
            KeyCode::Home => {
                self.state.borrow_mut().highlighted = 0;
                PickerEvent::Handled
            }
            KeyCode::End => {
                self.state.borrow_mut().highlighted = last;
                PickerEvent::Handled
            }
            KeyCode::Backspace => {
                let mut state = self.state.borrow_mut();
                state.query.pop();
                state.highlighted = 0;
                PickerEvent::Handled
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER) =>
            {
                let mut state = self.state.borrow_mut();
                state.query.push(c);
                state.highlighted = 0;
                PickerEvent::Handled
            }
            _ => PickerEvent::Ignored,
        }
    }

    pub fn visible_seasons(&self, matcher: &dyn RowMatcher) -> Vec<Season> {
        let state = self.state.borrow();
        self.catalog
            .visible(&state.query, matcher)
            .into_iter()
            .flat_map(|group| group.seasons)
            .cloned()
            .collect()
    }

    pub fn trigger_view(&self) -> TriggerView {
        let state = self.state.borrow();
        match &state.selected {
            Some(season) => TriggerView {
                avatar: avatar_text(&season.fallback, &season.label),
                label: season.label.clone(),
                placeholder: false,
                expanded: state.open,
            },
            None => TriggerView {
                avatar: PLACEHOLDER_AVATAR.to_string(),
                label: PLACEHOLDER_LABEL.to_string(),
                placeholder: true,
                expanded: state.open,
            },
        }
    }

    pub fn list_view(&self, matcher: &dyn RowMatcher) -> ListView {
        let state = self.state.borrow();
        let selected_value = state.selected.as_ref().map(|season| season.value.as_str());
        let mut index = 0usize;
        let groups = self
            .catalog
            .visible(&state.query, matcher)
            .into_iter()
            .map(|group| GroupView {
                heading: group.label.to_string(),
                rows: group
                    .seasons
                    .into_iter()
                    .map(|season| {
                        let row = RowView {
                            value: season.value.clone(),
                            label: season.label.clone(),
                            avatar: avatar_text(&season.fallback, &season.label),
                            checked: selected_value == Some(season.value.as_str()),
                            highlighted: index == state.highlighted,
                        };
                        index += 1;
                        row
                    })
                    .collect(),
            })
            .collect();

        ListView {
            query: state.query.clone(),
            groups,
        }
    }
}

/// Fallback text shown in place of the season icon.
pub fn avatar_text(fallback: &str, label: &str) -> String {
    let fallback = fallback.trim();
    if !fallback.is_empty() {
        return fallback.to_string();
    }
    label
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(3)
        .flat_map(char::to_uppercase)
        .collect()
}
