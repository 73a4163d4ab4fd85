use crossterm::event::{KeyCode, KeyEvent};

use crate::keyboard::{KeyHub, Propagation};
use crate::matcher::RowMatcher;
use crate::picker::{PickerEvent, SeasonSwitcher};
use crate::route::Router;
use crate::state::AppState;

pub struct App {
    pub state: AppState,
    pub router: Router,
    pub hub: KeyHub,
    pub switcher: Option<SeasonSwitcher>,
    pub matcher: Box<dyn RowMatcher>,
}

impl App {
    pub fn new(
        state: AppState,
        router: Router,
        hub: KeyHub,
        switcher: SeasonSwitcher,
        matcher: Box<dyn RowMatcher>,
    ) -> Self {
        Self {
            state,
            router,
            hub,
            switcher: Some(switcher),
            matcher,
        }
    }

    /// Global listeners first, then the picker, then app keys.
    pub fn on_key(&mut self, key: KeyEvent) {
        if self.hub.dispatch(&key) == Propagation::Stop {
            return;
        }

        if let Some(switcher) = self.switcher.as_mut() {
            let was_open = switcher.is_open();
            match switcher.handle_key(&key, self.matcher.as_ref(), &mut self.router) {
                PickerEvent::Selected(_) => {
                    self.state
                        .push_log(format!("[INFO] Navigated to {}", self.router.current()));
                    return;
                }
                PickerEvent::Handled => return,
                // The open list owns the keyboard.
                PickerEvent::Ignored if was_open => return,
                PickerEvent::Ignored => {}
            }
        }

        match key.code {
            KeyCode::Char('q') => self.state.should_quit = true,
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            KeyCode::Esc => self.state.help_overlay = false,
            KeyCode::Char('r') => self.remount_switcher(),
            _ => {}
        }
    }

    pub fn remount_switcher(&mut self) {
        let Some(old) = self.switcher.take() else {
            return;
        };
        let switcher = old.remount(self.router.season_param(), &self.hub);
        match switcher.selected() {
            Some(season) => self
                .state
                .push_log(format!("[INFO] Remounted on {}", season.value)),
            None => self.state.push_log("[INFO] Remounted with no season"),
        }
        self.switcher = Some(switcher);
    }
}
