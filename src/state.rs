use std::collections::VecDeque;

use chrono::Local;

use crate::matcher::MatcherKind;

const MAX_LOGS: usize = 200;

#[derive(Debug, Clone)]
pub struct AppState {
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
    pub should_quit: bool,
    pub matcher: MatcherKind,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            logs: VecDeque::new(),
            help_overlay: false,
            should_quit: false,
            matcher: MatcherKind::default(),
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        let stamp = Local::now().format("%H:%M:%S");
        self.logs.push_back(format!("{stamp} {}", msg.into()));
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    /// Most recent `n` lines, oldest first.
    pub fn recent_logs(&self, n: usize) -> Vec<&str> {
        let start = self.logs.len().saturating_sub(n);
        self.logs.iter().skip(start).map(String::as_str).collect()
    }
}
