use std::path::PathBuf;
use std::time::Duration;

use crate::matcher::MatcherKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub seasons_file: Option<PathBuf>,
    pub matcher: MatcherKind,
    pub initial_route: Option<String>,
    pub tick_rate: Duration,
    pub remember_route: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seasons_file: None,
            matcher: MatcherKind::default(),
            initial_route: None,
            tick_rate: Duration::from_millis(250),
            remember_route: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|val| !val.trim().is_empty());

        let tick_ms = non_empty("TICK_MS")
            .and_then(|val| val.trim().parse::<u64>().ok())
            .unwrap_or(250)
            .max(50);

        Self {
            seasons_file: non_empty("SEASONS_FILE").map(PathBuf::from),
            matcher: non_empty("SEASON_MATCHER")
                .and_then(|val| MatcherKind::parse(&val))
                .unwrap_or_default(),
            initial_route: non_empty("SEASON_ROUTE").map(|val| val.trim().to_string()),
            tick_rate: Duration::from_millis(tick_ms),
            remember_route: non_empty("REMEMBER_ROUTE")
                .map(|val| parse_flag(&val))
                .unwrap_or(true),
        }
    }

    /// Command-line flags win over the environment.
    pub fn apply_args<I>(&mut self, args: I)
    where
        I: IntoIterator<Item = String>,
    {
        let args = args.into_iter().collect::<Vec<_>>();
        let mut idx = 0;
        while idx < args.len() {
            let arg = args[idx].as_str();
            if arg == "--no-remember" {
                self.remember_route = false;
                idx += 1;
                continue;
            }

            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) => (flag, Some(value.to_string())),
                None => (arg, None),
            };
            if !matches!(flag, "--route" | "--seasons" | "--matcher") {
                idx += 1;
                continue;
            }
            let value = match inline {
                Some(value) => value,
                None => {
                    idx += 1;
                    match args.get(idx) {
                        Some(next) => next.clone(),
                        None => break,
                    }
                }
            };
            idx += 1;

            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match flag {
                "--route" => self.initial_route = Some(value.to_string()),
                "--seasons" => self.seasons_file = Some(PathBuf::from(value)),
                "--matcher" => {
                    if let Some(kind) = MatcherKind::parse(value) {
                        self.matcher = kind;
                    }
                }
                _ => {}
            }
        }
    }
}

fn parse_flag(raw: &str) -> bool {
    !matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}
