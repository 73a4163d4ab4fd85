use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const CACHE_DIR: &str = "season_switcher";
const CACHE_FILE: &str = "route.json";
const CACHE_VERSION: u32 = 1;
const SEASON_PREFIX: &str = "/season/";

/// Accepts client-side route changes. Fire-and-forget.
pub trait Navigator {
    fn navigate(&mut self, path: &str);
}

pub fn season_path(value: &str) -> String {
    format!("{SEASON_PREFIX}{value}")
}

/// `<value>` of a `/season/<value>` path.
pub fn season_param(path: &str) -> Option<&str> {
    let rest = path.strip_prefix(SEASON_PREFIX)?;
    let value = rest.strip_suffix('/').unwrap_or(rest);
    if value.is_empty() || value.contains('/') {
        return None;
    }
    Some(value)
}

#[derive(Debug, Clone)]
pub struct Router {
    current: String,
    history: Vec<String>,
}

impl Router {
    pub fn new(initial: &str) -> Self {
        let current = normalize(initial);
        Self {
            history: vec![current.clone()],
            current,
        }
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn season_param(&self) -> Option<&str> {
        season_param(&self.current)
    }
}

impl Navigator for Router {
    fn navigate(&mut self, path: &str) {
        let path = normalize(path);
        self.history.push(path.clone());
        self.current = path;
    }
}

fn normalize(path: &str) -> String {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return "/".to_string();
    }
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RouteFile {
    version: u32,
    path: String,
}

pub fn load_last_route() -> Option<String> {
    load_route_from(&cache_path()?)
}

pub fn save_last_route(route: &str) -> Result<()> {
    let Some(path) = cache_path() else {
        return Ok(());
    };
    save_route_to(&path, route)
}

/// `None` when the file is missing, unreadable or from another cache version.
pub fn load_route_from(path: &Path) -> Option<String> {
    let raw = fs::read_to_string(path).ok()?;
    let file = serde_json::from_str::<RouteFile>(&raw).ok()?;
    if file.version != CACHE_VERSION {
        return None;
    }
    Some(file.path)
}

pub fn save_route_to(path: &Path, route: &str) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).context("create route cache dir")?;
    }
    let file = RouteFile {
        version: CACHE_VERSION,
        path: route.to_string(),
    };
    let tmp = path.with_extension("json.tmp");
    let json = serde_json::to_string(&file).context("serialize route")?;
    fs::write(&tmp, json).context("write route")?;
    fs::rename(&tmp, path).context("swap route")?;
    Ok(())
}

fn cache_path() -> Option<PathBuf> {
    if let Ok(base) = std::env::var("XDG_CACHE_HOME") {
        if !base.trim().is_empty() {
            return Some(PathBuf::from(base).join(CACHE_DIR).join(CACHE_FILE));
        }
    }
    let home = std::env::var("HOME").ok()?;
    if home.trim().is_empty() {
        return None;
    }
    Some(
        PathBuf::from(home)
            .join(".cache")
            .join(CACHE_DIR)
            .join(CACHE_FILE),
    )
}
