use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

const BUILTIN_SEASONS_JSON: &str = include_str!("../data/seasons.json");

static BUILTIN_RECORDS: Lazy<Vec<SeasonRecord>> =
    Lazy::new(|| parse_records_json(BUILTIN_SEASONS_JSON).unwrap_or_default());

/// One entry of the season feed, as authored upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonRecord {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub season_icon: String,
    #[serde(default)]
    pub short_name: String,
    // Older feeds call this field `tooltipSource`.
    #[serde(default, alias = "tooltipSource")]
    pub release_channel: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReleaseChannel {
    Beta,
    Ptr,
    Live,
}

impl ReleaseChannel {
    /// Unknown channel names fall into `Live`.
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            Some("beta") => ReleaseChannel::Beta,
            Some("ptr") => ReleaseChannel::Ptr,
            _ => ReleaseChannel::Live,
        }
    }
}

impl SeasonRecord {
    pub fn channel(&self) -> ReleaseChannel {
        ReleaseChannel::from_raw(self.release_channel.as_deref())
    }
}

/// The feed compiled into the binary, parsed once per process.
pub fn builtin_records() -> &'static [SeasonRecord] {
    &BUILTIN_RECORDS
}

pub fn parse_records_json(raw: &str) -> Result<Vec<SeasonRecord>> {
    serde_json::from_str::<Vec<SeasonRecord>>(raw).context("invalid season feed json")
}

pub fn load_records_from_file(path: &Path) -> Result<Vec<SeasonRecord>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read season feed {}", path.display()))?;
    parse_records_json(&raw).with_context(|| format!("parse season feed {}", path.display()))
}
