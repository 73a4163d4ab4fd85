use crate::matcher::RowMatcher;
use crate::seasons::{ReleaseChannel, SeasonRecord};

pub const BETA_GROUP_LABEL: &str = "Beta Seasons";
pub const PTR_GROUP_LABEL: &str = "PTR Seasons";
pub const LIVE_GROUP_LABEL: &str = "Live Seasons";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Season {
    pub label: String,
    // Equal to the record slug; used for lookup, selection and routing.
    pub value: String,
    pub icon: String,
    pub fallback: String,
}

impl Season {
    fn from_record(record: &SeasonRecord) -> Self {
        Self {
            label: record.name.clone(),
            value: record.slug.clone(),
            icon: record.season_icon.clone(),
            fallback: record.short_name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonGroup {
    pub label: String,
    pub seasons: Vec<Season>,
}

/// A group as shown after filtering; never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleGroup<'a> {
    pub label: &'a str,
    pub seasons: Vec<&'a Season>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    groups: Vec<SeasonGroup>,
}

impl Default for Catalog {
    fn default() -> Self {
        build_catalog(&[])
    }
}

impl Catalog {
    pub fn groups(&self) -> &[SeasonGroup] {
        &self.groups
    }

    pub fn seasons(&self) -> impl Iterator<Item = &Season> {
        self.groups.iter().flat_map(|group| group.seasons.iter())
    }

    pub fn len(&self) -> usize {
        self.groups.iter().map(|group| group.seasons.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// First season in display order whose value equals `value`.
    pub fn find(&self, value: Option<&str>) -> Option<&Season> {
        let value = value?;
        self.seasons().find(|season| season.value == value)
    }

    pub fn visible<'a>(&'a self, query: &str, matcher: &dyn RowMatcher) -> Vec<VisibleGroup<'a>> {
        self.groups
            .iter()
            .filter_map(|group| {
                let seasons = group
                    .seasons
                    .iter()
                    .filter(|season| matcher.is_match(query, &season.label))
                    .collect::<Vec<_>>();
                if seasons.is_empty() {
                    None
                } else {
                    Some(VisibleGroup {
                        label: &group.label,
                        seasons,
                    })
                }
            })
            .collect()
    }
}

pub fn build_catalog(records: &[SeasonRecord]) -> Catalog {
    let mut beta = Vec::new();
    let mut ptr = Vec::new();
    let mut live = Vec::new();

    for record in records {
        let season = Season::from_record(record);
        match record.channel() {
            ReleaseChannel::Beta => beta.push(season),
            ReleaseChannel::Ptr => ptr.push(season),
            ReleaseChannel::Live => live.push(season),
        }
    }

    let mut groups = Vec::with_capacity(3);
    if !beta.is_empty() {
        groups.push(SeasonGroup {
            label: BETA_GROUP_LABEL.to_string(),
            seasons: beta,
        });
    }
    if !ptr.is_empty() {
        groups.push(SeasonGroup {
            label: PTR_GROUP_LABEL.to_string(),
            seasons: ptr,
        });
    }
    // Live is the default bucket and stays even when empty.
    groups.push(SeasonGroup {
        label: LIVE_GROUP_LABEL.to_string(),
        seasons: live,
    });

    Catalog { groups }
}
