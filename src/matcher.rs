/// Decides which rows of the list stay visible for a search query.
pub trait RowMatcher {
    fn is_match(&self, query: &str, label: &str) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatcherKind {
    Substring,
    #[default]
    Fuzzy,
}

impl MatcherKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "substring" | "contains" => Some(MatcherKind::Substring),
            "fuzzy" => Some(MatcherKind::Fuzzy),
            _ => None,
        }
    }

    pub fn matcher(self) -> Box<dyn RowMatcher> {
        match self {
            MatcherKind::Substring => Box::new(SubstringMatcher),
            MatcherKind::Fuzzy => Box::new(FuzzyMatcher),
        }
    }
}

pub fn matcher_label(kind: MatcherKind) -> &'static str {
    match kind {
        MatcherKind::Substring => "SUBSTRING",
        MatcherKind::Fuzzy => "FUZZY",
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringMatcher;

impl RowMatcher for SubstringMatcher {
    fn is_match(&self, query: &str, label: &str) -> bool {
        let needle = query.trim();
        if needle.is_empty() {
            return true;
        }
        label.to_lowercase().contains(&needle.to_lowercase())
    }
}

/// In-order subsequence match, case-insensitive, whitespace in the query ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct FuzzyMatcher;

impl FuzzyMatcher {
    pub fn score(&self, query: &str, label: &str) -> Option<u32> {
        let needle = query
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect::<Vec<_>>();
        if needle.is_empty() {
            return Some(0);
        }

        let hay = label.chars().flat_map(char::to_lowercase).collect::<Vec<_>>();
        let mut score = 0u32;
        let mut next = 0usize;
        let mut last_hit: Option<usize> = None;

        for (idx, c) in hay.iter().enumerate() {
            let Some(want) = needle.get(next) else {
                break;
            };
            if c != want {
                continue;
            }
            score += 1;
            if last_hit.is_some_and(|prev| prev + 1 == idx) {
                score += 2;
            }
            if idx == 0 || is_word_break(hay[idx - 1]) {
                score += 3;
            }
            last_hit = Some(idx);
            next += 1;
        }

        (next == needle.len()).then_some(score)
    }
}

impl RowMatcher for FuzzyMatcher {
    fn is_match(&self, query: &str, label: &str) -> bool {
        self.score(query, label).is_some()
    }
}

fn is_word_break(c: char) -> bool {
    c.is_whitespace() || matches!(c, '-' | '_' | '.' | '/' | ':')
}
