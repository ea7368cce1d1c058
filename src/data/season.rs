use std::collections::BTreeMap;
use std::fmt;

/// Calendar order used for season buttons.
pub const SEASON_ORDER: [&str; 4] = ["Winter", "Spring", "Summer", "Autumn"];

/// A `"<Season> <YYYY>"` label as used by the top-categories query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeasonLabel {
    pub season: String,
    pub year: i32,
}

impl SeasonLabel {
    /// Split a label on its trailing four-digit year. Labels without one are rejected.
    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim();
        let (head, year) = label.rsplit_once(char::is_whitespace)?;
        if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let season = head.trim();
        if season.is_empty() {
            return None;
        }
        Some(Self {
            season: season.to_string(),
            year: year.parse().ok()?,
        })
    }
}

impl fmt::Display for SeasonLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.season, self.year)
    }
}

fn season_rank(season: &str) -> usize {
    SEASON_ORDER
        .iter()
        .position(|s| *s == season)
        .unwrap_or(SEASON_ORDER.len())
}

/// Seasons with data, grouped per year.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeasonIndex {
    by_year: BTreeMap<i32, Vec<String>>,
}

impl SeasonIndex {
    /// Build from raw labels; unparseable labels are skipped.
    pub fn from_labels<'a, I>(labels: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut by_year: BTreeMap<i32, Vec<String>> = BTreeMap::new();
        for label in labels {
            let Some(parsed) = SeasonLabel::parse(label) else {
                tracing::debug!("Skipping unparseable season label {:?}", label);
                continue;
            };
            let seasons = by_year.entry(parsed.year).or_default();
            if !seasons.contains(&parsed.season) {
                seasons.push(parsed.season);
            }
        }
        for seasons in by_year.values_mut() {
            seasons.sort_by(|a, b| season_rank(a).cmp(&season_rank(b)).then_with(|| a.cmp(b)));
        }
        Self { by_year }
    }

    /// Years with data, latest first.
    pub fn years(&self) -> Vec<i32> {
        self.by_year.keys().rev().copied().collect()
    }

    pub fn seasons_for(&self, year: i32) -> &[String] {
        self.by_year.get(&year).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Latest year and its first season.
    pub fn default_selection(&self) -> Option<SeasonLabel> {
        let (&year, seasons) = self.by_year.iter().next_back()?;
        Some(SeasonLabel {
            season: seasons.first()?.clone(),
            year,
        })
    }

    /// Keep `season` when the year has it, otherwise fall back to the year's first season.
    pub fn reconcile(&self, year: i32, season: Option<&str>) -> Option<SeasonLabel> {
        let seasons = self.by_year.get(&year)?;
        let season = match season {
            Some(s) if seasons.iter().any(|have| have == s) => s.to_string(),
            _ => seasons.first()?.clone(),
        };
        Some(SeasonLabel { season, year })
    }
}

/// The `(country, year, season, limit)` tuple a dataset refresh is keyed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub country: String,
    pub label: SeasonLabel,
    pub limit: usize,
}

impl Selection {
    pub const DEFAULT_LIMIT: usize = 12;

    pub fn new(country: &str, label: SeasonLabel) -> Self {
        Self {
            country: country.to_string(),
            label,
            limit: Self::DEFAULT_LIMIT,
        }
    }

    pub fn season_label(&self) -> String {
        self.label.to_string()
    }
}
