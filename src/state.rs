use serde::Serialize;

use crate::color::ColorMap;
use crate::data::aggregate::{
    genre_share, platform_share, top_by_platform, yearly_counts, GenreShare, PlatformShare,
    YearCount, YearRange,
};
use crate::data::model::{SalesDataset, SalesRecord};

// ---------------------------------------------------------------------------
// Selections – the four dashboard controls
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Selections {
    pub genre: String,
    pub year: i64,
    pub year_range: YearRange,
    pub platform: String,
}

/// Derived views, recomputed one at a time as the matching control changes.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Views {
    pub genre_share: GenreShare,
    pub platform_share: Vec<PlatformShare>,
    pub timeline: Vec<YearCount>,
    pub top_games: Vec<SalesRecord>,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded dataset (None until a file loads successfully).
    pub dataset: Option<SalesDataset>,

    /// Current control values; None while no dataset is loaded.
    pub selections: Option<Selections>,

    pub views: Views,

    /// Per-platform colours for the share chart.
    pub color_map: ColorMap,

    /// Year preselected when a dataset arrives.
    pub initial_year: i64,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(initial_year: i64) -> Self {
        Self {
            initial_year,
            ..Default::default()
        }
    }

    /// Ingest a newly loaded dataset, pick default selections and compute
    /// every view once.
    pub fn set_dataset(&mut self, dataset: SalesDataset) {
        let (min_year, max_year) = dataset.year_bounds().unwrap_or((0, 0));
        let year = if dataset.years.contains(&self.initial_year) {
            self.initial_year
        } else {
            min_year
        };

        let selections = Selections {
            genre: dataset.genres.first().cloned().unwrap_or_default(),
            year,
            year_range: YearRange::new(min_year, max_year),
            platform: dataset.platforms.first().cloned().unwrap_or_default(),
        };

        self.color_map = ColorMap::new(dataset.platforms.iter());
        self.views = Views {
            genre_share: genre_share(&dataset, &selections.genre),
            platform_share: platform_share(&dataset, selections.year),
            timeline: yearly_counts(&dataset, selections.year_range),
            top_games: owned(top_by_platform(&dataset, &selections.platform)),
        };
        log::debug!(
            "Initial views: {}",
            serde_json::to_string(&self.views).unwrap_or_default()
        );
        self.selections = Some(selections);
        self.dataset = Some(dataset);
        self.status_message = None;
    }

    pub fn select_genre(&mut self, genre: &str) {
        let (Some(ds), Some(sel)) = (&self.dataset, &mut self.selections) else {
            return;
        };
        sel.genre = genre.to_string();
        self.views.genre_share = genre_share(ds, genre);
    }

    pub fn select_year(&mut self, year: i64) {
        let (Some(ds), Some(sel)) = (&self.dataset, &mut self.selections) else {
            return;
        };
        sel.year = year;
        self.views.platform_share = platform_share(ds, year);
    }

    /// Clamp both ends to the dataset's years and order them before
    /// recomputing the timeline.
    pub fn select_year_range(&mut self, lo: i64, hi: i64) {
        let (Some(ds), Some(sel)) = (&self.dataset, &mut self.selections) else {
            return;
        };
        let Some((min_year, max_year)) = ds.year_bounds() else {
            return;
        };
        let lo = lo.clamp(min_year, max_year);
        let hi = hi.clamp(min_year, max_year);
        sel.year_range = YearRange::new(lo.min(hi), lo.max(hi));
        self.views.timeline = yearly_counts(ds, sel.year_range);
    }

    pub fn select_platform(&mut self, platform: &str) {
        let (Some(ds), Some(sel)) = (&self.dataset, &mut self.selections) else {
            return;
        };
        sel.platform = platform.to_string();
        self.views.top_games = owned(top_by_platform(ds, platform));
    }
}

fn owned(records: Vec<&SalesRecord>) -> Vec<SalesRecord> {
    records.into_iter().cloned().collect()
}
