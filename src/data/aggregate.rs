use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use super::model::{SalesDataset, SalesRecord};

/// Number of entries shown in the top-games chart.
pub const TOP_N: usize = 10;

// ---------------------------------------------------------------------------
// Derived views
// ---------------------------------------------------------------------------

/// Sales of one genre next to the sales of the whole collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GenreShare {
    pub genre_total: i64,
    pub grand_total: i64,
}

/// Summed sales of one platform within a single year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformShare {
    pub platform: String,
    pub total: i64,
}

/// Number of records released in one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearCount {
    pub year: i64,
    pub count: usize,
}

/// Inclusive year range `[lo, hi]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearRange {
    pub lo: i64,
    pub hi: i64,
}

impl YearRange {
    pub fn new(lo: i64, hi: i64) -> Self {
        Self { lo, hi }
    }

    pub fn contains(&self, year: i64) -> bool {
        self.lo <= year && year <= self.hi
    }
}

// ---------------------------------------------------------------------------
// Aggregations
// ---------------------------------------------------------------------------

/// Sum of sales for `genre` and for every record.
///
/// An unknown genre is not an error; its total is simply zero. Totals
/// saturate at `i64::MAX` instead of overflowing.
pub fn genre_share(dataset: &SalesDataset, genre: &str) -> GenreShare {
    let share = dataset
        .records
        .iter()
        .fold(GenreShare::default(), |mut acc, rec| {
            if rec.genre == genre {
                acc.genre_total = acc.genre_total.saturating_add(rec.global_sales);
            }
            acc.grand_total = acc.grand_total.saturating_add(rec.global_sales);
            acc
        });
    log::debug!("genre_share({genre}) = {share:?}");
    share
}

/// Per-platform sales totals for records released in `year`.
///
/// Platforms come out in order of first appearance; an unmatched year
/// yields an empty vector.
pub fn platform_share(dataset: &SalesDataset, year: i64) -> Vec<PlatformShare> {
    let mut shares: Vec<PlatformShare> = Vec::new();
    let mut slot: HashMap<&str, usize> = HashMap::new();

    for rec in dataset.records.iter().filter(|r| r.year == year) {
        let idx = *slot.entry(rec.platform.as_str()).or_insert_with(|| {
            shares.push(PlatformShare {
                platform: rec.platform.clone(),
                total: 0,
            });
            shares.len() - 1
        });
        shares[idx].total = shares[idx].total.saturating_add(rec.global_sales);
    }

    log::debug!("platform_share({year}): {} platforms", shares.len());
    shares
}

/// Record counts per year for every year in `range` that has records,
/// ascending by year. Years without records are left out rather than
/// reported as zero.
pub fn yearly_counts(dataset: &SalesDataset, range: YearRange) -> Vec<YearCount> {
    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for rec in dataset.records.iter().filter(|r| range.contains(r.year)) {
        *counts.entry(rec.year).or_default() += 1;
    }

    log::debug!(
        "yearly_counts({}..={}): {} years",
        range.lo,
        range.hi,
        counts.len()
    );
    counts
        .into_iter()
        .map(|(year, count)| YearCount { year, count })
        .collect()
}

/// The [`TOP_N`] best-selling records on `platform`.
pub fn top_by_platform<'a>(dataset: &'a SalesDataset, platform: &str) -> Vec<&'a SalesRecord> {
    top_n_by_platform(dataset, platform, TOP_N)
}

/// The `n` best-selling records on `platform`, descending by sales.
///
/// Equal sales keep their table order.
pub fn top_n_by_platform<'a>(
    dataset: &'a SalesDataset,
    platform: &str,
    n: usize,
) -> Vec<&'a SalesRecord> {
    let mut matching: Vec<&SalesRecord> = dataset
        .records
        .iter()
        .filter(|r| r.platform == platform)
        .collect();
    // `sort_by` is stable, which gives the table-order tiebreak.
    matching.sort_by(|a, b| b.global_sales.cmp(&a.global_sales));
    matching.truncate(n);

    log::debug!("top_by_platform({platform}): {} records", matching.len());
    matching
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(name: &str, platform: &str, year: i64, genre: &str, sales: i64) -> SalesRecord {
        SalesRecord {
            name: name.into(),
            platform: platform.into(),
            year,
            genre: genre.into(),
            global_sales: sales,
        }
    }

    fn sample() -> SalesDataset {
        SalesDataset::from_records(vec![
            rec("Wii Sports", "Wii", 2006, "Sports", 82),
            rec("Super Mario Bros.", "NES", 1985, "Platform", 40),
            rec("Mario Kart Wii", "Wii", 2008, "Racing", 35),
            rec("Wii Sports Resort", "Wii", 2009, "Sports", 33),
            rec("Pokemon Red/Blue", "GB", 1996, "Role-Playing", 31),
            rec("Tetris", "GB", 1989, "Puzzle", 30),
            rec("New Super Mario Bros.", "DS", 2006, "Platform", 30),
            rec("Wii Play", "Wii", 2006, "Misc", 29),
            rec("Duck Hunt", "NES", 1984, "Shooter", 28),
            rec("Nintendogs", "DS", 2005, "Simulation", 24),
            rec("Pokemon Gold/Silver", "GB", 1999, "Role-Playing", 23),
            rec("Wii Fit", "Wii", 2007, "Sports", 22),
            rec("Kinect Adventures!", "X360", 2010, "Misc", 21),
            rec("Wii Fit Plus", "Wii", 2009, "Sports", 22),
        ])
    }

    #[test]
    fn worked_example() {
        // Row B sits on an excluded platform and never reaches the dataset.
        let ds = SalesDataset::from_records(vec![rec("A", "NES", 1985, "Action", 5)]);
        assert_eq!(
            genre_share(&ds, "Action"),
            GenreShare {
                genre_total: 5,
                grand_total: 5
            }
        );
    }

    #[test]
    fn genre_total_bounded_and_grand_total_stable() {
        let ds = sample();
        let grand = genre_share(&ds, &ds.genres[0]).grand_total;
        for genre in &ds.genres {
            let share = genre_share(&ds, genre);
            assert!(share.genre_total <= share.grand_total);
            assert_eq!(share.grand_total, grand);
        }
        let total: i64 = ds.genres.iter().map(|g| genre_share(&ds, g).genre_total).sum();
        assert_eq!(total, grand);
    }

    #[test]
    fn unknown_genre_sums_to_zero() {
        let share = genre_share(&sample(), "Visual Novel");
        assert_eq!(share.genre_total, 0);
        assert!(share.grand_total > 0);
    }

    #[test]
    fn genre_share_saturates_on_huge_sales() {
        let ds = SalesDataset::from_records(vec![
            rec("A", "PS4", 2015, "Action", i64::MAX),
            rec("B", "PS4", 2015, "Action", 1),
        ]);
        let share = genre_share(&ds, "Action");
        assert_eq!(share.genre_total, i64::MAX);
        assert_eq!(share.grand_total, i64::MAX);
    }

    #[test]
    fn platform_share_saturates_on_huge_sales() {
        let ds = SalesDataset::from_records(vec![
            rec("A", "PS4", 2015, "Action", i64::MAX),
            rec("B", "PS4", 2015, "Sports", 1),
        ]);
        let shares = platform_share(&ds, 2015);
        assert_eq!(shares.len(), 1);
        assert_eq!(shares[0].total, i64::MAX);
    }

    #[test]
    fn platform_share_sums_to_year_total() {
        let ds = sample();
        for &year in &ds.years {
            let from_shares: i64 = platform_share(&ds, year).iter().map(|s| s.total).sum();
            let direct: i64 = ds
                .records
                .iter()
                .filter(|r| r.year == year)
                .map(|r| r.global_sales)
                .sum();
            assert_eq!(from_shares, direct, "year {year}");
        }
    }

    #[test]
    fn platform_share_groups_by_platform() {
        let shares = platform_share(&sample(), 2006);
        assert_eq!(
            shares,
            vec![
                PlatformShare {
                    platform: "Wii".into(),
                    total: 111
                },
                PlatformShare {
                    platform: "DS".into(),
                    total: 30
                },
            ]
        );
        assert!(platform_share(&sample(), 1950).is_empty());
    }

    #[test]
    fn yearly_counts_ascending_and_sparse() {
        let ds = sample();
        let counts = yearly_counts(&ds, YearRange::new(2005, 2010));
        let years: Vec<i64> = counts.iter().map(|c| c.year).collect();
        assert_eq!(years, vec![2005, 2006, 2007, 2008, 2009, 2010]);
        assert!(counts.windows(2).all(|w| w[0].year < w[1].year));
        assert_eq!(counts[1], YearCount { year: 2006, count: 3 });

        // 1986..=1988 has no records at all, so those years are skipped.
        let early = yearly_counts(&ds, YearRange::new(1984, 1990));
        let years: Vec<i64> = early.iter().map(|c| c.year).collect();
        assert_eq!(years, vec![1984, 1985, 1989]);
    }

    #[test]
    fn yearly_counts_is_idempotent() {
        let ds = sample();
        let range = YearRange::new(1980, 2020);
        assert_eq!(yearly_counts(&ds, range), yearly_counts(&ds, range));
        let total: usize = yearly_counts(&ds, range).iter().map(|c| c.count).sum();
        assert_eq!(total, ds.len());
    }

    #[test]
    fn yearly_counts_outside_bounds_is_empty() {
        let ds = sample();
        assert!(yearly_counts(&ds, YearRange::new(1950, 1970)).is_empty());
        assert!(yearly_counts(&ds, YearRange::new(2010, 2000)).is_empty());
    }

    #[test]
    fn top_by_platform_sorted_and_bounded() {
        let ds = sample();
        let top = top_by_platform(&ds, "Wii");
        assert_eq!(top.len(), 6);
        assert!(top.iter().all(|r| r.platform == "Wii"));
        assert!(top.windows(2).all(|w| w[0].global_sales >= w[1].global_sales));
        assert_eq!(top[0].name, "Wii Sports");
    }

    #[test]
    fn top_ties_keep_table_order() {
        let ds = sample();
        let top = top_by_platform(&ds, "Wii");
        // Wii Fit and Wii Fit Plus both sold 22.
        let names: Vec<&str> = top.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(&names[4..], &["Wii Fit", "Wii Fit Plus"]);
    }

    #[test]
    fn top_truncates_to_ten() {
        let records = (0..25)
            .map(|i| rec(&format!("Game {i}"), "PS2", 2004, "Action", i))
            .collect();
        let ds = SalesDataset::from_records(records);
        let top = top_by_platform(&ds, "PS2");
        assert_eq!(top.len(), TOP_N);
        assert_eq!(top[0].global_sales, 24);
        assert_eq!(top[9].global_sales, 15);
    }

    #[test]
    fn top_unknown_platform_is_empty() {
        assert!(top_by_platform(&sample(), "Dreamcast").is_empty());
    }
}
