use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use parquet::arrow::ArrowWriter;

const CSV_PATH: &str = "sample_vgsales.csv";
const PARQUET_PATH: &str = "sample_vgsales.parquet";

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// Platforms with their active years. The last few are on the excluded list
/// and disappear when the dashboard cleans the table.
const PLATFORMS: &[(&str, i64, i64)] = &[
    ("NES", 1983, 1994),
    ("SNES", 1990, 1999),
    ("GB", 1988, 2001),
    ("N64", 1996, 2002),
    ("PS", 1994, 2003),
    ("PS2", 2000, 2011),
    ("DS", 2004, 2014),
    ("Wii", 2006, 2015),
    ("X360", 2005, 2016),
    ("PS3", 2006, 2016),
    ("PC", 1985, 2016),
    ("2600", 1980, 1989),
    ("GG", 1991, 1996),
    ("3DO", 1993, 1996),
];

const GENRES: &[&str] = &[
    "Action", "Sports", "Platform", "Racing", "Role-Playing", "Puzzle", "Misc", "Shooter",
    "Simulation", "Fighting", "Adventure", "Strategy",
];

const PUBLISHERS: &[&str] = &[
    "Nintendo", "Electronic Arts", "Activision", "Sony Computer Entertainment", "Ubisoft",
    "Take-Two Interactive", "THQ", "Sega",
];

const TITLE_WORDS: &[&str] = &[
    "Super", "Legend", "Racer", "Quest", "Star", "Dragon", "Hero", "Kart", "Party", "Shadow",
    "Galaxy", "Soccer", "Fighter", "Island", "Tactics",
];

struct Row {
    name: String,
    platform: String,
    /// None is written as `N/A`, like the real dataset.
    year: Option<f64>,
    genre: String,
    publisher: String,
    regional: [f64; 4],
}

impl Row {
    fn global_sales(&self) -> f64 {
        self.regional.iter().sum()
    }
}

fn generate_rows(rng: &mut SimpleRng, count: usize) -> Vec<Row> {
    let mut rows: Vec<Row> = (0..count)
        .map(|i| {
            let &(platform, first, last) = &PLATFORMS[i % PLATFORMS.len()];
            let span = (last - first + 1) as u64;
            let year = first + (rng.next_u64() % span) as i64;
            // Sales follow a long tail: a few hits, many small titles.
            let scale = 40.0 * rng.next_f64().powi(6) + 0.05;
            let regional = [
                scale * rng.next_f64(),
                scale * 0.6 * rng.next_f64(),
                scale * 0.4 * rng.next_f64(),
                scale * 0.1 * rng.next_f64(),
            ];
            Row {
                name: format!(
                    "{} {} {}",
                    rng.pick(TITLE_WORDS),
                    rng.pick(TITLE_WORDS),
                    i % 7 + 1
                ),
                platform: platform.to_string(),
                // Roughly 2% of entries have an unknown release year.
                year: (rng.next_f64() >= 0.02).then_some(year as f64),
                genre: rng.pick(GENRES).to_string(),
                publisher: rng.pick(PUBLISHERS).to_string(),
                regional: regional.map(|v| (v * 100.0).round() / 100.0),
            }
        })
        .collect();

    rows.sort_by(|a, b| b.global_sales().total_cmp(&a.global_sales()));
    rows
}

fn write_csv(rows: &[Row]) -> Result<()> {
    let mut writer = csv::Writer::from_path(CSV_PATH).context("creating CSV file")?;
    writer.write_record([
        "Rank", "Name", "Platform", "Year", "Genre", "Publisher", "NA_Sales", "EU_Sales",
        "JP_Sales", "Other_Sales", "Global_Sales",
    ])?;
    for (rank, row) in rows.iter().enumerate() {
        let year = row
            .year
            .map(|y| format!("{y:.1}"))
            .unwrap_or_else(|| "N/A".to_string());
        let [na, eu, jp, other] = row.regional.map(|v| format!("{v:.2}"));
        writer.write_record([
            (rank + 1).to_string(),
            row.name.clone(),
            row.platform.clone(),
            year,
            row.genre.clone(),
            row.publisher.clone(),
            na,
            eu,
            jp,
            other,
            format!("{:.2}", row.global_sales()),
        ])?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn build_batch(rows: &[Row]) -> Result<RecordBatch> {
    let strings = |f: fn(&Row) -> &str| -> ArrayRef {
        Arc::new(StringArray::from(rows.iter().map(f).collect::<Vec<_>>()))
    };
    let region = |i: usize| -> ArrayRef {
        Arc::new(Float64Array::from(
            rows.iter().map(|r| r.regional[i]).collect::<Vec<_>>(),
        ))
    };

    let schema = Arc::new(Schema::new(vec![
        Field::new("Rank", DataType::Int64, false),
        Field::new("Name", DataType::Utf8, false),
        Field::new("Platform", DataType::Utf8, false),
        // Nullable float, as pandas writes a year column containing NaN.
        Field::new("Year", DataType::Float64, true),
        Field::new("Genre", DataType::Utf8, false),
        Field::new("Publisher", DataType::Utf8, false),
        Field::new("NA_Sales", DataType::Float64, false),
        Field::new("EU_Sales", DataType::Float64, false),
        Field::new("JP_Sales", DataType::Float64, false),
        Field::new("Other_Sales", DataType::Float64, false),
        Field::new("Global_Sales", DataType::Float64, false),
    ]));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from_iter_values(1..=rows.len() as i64)),
        strings(|r| r.name.as_str()),
        strings(|r| r.platform.as_str()),
        Arc::new(Float64Array::from(
            rows.iter().map(|r| r.year).collect::<Vec<_>>(),
        )),
        strings(|r| r.genre.as_str()),
        strings(|r| r.publisher.as_str()),
        region(0),
        region(1),
        region(2),
        region(3),
        Arc::new(Float64Array::from(
            rows.iter().map(Row::global_sales).collect::<Vec<_>>(),
        )),
    ];

    RecordBatch::try_new(schema, columns).context("building record batch")
}

fn write_parquet(batch: &RecordBatch) -> Result<()> {
    let file = std::fs::File::create(PARQUET_PATH).context("creating parquet file")?;
    let mut writer =
        ArrowWriter::try_new(file, batch.schema(), None).context("creating parquet writer")?;
    writer.write(batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows = generate_rows(&mut rng, 1500);

    write_csv(&rows)?;
    let batch = build_batch(&rows)?;
    write_parquet(&batch)?;

    println!("{}", pretty_format_batches(&[batch.slice(0, batch.num_rows().min(5))])?);
    println!(
        "Wrote {} sales records to {CSV_PATH} and {PARQUET_PATH}",
        rows.len()
    );
    Ok(())
}
