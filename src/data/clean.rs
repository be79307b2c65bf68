use super::error::{DatasetError, Result};
use super::model::{Cell, RawTable, SalesDataset, SalesRecord};

/// Platform labels that are never shown on the dashboard.
pub const EXCLUDED_PLATFORMS: [&str; 7] = ["2600", "PCFX", "GG", "3DO", "TG16", "NG", "WS"];

pub const REQUIRED_COLUMNS: [&str; 5] = ["Name", "Platform", "Year", "Genre", "Global_Sales"];

/// Turn a raw table into the cleaned dataset.
///
/// The steps run in a fixed order:
/// 1. drop every row with a missing value in *any* column,
/// 2. truncate `Year` and `Global_Sales` to integers,
/// 3. drop rows whose platform is in [`EXCLUDED_PLATFORMS`].
///
/// A missing required column is the only error.
pub fn clean(table: &RawTable) -> Result<SalesDataset> {
    let [name_idx, platform_idx, year_idx, genre_idx, sales_idx] = required_indices(table)?;

    let mut dropped_missing = 0usize;
    let mut dropped_numeric = 0usize;
    let mut dropped_platform = 0usize;
    let mut records = Vec::with_capacity(table.rows.len());

    for row in &table.rows {
        if row.len() < table.columns.len() || row.iter().any(Cell::is_missing) {
            dropped_missing += 1;
            continue;
        }

        let (Some(year), Some(global_sales)) =
            (row[year_idx].to_truncated_i64(), row[sales_idx].to_truncated_i64())
        else {
            dropped_numeric += 1;
            continue;
        };

        let platform = row[platform_idx].to_string();
        if EXCLUDED_PLATFORMS.contains(&platform.as_str()) {
            dropped_platform += 1;
            continue;
        }

        records.push(SalesRecord {
            name: row[name_idx].to_string(),
            platform,
            year,
            genre: row[genre_idx].to_string(),
            global_sales,
        });
    }

    if dropped_numeric > 0 {
        log::warn!("Dropped {dropped_numeric} rows with non-numeric Year or Global_Sales");
    }
    log::info!(
        "Cleaned {} rows: kept {}, dropped {dropped_missing} incomplete, {dropped_platform} excluded platforms",
        table.rows.len(),
        records.len(),
    );

    Ok(SalesDataset::from_records(records))
}

fn required_indices(table: &RawTable) -> Result<[usize; 5]> {
    let mut indices = [0usize; 5];
    for (slot, column) in indices.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = table
            .column_index(column)
            .ok_or_else(|| DatasetError::Schema {
                column: column.to_string(),
            })?;
    }
    Ok(indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    fn table(rows: Vec<Vec<Cell>>) -> RawTable {
        RawTable {
            columns: REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows,
        }
    }

    fn row(name: &str, platform: &str, year: Cell, genre: &str, sales: Cell) -> Vec<Cell> {
        vec![text(name), text(platform), year, text(genre), sales]
    }

    #[test]
    fn drops_row_with_missing_genre() {
        let t = table(vec![
            row("A", "NES", Cell::Integer(1985), "Action", Cell::Integer(5)),
            row("B", "SNES", Cell::Integer(1990), "", Cell::Integer(3)),
            row("C", "PS", Cell::Integer(1995), "Racing", Cell::Integer(2)),
        ]);
        let ds = clean(&t).unwrap();
        assert_eq!(ds.len(), t.rows.len() - 1);
        assert!(ds.records.iter().all(|r| r.name != "B"));
    }

    #[test]
    fn excluded_platforms_only_yield_empty_dataset() {
        let rows = EXCLUDED_PLATFORMS
            .iter()
            .map(|p| row("X", p, Cell::Integer(1990), "Action", Cell::Integer(1)))
            .collect();
        let ds = clean(&table(rows)).unwrap();
        assert!(ds.is_empty());
        assert!(ds.platforms.is_empty());
    }

    #[test]
    fn truncates_year_and_sales() {
        let t = table(vec![row(
            "Wii Sports",
            "Wii",
            Cell::Float(2006.0),
            "Sports",
            text("82.74"),
        )]);
        let ds = clean(&t).unwrap();
        assert_eq!(ds.records[0].year, 2006);
        assert_eq!(ds.records[0].global_sales, 82);
    }

    #[test]
    fn missing_value_in_ignored_column_drops_row() {
        let t = RawTable {
            columns: vec![
                "Name".into(),
                "Platform".into(),
                "Year".into(),
                "Genre".into(),
                "Publisher".into(),
                "Global_Sales".into(),
            ],
            rows: vec![
                vec![text("A"), text("NES"), Cell::Integer(1985), text("Action"), Cell::Null, Cell::Integer(5)],
                vec![text("B"), text("NES"), Cell::Integer(1986), text("Action"), text("Nintendo"), Cell::Integer(4)],
            ],
        };
        let ds = clean(&t).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].name, "B");
    }

    #[test]
    fn non_numeric_year_is_dropped_not_fatal() {
        let t = table(vec![
            row("A", "NES", text("unknown"), "Action", Cell::Integer(5)),
            row("B", "NES", text("1986"), "Action", Cell::Integer(4)),
        ]);
        let ds = clean(&t).unwrap();
        assert_eq!(ds.len(), 1);
    }

    #[test]
    fn integer_platform_cells_compare_as_text() {
        let t = table(vec![vec![
            text("Pitfall!"),
            Cell::Integer(2600),
            Cell::Integer(1982),
            text("Platform"),
            Cell::Float(4.5),
        ]]);
        assert!(clean(&t).unwrap().is_empty());
    }

    #[test]
    fn missing_column_is_schema_error() {
        let t = RawTable {
            columns: vec!["Name".into(), "Platform".into(), "Year".into(), "Global_Sales".into()],
            rows: Vec::new(),
        };
        match clean(&t) {
            Err(DatasetError::Schema { column }) => assert_eq!(column, "Genre"),
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn keeps_source_order() {
        let t = table(vec![
            row("A", "NES", Cell::Integer(1985), "Action", Cell::Integer(5)),
            row("B", "2600", Cell::Integer(1982), "Action", Cell::Integer(3)),
            row("C", "GB", Cell::Integer(1989), "Puzzle", Cell::Integer(30)),
        ]);
        let names: Vec<_> = clean(&t)
            .unwrap()
            .records
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["A", "C"]);
    }
}
