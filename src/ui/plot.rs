use eframe::egui::{Color32, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Bar, BarChart, GridMark, Line, Plot, PlotPoints, Points};

use crate::data::aggregate::{GenreShare, YearCount};
use crate::data::model::SalesRecord;

const PLOT_HEIGHT: f32 = 240.0;
const GENRE_COLOR: Color32 = Color32::from_rgb(66, 133, 244);
const TOP_GAMES_COLOR: Color32 = Color32::from_rgb(239, 85, 59);

/// Label integer grid marks with `labels[i]`; everything else stays blank.
fn category_formatter(labels: Vec<String>) -> impl Fn(GridMark, &std::ops::RangeInclusive<f64>) -> String {
    move |mark, _range| {
        let idx = mark.value.round();
        if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
            return String::new();
        }
        labels.get(idx as usize).cloned().unwrap_or_default()
    }
}

fn truncate_label(name: &str, max_chars: usize) -> String {
    if name.chars().count() <= max_chars {
        name.to_string()
    } else {
        let head: String = name.chars().take(max_chars - 1).collect();
        format!("{head}…")
    }
}

// ---------------------------------------------------------------------------
// Genre share: selected genre next to the grand total
// ---------------------------------------------------------------------------

pub fn genre_share_plot(ui: &mut Ui, genre: &str, share: &GenreShare) {
    let bars = vec![
        Bar::new(0.0, share.genre_total as f64)
            .name(genre)
            .fill(GENRE_COLOR)
            .width(0.6),
        Bar::new(1.0, share.grand_total as f64)
            .name("Total sales")
            .fill(Color32::GRAY)
            .width(0.6),
    ];

    Plot::new("genre_share_plot")
        .height(PLOT_HEIGHT)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .y_axis_label("Global sales")
        .x_axis_formatter(category_formatter(vec![
            "Selected genre".to_string(),
            "Total sales".to_string(),
        ]))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Global sales"));
        });
}

// ---------------------------------------------------------------------------
// Timeline: record count per year
// ---------------------------------------------------------------------------

pub fn timeline_plot(ui: &mut Ui, counts: &[YearCount]) {
    let coords: Vec<[f64; 2]> = counts
        .iter()
        .map(|c| [c.year as f64, c.count as f64])
        .collect();

    Plot::new("timeline_plot")
        .height(PLOT_HEIGHT)
        .x_axis_label("Year")
        .y_axis_label("Count")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(coords.clone()))
                    .name("Records")
                    .width(1.5),
            );
            plot_ui.points(Points::new(PlotPoints::from(coords)).radius(2.5));
        });
}

// ---------------------------------------------------------------------------
// Top games: bar chart + ranked table
// ---------------------------------------------------------------------------

pub fn top_games_plot(ui: &mut Ui, platform: &str, games: &[SalesRecord]) {
    if games.is_empty() {
        ui.label(format!("No games recorded on {platform}."));
        return;
    }

    let bars: Vec<Bar> = games
        .iter()
        .enumerate()
        .map(|(i, g)| {
            Bar::new(i as f64, g.global_sales as f64)
                .name(&g.name)
                .fill(TOP_GAMES_COLOR)
                .width(0.7)
        })
        .collect();
    let labels = games.iter().map(|g| truncate_label(&g.name, 14)).collect();

    Plot::new("top_games_plot")
        .height(PLOT_HEIGHT)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .y_axis_label("Global sales")
        .x_axis_formatter(category_formatter(labels))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name(format!("Top {} on {platform}", games.len())));
        });

    ui.add_space(6.0);
    top_games_table(ui, games);
}

fn top_games_table(ui: &mut Ui, games: &[SalesRecord]) {
    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::exact(24.0))
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("#");
            });
            header.col(|ui| {
                ui.strong("Year");
            });
            header.col(|ui| {
                ui.strong("Sales");
            });
            header.col(|ui| {
                ui.strong("Name");
            });
        })
        .body(|mut body| {
            for (rank, game) in games.iter().enumerate() {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label((rank + 1).to_string());
                    });
                    row.col(|ui| {
                        ui.label(game.year.to_string());
                    });
                    row.col(|ui| {
                        ui.label(game.global_sales.to_string());
                    });
                    row.col(|ui| {
                        ui.label(game.name.as_str());
                    });
                });
            }
        });
}
