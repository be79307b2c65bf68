use eframe::egui::{self, Color32, RichText, Slider, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Chart controls – one per card
// ---------------------------------------------------------------------------

/// Genre dropdown for the genre-share card.
pub fn genre_selector(ui: &mut Ui, state: &mut AppState) {
    let (Some(ds), Some(sel)) = (&state.dataset, &state.selections) else {
        return;
    };
    let mut choice = sel.genre.clone();
    egui::ComboBox::from_id_salt("genre_select")
        .selected_text(choice.clone())
        .show_ui(ui, |ui: &mut Ui| {
            for genre in &ds.genres {
                ui.selectable_value(&mut choice, genre.clone(), genre.as_str());
            }
        });
    if choice != sel.genre {
        state.select_genre(&choice);
    }
}

/// Year dropdown for the platform-share card.
pub fn year_selector(ui: &mut Ui, state: &mut AppState) {
    let (Some(ds), Some(sel)) = (&state.dataset, &state.selections) else {
        return;
    };
    let mut choice = sel.year;
    egui::ComboBox::from_id_salt("year_select")
        .selected_text(choice.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            for &year in &ds.years {
                ui.selectable_value(&mut choice, year, year.to_string());
            }
        });
    if choice != sel.year {
        state.select_year(choice);
    }
}

/// From/to sliders for the timeline card, bounded by the dataset's years.
pub fn year_range_selector(ui: &mut Ui, state: &mut AppState) {
    let (Some(ds), Some(sel)) = (&state.dataset, &state.selections) else {
        return;
    };
    let Some((min_year, max_year)) = ds.year_bounds() else {
        return;
    };
    let mut lo = sel.year_range.lo;
    let mut hi = sel.year_range.hi;

    let changed = ui
        .add(Slider::new(&mut lo, min_year..=max_year).text("from"))
        .changed()
        | ui
            .add(Slider::new(&mut hi, min_year..=max_year).text("to"))
            .changed();

    if changed {
        // Dragging "from" past "to" pushes "to" along, and vice versa.
        if lo > hi {
            if lo != sel.year_range.lo {
                hi = lo;
            } else {
                lo = hi;
            }
        }
        state.select_year_range(lo, hi);
    }
}

/// Platform dropdown for the top-games card.
pub fn platform_selector(ui: &mut Ui, state: &mut AppState) {
    let (Some(ds), Some(sel)) = (&state.dataset, &state.selections) else {
        return;
    };
    let mut choice = sel.platform.clone();
    egui::ComboBox::from_id_salt("platform_select")
        .selected_text(choice.clone())
        .show_ui(ui, |ui: &mut Ui| {
            for platform in &ds.platforms {
                ui.selectable_value(&mut choice, platform.clone(), platform.as_str());
            }
        });
    if choice != sel.platform {
        state.select_platform(&choice);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} records, {} platforms, {} genres",
                ds.len(),
                ds.platforms.len(),
                ds.genres.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open sales data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} records from {}",
                    dataset.len(),
                    path.display()
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                let e = anyhow::Error::from(e);
                log::error!("Failed to load {}: {e:#}", path.display());
                // The previous dataset, if any, stays on screen.
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
