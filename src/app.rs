use eframe::egui::{self, Ui};

use crate::state::AppState;
use crate::ui::{panels, pie, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
}

impl DashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

/// A titled frame around one chart and its control.
fn card(ui: &mut Ui, title: &str, add_contents: impl FnOnce(&mut Ui)) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_width(ui.available_width());
        ui.heading(title);
        ui.add_space(4.0);
        add_contents(ui);
    });
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: 2×2 chart grid ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.dataset.is_none() {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.heading("Open a file to view sales  (File → Open…)");
                });
                return;
            }

            let state = &mut self.state;
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    ui.columns(2, |cols: &mut [Ui]| {
                        card(&mut cols[0], "Genre share of sales", |ui| {
                            panels::genre_selector(ui, state);
                            let genre = state
                                .selections
                                .as_ref()
                                .map(|s| s.genre.as_str())
                                .unwrap_or_default();
                            plot::genre_share_plot(ui, genre, &state.views.genre_share);
                        });
                        card(&mut cols[1], "Platform share per year", |ui| {
                            panels::year_selector(ui, state);
                            pie::pie_chart(ui, &state.views.platform_share, &state.color_map);
                        });
                    });

                    ui.add_space(8.0);

                    ui.columns(2, |cols: &mut [Ui]| {
                        card(&mut cols[0], "Releases per year", |ui| {
                            panels::year_range_selector(ui, state);
                            plot::timeline_plot(ui, &state.views.timeline);
                        });
                        card(&mut cols[1], "Top 10 games by platform", |ui| {
                            panels::platform_selector(ui, state);
                            let platform = state
                                .selections
                                .as_ref()
                                .map(|s| s.platform.as_str())
                                .unwrap_or_default();
                            plot::top_games_plot(ui, platform, &state.views.top_games);
                        });
                    });
                });
        });
    }
}
