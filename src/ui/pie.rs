use std::f32::consts::TAU;

use eframe::egui::{Pos2, Sense, Shape, Stroke, Ui, Vec2};

use crate::color::ColorMap;
use crate::data::aggregate::PlatformShare;

/// Triangles per full turn when approximating the arc.
const ARC_STEPS: f32 = 128.0;

// ---------------------------------------------------------------------------
// Slice geometry
// ---------------------------------------------------------------------------

/// `(start, sweep)` in radians for each value, starting at 12 o'clock and
/// running clockwise. Empty when the values sum to zero.
pub fn slice_angles(values: &[i64]) -> Vec<(f32, f32)> {
    let total = saturating_total(values);
    if total <= 0 {
        return Vec::new();
    }
    let mut start = -TAU / 4.0;
    values
        .iter()
        .map(|&v| {
            let sweep = v as f32 / total as f32 * TAU;
            let slice = (start, sweep);
            start += sweep;
            slice
        })
        .collect()
}

fn saturating_total(values: &[i64]) -> i64 {
    values.iter().fold(0i64, |acc, &v| acc.saturating_add(v))
}

fn percent(part: i64, total: i64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 * 100.0 / total as f64
    }
}

// ---------------------------------------------------------------------------
// Pie chart (platform share)
// ---------------------------------------------------------------------------

/// Paint the platform-share pie followed by a legend with percentages.
pub fn pie_chart(ui: &mut Ui, shares: &[PlatformShare], colors: &ColorMap) {
    let values: Vec<i64> = shares.iter().map(|s| s.total).collect();
    let angles = slice_angles(&values);
    if angles.is_empty() {
        ui.label("No sales recorded for this year.");
        return;
    }

    let size = ui.available_width().min(240.0);
    let (response, painter) = ui.allocate_painter(Vec2::splat(size), Sense::hover());
    let center = response.rect.center();
    let radius = size * 0.45;

    for (share, &(start, sweep)) in shares.iter().zip(&angles) {
        if sweep <= 0.0 {
            continue;
        }
        let fill = colors.color_for(&share.platform);
        let steps = ((sweep / TAU) * ARC_STEPS).ceil().max(1.0) as usize;
        for i in 0..steps {
            let a0 = start + sweep * i as f32 / steps as f32;
            let a1 = start + sweep * (i + 1) as f32 / steps as f32;
            painter.add(Shape::convex_polygon(
                vec![center, arc_point(center, radius, a0), arc_point(center, radius, a1)],
                fill,
                Stroke::new(0.5, fill),
            ));
        }
    }

    let total = saturating_total(&values);
    for share in shares {
        ui.horizontal(|ui: &mut Ui| {
            let (rect, _) = ui.allocate_exact_size(Vec2::splat(10.0), Sense::hover());
            ui.painter()
                .rect_filled(rect, 2.0, colors.color_for(&share.platform));
            ui.label(format!(
                "{}  {} ({:.1}%)",
                share.platform,
                share.total,
                percent(share.total, total)
            ));
        });
    }
}

fn arc_point(center: Pos2, radius: f32, angle: f32) -> Pos2 {
    center + Vec2::angled(angle) * radius
}
