use std::f32::consts::{FRAC_PI_2, TAU};
use std::ops::RangeInclusive;

use eframe::egui::{self, Align2, FontId, Pos2, Sense, Shape, Stroke, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints};

use crate::chart::{Bindings, ChartKind, ChartSpec};
use crate::color::ColorMap;
use crate::data::model::{Column, GroupKey, Month};
use crate::state::{AppState, ChartPanel};

const DATA_GRID_HEIGHT: f32 = 140.0;

// ---------------------------------------------------------------------------
// Chart panel (central panel)
// ---------------------------------------------------------------------------

/// Render the placeholder or the two rows of two charts.
pub fn chart_panel(ui: &mut Ui, state: &AppState) {
    let charts = match &state.panel {
        ChartPanel::Charts(charts) => charts,
        ChartPanel::Placeholder(text) => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading(text);
            });
            return;
        }
    };

    let rows = charts.len().div_ceil(2).max(1);
    let row_height = (ui.available_height() / rows as f32 - ui.spacing().item_spacing.y).max(160.0);

    for (row_idx, pair) in charts.chunks(2).enumerate() {
        ui.columns(2, |cols: &mut [Ui]| {
            for (col_idx, (ui, spec)) in cols.iter_mut().zip(pair).enumerate() {
                let id = row_idx * 2 + col_idx;
                chart(ui, spec, id, row_height, state.show_data);
            }
        });
    }
}

fn chart(ui: &mut Ui, spec: &ChartSpec, id: usize, height: f32, show_data: bool) {
    ui.vertical(|ui: &mut Ui| {
        ui.strong(&spec.title);

        let plot_height = if show_data {
            (height - DATA_GRID_HEIGHT - 24.0).max(80.0)
        } else {
            height - 24.0
        };

        match spec.kind {
            ChartKind::Line => line_chart(ui, spec, id, plot_height),
            ChartKind::Bar => bar_chart(ui, spec, id, plot_height),
            ChartKind::Pie => pie_chart(ui, spec, plot_height),
        }

        if show_data {
            data_grid(ui, spec, id);
        }
    });
}

// ---------------------------------------------------------------------------
// Axis helpers
// ---------------------------------------------------------------------------

fn axis_columns(spec: &ChartSpec) -> (Column, Column) {
    match &spec.bindings {
        Bindings::Xy { x, y, .. } => (*x, *y),
        Bindings::Pie { values, names } => (*names, *values),
    }
}

/// Tick label for a continuous axis: calendar months get their label,
/// everything else prints as a number.
fn continuous_tick(column: Column) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark: GridMark, _range: &RangeInclusive<f64>| {
        let v = mark.value;
        match column {
            Column::Month => {
                let i = v.round();
                if (v - i).abs() < 1e-6 && (1.0..=12.0).contains(&i) {
                    Month::ALL[i as usize - 1].to_string()
                } else {
                    String::new()
                }
            }
            Column::Year => {
                if v.fract().abs() < 1e-6 {
                    format!("{v:.0}")
                } else {
                    String::new()
                }
            }
            _ => format!("{}", (v * 100.0).round() / 100.0),
        }
    }
}

/// Tick label for a categorical axis where category `i` sits at x = i.
fn category_tick(labels: Vec<String>) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark: GridMark, _range: &RangeInclusive<f64>| {
        let i = mark.value.round();
        if (mark.value - i).abs() < 1e-6 && i >= 0.0 && (i as usize) < labels.len() {
            labels[i as usize].clone()
        } else {
            String::new()
        }
    }
}

// ---------------------------------------------------------------------------
// Line
// ---------------------------------------------------------------------------

fn line_chart(ui: &mut Ui, spec: &ChartSpec, id: usize, height: f32) {
    let (x_col, y_col) = axis_columns(spec);

    let points: PlotPoints = spec
        .data
        .rows
        .iter()
        .filter_map(|row| Some([row.key.first()?.as_f64()?, row.value]))
        .collect();

    Plot::new(format!("chart_{id}"))
        .height(height)
        .x_axis_label(x_col.name())
        .y_axis_label(y_col.name())
        .x_axis_formatter(continuous_tick(x_col))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(points).name(y_col.name()).width(2.0));
        });
}

// ---------------------------------------------------------------------------
// Bar
// ---------------------------------------------------------------------------

fn bar_chart(ui: &mut Ui, spec: &ChartSpec, id: usize, height: f32) {
    match &spec.bindings {
        Bindings::Xy { color: Some(_), .. } => split_bar_chart(ui, spec, id, height),
        _ => category_bar_chart(ui, spec, id, height),
    }
}

/// One bar per category, each in its own colour.
fn category_bar_chart(ui: &mut Ui, spec: &ChartSpec, id: usize, height: f32) {
    let (x_col, y_col) = axis_columns(spec);
    let categories = spec.data.distinct_keys(0);
    let colors = ColorMap::new(&categories);
    let labels: Vec<String> = categories.iter().map(|k| k.to_string()).collect();

    let bars: Vec<Bar> = spec
        .data
        .rows
        .iter()
        .enumerate()
        .filter_map(|(i, row)| {
            let key = row.key.first()?;
            Some(
                Bar::new(i as f64, row.value)
                    .name(key.to_string())
                    .fill(colors.color_for(key))
                    .width(0.6),
            )
        })
        .collect();

    Plot::new(format!("chart_{id}"))
        .height(height)
        .x_axis_label(x_col.name())
        .y_axis_label(y_col.name())
        .x_axis_formatter(category_tick(labels))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name(y_col.name()));
        });
}

/// Grouped bars on a continuous x axis, one series per colour category.
fn split_bar_chart(ui: &mut Ui, spec: &ChartSpec, id: usize, height: f32) {
    let (x_col, y_col) = axis_columns(spec);
    let categories = spec.data.distinct_keys(1);
    let colors = ColorMap::new(&categories);

    let xs: Vec<f64> = spec
        .data
        .distinct_keys(0)
        .iter()
        .filter_map(GroupKey::as_f64)
        .filter(|x| x.is_finite())
        .collect();
    let gap = xs
        .windows(2)
        .map(|w| w[1] - w[0])
        .filter(|d| *d > 0.0)
        .fold(f64::INFINITY, f64::min);
    let gap = if gap.is_finite() { gap } else { 1.0 };

    let n = categories.len().max(1) as f64;
    let width = gap * 0.8 / n;

    let series: Vec<BarChart> = categories
        .iter()
        .enumerate()
        .map(|(i, category)| {
            let offset = (i as f64 - (n - 1.0) / 2.0) * width;
            let bars: Vec<Bar> = spec
                .data
                .rows
                .iter()
                .filter(|row| row.key.get(1) == Some(category))
                .filter_map(|row| {
                    let x = row.key.first()?.as_f64()?;
                    Some(Bar::new(x + offset, row.value).width(width))
                })
                .collect();
            BarChart::new(bars)
                .name(category.to_string())
                .color(colors.color_for(category))
        })
        .collect();

    Plot::new(format!("chart_{id}"))
        .height(height)
        .legend(Legend::default())
        .x_axis_label(x_col.name())
        .y_axis_label(y_col.name())
        .x_axis_formatter(continuous_tick(x_col))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for chart in series {
                plot_ui.bar_chart(chart);
            }
        });
}

// ---------------------------------------------------------------------------
// Pie
// ---------------------------------------------------------------------------

fn pie_chart(ui: &mut Ui, spec: &ChartSpec, height: f32) {
    let size = egui::vec2(ui.available_width(), height);
    let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
    let painter = ui.painter_at(rect);
    let text_color = ui.visuals().text_color();

    let colors = ColorMap::new(&spec.data.distinct_keys(0));
    let slices: Vec<(&GroupKey, f64)> = spec
        .data
        .rows
        .iter()
        .filter_map(|row| Some((row.key.first()?, row.value)))
        .collect();
    let total: f64 = slices
        .iter()
        .map(|(_, v)| *v)
        .filter(|v| v.is_finite() && *v > 0.0)
        .sum();

    if total <= 0.0 {
        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            "No data",
            FontId::proportional(14.0),
            text_color,
        );
        return;
    }

    let radius = (rect.width() * 0.6).min(rect.height()) / 2.0 - 8.0;
    let center = Pos2::new(rect.left() + radius + 8.0, rect.center().y);

    let mut start = -FRAC_PI_2;
    for (key, value) in &slices {
        if !(value.is_finite() && *value > 0.0) {
            continue;
        }
        let color = colors.color_for(key);
        let sweep = (*value / total) as f32 * TAU;
        // Fan of thin triangles; each stays convex for the tessellator.
        let steps = (sweep / 0.05).ceil().max(1.0) as usize;
        for s in 0..steps {
            let a0 = start + sweep * s as f32 / steps as f32;
            let a1 = start + sweep * (s + 1) as f32 / steps as f32;
            let p0 = center + radius * egui::vec2(a0.cos(), a0.sin());
            let p1 = center + radius * egui::vec2(a1.cos(), a1.sin());
            painter.add(Shape::convex_polygon(vec![center, p0, p1], color, Stroke::NONE));
        }
        start += sweep;
    }

    // Legend entries and slices share the summary table's key order.
    let legend_x = center.x + radius + 16.0;
    let line_height = 18.0;
    let legend = colors.legend_entries();
    let mut y = rect.center().y - line_height * legend.len() as f32 / 2.0;
    for ((name, color), (_, value)) in legend.iter().zip(&slices) {
        let swatch_min = Pos2::new(legend_x, y - 5.0);
        let swatch = egui::Rect::from_min_size(swatch_min, egui::vec2(10.0, 10.0));
        painter.rect_filled(swatch, 2.0, *color);
        let share = if value.is_finite() { value / total * 100.0 } else { f64::NAN };
        painter.text(
            Pos2::new(legend_x + 16.0, y),
            Align2::LEFT_CENTER,
            format!("{name}  {share:.1}%"),
            FontId::proportional(12.0),
            text_color,
        );
        y += line_height;
    }
}

// ---------------------------------------------------------------------------
// Summary table grid
// ---------------------------------------------------------------------------

fn data_grid(ui: &mut Ui, spec: &ChartSpec, id: usize) {
    let table = &spec.data;
    egui::ScrollArea::vertical()
        .id_salt(format!("data_scroll_{id}"))
        .max_height(DATA_GRID_HEIGHT)
        .show(ui, |ui: &mut Ui| {
            egui::Grid::new(format!("data_grid_{id}"))
                .striped(true)
                .show(ui, |ui: &mut Ui| {
                    for column in &table.keys {
                        ui.strong(column.name());
                    }
                    ui.strong(format!("{} ({:?})", table.value.name(), table.reduction));
                    ui.end_row();

                    for row in &table.rows {
                        for key in &row.key {
                            ui.label(key.to_string());
                        }
                        ui.label(format!("{:.2}", row.value));
                        ui.end_row();
                    }
                });
        });
}

