use eframe::egui::{Color32, Ui};
use egui_plot::{Legend, Plot, PlotPoints, Points};

use crate::color::MagnitudeScale;
use crate::data::aggregate::AGGREGATION_MIN_MAGNITUDE;
use crate::data::model::Record;
use crate::state::AppState;

/// Upper end of the monthly chart's magnitude axis.
const CHART_MAX_MAGNITUDE: f64 = 8.4;

/// Number of colour/size steps on the map; each step is drawn as one series.
const MAP_STEPS: usize = 16;

/// Horizontal spread of points around their month's axis position.
const JITTER_WIDTH: f64 = 0.7;

// ---------------------------------------------------------------------------
// Magnitude map (side panel)
// ---------------------------------------------------------------------------

/// Scatter of the events inside the current magnitude range, by lon/lat.
/// Point size and colour follow magnitude.
pub fn magnitude_map(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        return;
    }

    Plot::new("magnitude_map")
        .data_aspect(1.0)
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            let series = map_series(&state.visible_records(), &state.magnitude_scale);
            for s in series {
                plot_ui.points(
                    Points::new(s.points)
                        .radius(s.radius)
                        .color(s.color)
                        .filled(true),
                );
            }
        });
}

/// Map points sharing one colour and marker size.
#[derive(Debug, Clone, PartialEq)]
struct MapSeries {
    color: Color32,
    radius: f32,
    points: Vec<[f64; 2]>,
}

/// Group records with coordinates into at most [`MAP_STEPS`] series by
/// their position on the magnitude scale, lowest step first.
fn map_series(records: &[&Record], scale: &MagnitudeScale) -> Vec<MapSeries> {
    let mut steps: Vec<Vec<[f64; 2]>> = vec![Vec::new(); MAP_STEPS];
    for rec in records {
        let (Some(lat), Some(lon)) = (rec.latitude, rec.longitude) else {
            continue;
        };
        let step = (scale.position(rec.magnitude) * (MAP_STEPS - 1) as f64).round() as usize;
        steps[step].push([lon, lat]);
    }

    steps
        .into_iter()
        .enumerate()
        .filter(|(_, points)| !points.is_empty())
        .map(|(step, points)| {
            let magnitude =
                scale.min + (scale.max - scale.min) * step as f64 / (MAP_STEPS - 1) as f64;
            MapSeries {
                color: scale.color_for(magnitude),
                radius: marker_radius(magnitude),
                points,
            }
        })
        .collect()
}

fn marker_radius(magnitude: f64) -> f32 {
    (1.5 + magnitude.max(0.0) * 1.2).min(12.0) as f32
}

// ---------------------------------------------------------------------------
// Monthly distribution (central panel)
// ---------------------------------------------------------------------------

/// Dot chart: one column of points per calendar month, x = month 1..12,
/// y = magnitude.
pub fn monthly_chart(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a catalog to view events  (File → Open…)");
        });
        return;
    }

    let labels: Vec<String> = state.month_buckets.iter().map(|b| b.label.clone()).collect();

    Plot::new("monthly_distribution")
        .legend(Legend::default())
        .x_axis_label("Month of occurrence (Total records)")
        .y_axis_label("Earthquake Magnitude")
        .x_axis_formatter(move |mark, _range| month_tick(&labels, mark.value))
        .include_x(0.5)
        .include_x(12.5)
        .include_y(AGGREGATION_MIN_MAGNITUDE)
        .include_y(CHART_MAX_MAGNITUDE)
        .show(ui, |plot_ui| {
            for bucket in &state.month_buckets {
                let x = bucket.month as f64;
                let points: PlotPoints = bucket
                    .magnitudes()
                    .enumerate()
                    .map(|(i, m)| [x + jitter(i), m])
                    .collect();
                plot_ui.points(
                    Points::new(points)
                        .name(&bucket.label)
                        .color(bucket.color.to_color32())
                        .radius(6.0)
                        .filled(true),
                );
            }
        });
}

/// Tick text for an x position: the bucket label on whole months, else empty.
fn month_tick(labels: &[String], value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 1.0 {
        return String::new();
    }
    labels
        .get(rounded as usize - 1)
        .cloned()
        .unwrap_or_default()
}

/// Deterministic offset in `[-JITTER_WIDTH/2, JITTER_WIDTH/2)` for the
/// `i`-th point of a column (golden-ratio low-discrepancy sequence).
fn jitter(i: usize) -> f64 {
    const PHI_FRAC: f64 = 0.618_033_988_749_895;
    ((i as f64 * PHI_FRAC).fract() - 0.5) * JITTER_WIDTH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_only_on_whole_months() {
        let labels: Vec<String> = (1..=12).map(|m| format!("M{m}")).collect();
        assert_eq!(month_tick(&labels, 1.0), "M1");
        assert_eq!(month_tick(&labels, 12.0), "M12");
        assert_eq!(month_tick(&labels, 1.5), "");
        assert_eq!(month_tick(&labels, 0.0), "");
        assert_eq!(month_tick(&labels, 13.0), "");
    }

    #[test]
    fn jitter_is_bounded_and_repeatable() {
        for i in 0..500 {
            let j = jitter(i);
            assert!((-JITTER_WIDTH / 2.0..JITTER_WIDTH / 2.0).contains(&j));
            assert_eq!(j, jitter(i));
        }
    }

    fn located(magnitude: f64, lat: Option<f64>, lon: Option<f64>) -> Record {
        Record {
            timestamp: chrono::DateTime::from_timestamp(0, 0).unwrap(),
            magnitude,
            latitude: lat,
            longitude: lon,
            depth: None,
            location: String::new(),
            status: String::new(),
        }
    }

    #[test]
    fn map_points_are_batched_by_magnitude_step() {
        let recs = [
            located(2.0, Some(16.0), Some(-98.0)),
            located(2.0, Some(17.0), Some(-99.0)),
            located(6.0, Some(18.0), Some(-103.0)),
            located(4.0, None, Some(-100.0)),
        ];
        let refs: Vec<&Record> = recs.iter().collect();
        let scale = MagnitudeScale::new(2.0, 6.0);

        let series = map_series(&refs, &scale);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].points, vec![[-98.0, 16.0], [-99.0, 17.0]]);
        assert_eq!(series[0].color, scale.color_for(2.0));
        assert_eq!(series[1].points, vec![[-103.0, 18.0]]);
        assert!(series[1].radius > series[0].radius);

        let total: usize = series.iter().map(|s| s.points.len()).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn flat_extent_gives_one_series() {
        let recs = [located(3.0, Some(1.0), Some(2.0)), located(3.0, Some(3.0), Some(4.0))];
        let refs: Vec<&Record> = recs.iter().collect();
        let series = map_series(&refs, &MagnitudeScale::new(3.0, 3.0));
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].points.len(), 2);
    }

    #[test]
    fn marker_radius_grows_with_magnitude() {
        assert!(marker_radius(5.0) > marker_radius(3.0));
        assert_eq!(marker_radius(50.0), 12.0);
        assert_eq!(marker_radius(-1.0), 1.5);
    }
}
