use std::ops::Range;

use gloo::events::EventListener;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters_canvas::CanvasBackend;
use shared::chart::{BarChartSpec, ChartRenderer, HoverLayout, LineChartSpec, Rgba};
use shared::config::CanvasSize;
use shared::RenderError;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, MouseEvent};

use crate::services::Logger;

const LABEL_COLOR: RGBColor = RGBColor(73, 80, 87);
const AXIS_COLOR: RGBColor = RGBColor(230, 230, 230);
const GRID_COLOR: RGBColor = RGBColor(245, 245, 245);
const FINE_GRID_COLOR: RGBColor = RGBColor(250, 250, 250);

/// Draws chart specs onto a `<canvas>` with plotters
pub struct PlottersRenderer {
    canvas: HtmlCanvasElement,
    fallback_size: CanvasSize,
}

fn backend_error<E: std::fmt::Display>(error: E) -> RenderError {
    RenderError::Backend(error.to_string())
}

fn color(rgba: Rgba) -> RGBAColor {
    RGBAColor(rgba.r, rgba.g, rgba.b, rgba.a)
}

/// Label for an axis position that sits exactly on a period
fn period_label(labels: &[String], x: f64) -> String {
    let rounded = x.round();
    if (x - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}

/// Headroom above the tallest bar
fn padded_max(max: f64) -> f64 {
    if max <= 0.0 {
        1.0
    } else {
        max * 1.1
    }
}

/// Split a series at null points so gaps are not bridged
fn contiguous_runs(values: &[Option<f64>]) -> Vec<Vec<(f64, f64)>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for (i, value) in values.iter().enumerate() {
        match value {
            Some(v) => current.push((i as f64, *v)),
            None if !current.is_empty() => runs.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

impl PlottersRenderer {
    pub fn new(canvas: HtmlCanvasElement, fallback_size: CanvasSize) -> Self {
        Self {
            canvas,
            fallback_size,
        }
    }

    /// Follow the laid-out size of the canvas so the chart stays responsive
    fn canvas_size(&self) -> (u32, u32) {
        let width = u32::try_from(self.canvas.client_width()).unwrap_or(0);
        let height = u32::try_from(self.canvas.client_height()).unwrap_or(0);
        (
            if width > 0 { width } else { self.fallback_size.width },
            if height > 0 { height } else { self.fallback_size.height },
        )
    }

    fn drawing_area(&self) -> Result<DrawingArea<CanvasBackend, Shift>, RenderError> {
        let (width, height) = self.canvas_size();
        self.canvas.set_width(width);
        self.canvas.set_height(height);

        let backend = CanvasBackend::with_canvas_object(self.canvas.clone())
            .ok_or(RenderError::CanvasUnavailable)?;
        let root = backend.into_drawing_area();
        root.fill(&WHITE).map_err(backend_error)?;
        Ok(root)
    }

    fn draw_bar(&self, spec: &BarChartSpec) -> Result<Range<i32>, RenderError> {
        let root = self.drawing_area()?;
        let periods = spec.labels.len().max(1);
        let y_max = spec.y_axis.max.unwrap_or_else(|| padded_max(spec.max_value()));

        let mut chart = ChartBuilder::on(&root)
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(110)
            .build_cartesian_2d(-0.5..(periods as f64 - 0.5), 0.0..y_max)
            .map_err(backend_error)?;

        let labels = &spec.labels;
        let tick_format = spec.tick_format;
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(periods)
            .y_labels(8)
            .x_label_formatter(&|x| period_label(labels, *x))
            .y_label_formatter(&|y| tick_format.format(*y))
            .label_style(("sans-serif", 12, &LABEL_COLOR))
            .axis_style(&AXIS_COLOR)
            .bold_line_style(&GRID_COLOR)
            .light_line_style(&FINE_GRID_COLOR)
            .draw()
            .map_err(backend_error)?;

        // Each period gets 80% of its band, split evenly between series
        let slot = 0.8 / spec.series.len().max(1) as f64;
        for (s, series) in spec.series.iter().enumerate() {
            let bars: Vec<[(f64, f64); 2]> = series
                .values
                .iter()
                .enumerate()
                .filter_map(|(i, value)| value.map(|v| (i, v)))
                .map(|(i, v)| {
                    let x0 = i as f64 - 0.4 + s as f64 * slot;
                    [(x0, 0.0), (x0 + slot, v)]
                })
                .collect();

            let fill = color(series.fill).filled();
            let border = color(series.border).stroke_width(series.border_width);
            let legend_fill = color(series.fill);

            chart
                .draw_series(bars.iter().map(|corners| Rectangle::new(*corners, fill)))
                .map_err(backend_error)?
                .label(series.label.clone())
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], legend_fill.filled()));
            chart
                .draw_series(bars.iter().map(|corners| Rectangle::new(*corners, border)))
                .map_err(backend_error)?;
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE.mix(0.8))
            .border_style(&AXIS_COLOR)
            .label_font(("sans-serif", 12))
            .draw()
            .map_err(backend_error)?;

        let plot_x = chart.plotting_area().get_pixel_range().0;
        root.present().map_err(backend_error)?;
        Ok(plot_x)
    }

    fn draw_line(&self, spec: &LineChartSpec) -> Result<Range<i32>, RenderError> {
        let root = self.drawing_area()?;
        let last_index = spec.labels.len().saturating_sub(1).max(1) as f64;
        let y_max = spec.y_axis.max.unwrap_or(100.0);

        let mut chart = ChartBuilder::on(&root)
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(60)
            .build_cartesian_2d(0.0..last_index, 0.0..y_max)
            .map_err(backend_error)?;

        let labels = &spec.labels;
        let value_format = spec.value_format;
        chart
            .configure_mesh()
            .x_labels(spec.labels.len().max(2))
            .y_labels(6)
            .x_label_formatter(&|x| period_label(labels, *x))
            .y_label_formatter(&|y| value_format.format(*y))
            .label_style(("sans-serif", 12, &LABEL_COLOR))
            .axis_style(&AXIS_COLOR)
            .bold_line_style(&GRID_COLOR)
            .light_line_style(&FINE_GRID_COLOR)
            .draw()
            .map_err(backend_error)?;

        for series in &spec.series {
            let line_color = color(series.color);

            // Empty series carrying only the legend entry
            chart
                .draw_series(LineSeries::new(std::iter::empty::<(f64, f64)>(), line_color.stroke_width(2)))
                .map_err(backend_error)?
                .label(series.label.clone())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 15, y)], line_color.stroke_width(2)));

            for run in contiguous_runs(&series.values) {
                chart
                    .draw_series(LineSeries::new(run.iter().copied(), line_color.stroke_width(2)))
                    .map_err(backend_error)?;
                chart
                    .draw_series(run.iter().map(|&point| Circle::new(point, 4, line_color.filled())))
                    .map_err(backend_error)?;
            }
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE.mix(0.8))
            .border_style(&AXIS_COLOR)
            .label_font(("sans-serif", 12))
            .draw()
            .map_err(backend_error)?;

        let plot_x = chart.plotting_area().get_pixel_range().0;
        root.present().map_err(backend_error)?;
        Ok(plot_x)
    }

    /// Show the tooltip lines of the hovered period as the canvas title
    fn attach_tooltips(&self, plot_x: Range<i32>, layout: HoverLayout, tooltips: Vec<String>) {
        let canvas = self.canvas.clone();
        EventListener::new(&self.canvas, "mousemove", move |event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let scale = if canvas.client_width() > 0 {
                f64::from(canvas.width()) / f64::from(canvas.client_width())
            } else {
                1.0
            };
            let offset = f64::from(event.offset_x()) * scale - f64::from(plot_x.start);
            let width = f64::from(plot_x.end - plot_x.start);

            let hovered = layout
                .period_at(offset, width, tooltips.len())
                .and_then(|index| tooltips.get(index));
            let updated = match hovered {
                Some(text) => canvas.set_attribute("title", text),
                None => canvas.remove_attribute("title"),
            };
            if let Err(e) = updated {
                Logger::debug_with_component("charts", &format!("tooltip not updated: {:?}", e));
            }
        })
        .forget();
    }
}

impl ChartRenderer for PlottersRenderer {
    fn render_bar(&mut self, spec: &BarChartSpec) -> Result<(), RenderError> {
        let plot_x = self.draw_bar(spec)?;
        let tooltips = (0..spec.labels.len())
            .map(|i| spec.tooltip_lines(i).join("\n"))
            .collect();
        self.attach_tooltips(plot_x, HoverLayout::Bands, tooltips);
        Ok(())
    }

    fn render_line(&mut self, spec: &LineChartSpec) -> Result<(), RenderError> {
        let plot_x = self.draw_line(spec)?;
        let tooltips = (0..spec.labels.len())
            .map(|i| spec.tooltip_lines(i).join("\n"))
            .collect();
        self.attach_tooltips(plot_x, HoverLayout::Points, tooltips);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_label_only_on_whole_positions() {
        let labels = vec!["Jan".to_string(), "Feb".to_string()];
        assert_eq!(period_label(&labels, 0.0), "Jan");
        assert_eq!(period_label(&labels, 1.0000000001), "Feb");
        assert_eq!(period_label(&labels, 0.5), "");
        assert_eq!(period_label(&labels, 2.0), "");
        assert_eq!(period_label(&labels, -1.0), "");
    }

    #[test]
    fn test_padded_max() {
        assert_eq!(padded_max(0.0), 1.0);
        assert!((padded_max(1000.0) - 1100.0).abs() < 1e-9);
    }

    #[test]
    fn test_contiguous_runs_split_on_gaps() {
        let runs = contiguous_runs(&[Some(1.0), Some(2.0), None, None, Some(5.0)]);
        assert_eq!(runs, vec![vec![(0.0, 1.0), (1.0, 2.0)], vec![(4.0, 5.0)]]);
        assert!(contiguous_runs(&[None, None]).is_empty());
    }

    #[test]
    fn test_plotters_color_conversion() {
        let converted = color(shared::chart::INCOME_FILL);
        assert_eq!((converted.0, converted.1, converted.2), (40, 167, 69));
        assert!((converted.3 - 0.7).abs() < f64::EPSILON);
    }
}

#[cfg(test)]
mod wasm_tests {
    use super::*;
    use shared::chart::{render_income_expense, render_occupancy};
    use shared::PresenterConfig;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn canvas() -> HtmlCanvasElement {
        let document = web_sys::window().unwrap().document().unwrap();
        let canvas: HtmlCanvasElement = document.create_element("canvas").unwrap().dyn_into().unwrap();
        document.body().unwrap().append_child(&canvas).unwrap();
        canvas
    }

    #[wasm_bindgen_test]
    fn test_bar_chart_draws_on_canvas() {
        let mut renderer = PlottersRenderer::new(canvas(), CanvasSize::default());
        let payload = r#"{"labels":["Jan","Feb"],"income":[1000000,2000000],"expense":[500000,800000]}"#;
        let drawn = render_income_expense(&mut renderer, Some(payload), &PresenterConfig::default());
        assert_eq!(drawn, Ok(true));
    }

    #[wasm_bindgen_test]
    fn test_line_chart_draws_on_canvas() {
        let mut renderer = PlottersRenderer::new(canvas(), CanvasSize::default());
        let payload = r#"{"labels":["01","02"],"datasets":[{"label":"VIP","data":[40,null]}]}"#;
        assert_eq!(render_occupancy(&mut renderer, Some(payload)), Ok(true));
    }

    fn hover(canvas: &HtmlCanvasElement, fraction: f64) {
        let rect = canvas.get_bounding_client_rect();
        let init = web_sys::MouseEventInit::new();
        init.set_client_x((rect.left() + rect.width() * fraction) as i32);
        init.set_client_y((rect.top() + rect.height() / 2.0) as i32);
        let event = MouseEvent::new_with_mouse_event_init_dict("mousemove", &init).unwrap();
        canvas.dispatch_event(&event).unwrap();
    }

    #[wasm_bindgen_test]
    fn test_hover_sets_and_clears_tooltip_title() {
        let canvas = canvas();
        let mut renderer = PlottersRenderer::new(canvas.clone(), CanvasSize::default());
        let payload = r#"{"labels":["Jan","Feb"],"income":[1000000,2000000],"expense":[500000,800000]}"#;
        render_income_expense(&mut renderer, Some(payload), &PresenterConfig::default()).unwrap();

        hover(&canvas, 0.75);
        let title = canvas.get_attribute("title").unwrap_or_default();
        assert!(title.contains("Pendapatan: Rp"), "{}", title);
        assert!(title.contains("Pengeluaran: Rp"), "{}", title);

        hover(&canvas, 0.0);
        assert_eq!(canvas.get_attribute("title"), None);
    }
}
