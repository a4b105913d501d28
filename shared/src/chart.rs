//! Chart payloads and the library-independent chart specifications built
//! from them.
//!
//! Pages embed chart data as JSON in a `data-chart-data` attribute. A
//! payload missing any required field is not drawn at all; the canvas stays
//! blank.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::config::{Labels, PresenterConfig};
use crate::currency::{format_rupiah, format_rupiah_compact};
use crate::error::{PayloadError, RenderError};

pub const ATTR_CHART_DATA: &str = "data-chart-data";

/// An RGBA colour with alpha in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rgb`, `#rrggbb`, `rgb(..)` and `rgba(..)` notations.
    pub fn parse_css(text: &str) -> Option<Self> {
        let text = text.trim();
        if let Some(hex) = text.strip_prefix('#') {
            return Self::parse_hex(hex);
        }
        let inner = text
            .strip_prefix("rgba(")
            .or_else(|| text.strip_prefix("rgb("))?
            .strip_suffix(')')?;
        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        let channel = |s: &str| s.parse::<u8>().ok();
        match parts.as_slice() {
            [r, g, b] => Some(Self::new(channel(r)?, channel(g)?, channel(b)?, 1.0)),
            [r, g, b, a] => {
                let a = a.parse::<f64>().ok()?.clamp(0.0, 1.0);
                Some(Self::new(channel(r)?, channel(g)?, channel(b)?, a))
            }
            _ => None,
        }
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        let nibble = |i: usize| u8::from_str_radix(hex.get(i..i + 1)?, 16).ok();
        let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            3 => Some(Self::new(nibble(0)? * 17, nibble(1)? * 17, nibble(2)? * 17, 1.0)),
            6 => Some(Self::new(byte(0)?, byte(2)?, byte(4)?, 1.0)),
            _ => None,
        }
    }
}

pub const INCOME_FILL: Rgba = Rgba::new(40, 167, 69, 0.7);
pub const INCOME_BORDER: Rgba = Rgba::new(40, 167, 69, 1.0);
pub const EXPENSE_FILL: Rgba = Rgba::new(255, 193, 7, 0.7);
pub const EXPENSE_BORDER: Rgba = Rgba::new(255, 193, 7, 1.0);

/// Line colours for series that do not name their own
pub const LINE_PALETTE: [Rgba; 6] = [
    Rgba::new(31, 119, 180, 1.0),
    Rgba::new(255, 127, 14, 1.0),
    Rgba::new(44, 160, 44, 1.0),
    Rgba::new(214, 39, 40, 1.0),
    Rgba::new(148, 103, 189, 1.0),
    Rgba::new(140, 86, 75, 1.0),
];

/// How numbers are printed on axis ticks and in tooltips
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFormat {
    Rupiah,
    RupiahCompact,
    Percent,
}

impl ValueFormat {
    pub fn format(&self, value: f64) -> String {
        match self {
            ValueFormat::Rupiah => format_rupiah(value),
            ValueFormat::RupiahCompact => format_rupiah_compact(value),
            ValueFormat::Percent => format!("{}%", value),
        }
    }
}

/// Tooltip text for one data point: `"<series>: <value>"`.
pub fn tooltip_label(series: &str, value: Option<f64>, format: ValueFormat) -> String {
    let mut label = series.to_string();
    if !label.is_empty() {
        label.push_str(": ");
    }
    if let Some(value) = value {
        label.push_str(&format.format(value));
    }
    label
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisSpec {
    pub begin_at_zero: bool,
    pub max: Option<f64>,
}

/// Income/expense payload: index `i` of each sequence is one period
#[derive(Debug, Clone, PartialEq)]
pub struct BarChartData {
    pub labels: Vec<String>,
    pub income: Vec<Option<f64>>,
    pub expense: Vec<Option<f64>>,
}

/// Occupancy payload
#[derive(Debug, Clone, PartialEq)]
pub struct LineChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<LineSeries>,
}

/// A line series as the server shapes it; unknown keys are kept untouched
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineSeries {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "lenient_series")]
    pub data: Vec<Option<f64>>,
    #[serde(default)]
    pub border_color: Option<String>,
    #[serde(default)]
    pub background_color: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
struct RawChartData {
    labels: Option<Vec<Value>>,
    #[serde(default, deserialize_with = "lenient_optional_series")]
    income: Option<Vec<Option<f64>>>,
    #[serde(default, deserialize_with = "lenient_optional_series")]
    expense: Option<Vec<Option<f64>>>,
    datasets: Option<Vec<LineSeries>>,
}

/// Read a JSON number or a numeric string; anything else is a gap.
pub(crate) fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn lenient_series<'de, D>(deserializer: D) -> Result<Vec<Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Vec::<Value>::deserialize(deserializer)?;
    Ok(values.iter().map(numeric_value).collect())
}

fn lenient_optional_series<'de, D>(deserializer: D) -> Result<Option<Vec<Option<f64>>>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<Value>>::deserialize(deserializer)?;
    Ok(values.map(|values| values.iter().map(numeric_value).collect()))
}

impl RawChartData {
    fn parse(raw: Option<&str>) -> Result<Self, PayloadError> {
        match raw {
            Some(raw) => Ok(serde_json::from_str(raw)?),
            None => Ok(Self::default()),
        }
    }
}

fn label_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

pub fn parse_bar_chart(raw: Option<&str>) -> Result<BarChartData, PayloadError> {
    let data = RawChartData::parse(raw)?;
    Ok(BarChartData {
        labels: data
            .labels
            .ok_or(PayloadError::Missing("labels"))?
            .into_iter()
            .map(label_text)
            .collect(),
        income: data.income.ok_or(PayloadError::Missing("income"))?,
        expense: data.expense.ok_or(PayloadError::Missing("expense"))?,
    })
}

pub fn parse_line_chart(raw: Option<&str>) -> Result<LineChartData, PayloadError> {
    let data = RawChartData::parse(raw)?;
    Ok(LineChartData {
        labels: data
            .labels
            .ok_or(PayloadError::Missing("labels"))?
            .into_iter()
            .map(label_text)
            .collect(),
        datasets: data.datasets.ok_or(PayloadError::Missing("datasets"))?,
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    pub label: String,
    pub values: Vec<Option<f64>>,
    pub fill: Rgba,
    pub border: Rgba,
    pub border_width: u32,
}

/// Grouped bar chart, one group per period
#[derive(Debug, Clone, PartialEq)]
pub struct BarChartSpec {
    pub labels: Vec<String>,
    pub series: Vec<BarSeries>,
    pub y_axis: AxisSpec,
    pub tick_format: ValueFormat,
    pub tooltip_format: ValueFormat,
}

impl BarChartSpec {
    pub fn income_expense(data: &BarChartData, labels: &Labels, compact_axis: bool) -> Self {
        let periods = data.labels.len().min(data.income.len()).min(data.expense.len());
        let series = vec![
            BarSeries {
                label: labels.income.clone(),
                values: data.income[..periods].to_vec(),
                fill: INCOME_FILL,
                border: INCOME_BORDER,
                border_width: 1,
            },
            BarSeries {
                label: labels.expense.clone(),
                values: data.expense[..periods].to_vec(),
                fill: EXPENSE_FILL,
                border: EXPENSE_BORDER,
                border_width: 1,
            },
        ];

        Self {
            labels: data.labels[..periods].to_vec(),
            series,
            y_axis: AxisSpec {
                begin_at_zero: true,
                max: None,
            },
            tick_format: if compact_axis {
                ValueFormat::RupiahCompact
            } else {
                ValueFormat::Rupiah
            },
            tooltip_format: ValueFormat::Rupiah,
        }
    }

    /// Largest value across all series, at least zero
    pub fn max_value(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().flatten())
            .fold(0.0, |max, v| if *v > max { *v } else { max })
    }

    pub fn tooltip_lines(&self, index: usize) -> Vec<String> {
        self.series
            .iter()
            .filter(|s| index < s.values.len())
            .map(|s| tooltip_label(&s.label, s.values[index], self.tooltip_format))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineSeriesSpec {
    pub label: String,
    pub values: Vec<Option<f64>>,
    pub color: Rgba,
}

/// Multi-series line chart over shared period labels
#[derive(Debug, Clone, PartialEq)]
pub struct LineChartSpec {
    pub labels: Vec<String>,
    pub series: Vec<LineSeriesSpec>,
    pub y_axis: AxisSpec,
    pub value_format: ValueFormat,
}

impl LineChartSpec {
    pub fn occupancy(data: &LineChartData) -> Self {
        let series = data
            .datasets
            .iter()
            .enumerate()
            .map(|(i, dataset)| LineSeriesSpec {
                label: dataset.label.clone().unwrap_or_default(),
                values: dataset.data.clone(),
                color: dataset
                    .border_color
                    .as_deref()
                    .and_then(Rgba::parse_css)
                    .unwrap_or(LINE_PALETTE[i % LINE_PALETTE.len()]),
            })
            .collect();

        Self {
            labels: data.labels.clone(),
            series,
            y_axis: AxisSpec {
                begin_at_zero: true,
                max: Some(100.0),
            },
            value_format: ValueFormat::Percent,
        }
    }

    pub fn tooltip_lines(&self, index: usize) -> Vec<String> {
        self.series
            .iter()
            .filter_map(|s| s.values.get(index).copied().flatten().map(|v| (s, v)))
            .map(|(s, v)| tooltip_label(&s.label, Some(v), self.value_format))
            .collect()
    }
}

/// Mapping from a horizontal pointer position to a period index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverLayout {
    /// Each period owns an equal-width band (bar charts)
    Bands,
    /// Periods are points spread edge to edge (line charts)
    Points,
}

impl HoverLayout {
    /// `offset` is measured from the left edge of a plot `width` pixels wide.
    pub fn period_at(&self, offset: f64, width: f64, count: usize) -> Option<usize> {
        if count == 0 || width <= 0.0 || !(0.0..=width).contains(&offset) {
            return None;
        }
        let fraction = offset / width;
        let index = match self {
            HoverLayout::Bands => (fraction * count as f64).floor() as usize,
            HoverLayout::Points => (fraction * (count - 1) as f64).round() as usize,
        };
        Some(index.min(count - 1))
    }
}

/// Something that can draw the two chart kinds, e.g. a canvas backend
pub trait ChartRenderer {
    fn render_bar(&mut self, spec: &BarChartSpec) -> Result<(), RenderError>;
    fn render_line(&mut self, spec: &LineChartSpec) -> Result<(), RenderError>;
}

/// Draw the income/expense chart from a raw payload.
///
/// Returns `Ok(false)` without touching the renderer when the payload lacks
/// labels, income or expense.
pub fn render_income_expense<R: ChartRenderer + ?Sized>(
    renderer: &mut R,
    payload: Option<&str>,
    config: &PresenterConfig,
) -> Result<bool, RenderError> {
    let Ok(data) = parse_bar_chart(payload) else {
        return Ok(false);
    };
    let spec = BarChartSpec::income_expense(&data, &config.labels, config.compact_axis);
    renderer.render_bar(&spec)?;
    Ok(true)
}

/// Draw the occupancy chart from a raw payload; skipped without labels or
/// datasets.
pub fn render_occupancy<R: ChartRenderer + ?Sized>(
    renderer: &mut R,
    payload: Option<&str>,
) -> Result<bool, RenderError> {
    let Ok(data) = parse_line_chart(payload) else {
        return Ok(false);
    };
    renderer.render_line(&LineChartSpec::occupancy(&data))?;
    Ok(true)
}
