use serde::{Deserialize, Serialize};

use crate::error::PayloadError;

/// Minimum severity written to the console
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// Where the presenters find things in the server-rendered page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Selectors {
    pub calendar_id: String,
    pub day_cell: String,
    pub prev_month_id: String,
    pub next_month_id: String,
    pub income_expense_chart_id: String,
    pub occupancy_chart_id: String,
    pub currency_input: String,
    pub modal_host_id: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            calendar_id: "calendar".to_string(),
            day_cell: ".calendar-day".to_string(),
            prev_month_id: "prevMonth".to_string(),
            next_month_id: "nextMonth".to_string(),
            income_expense_chart_id: "incomeExpenseChart".to_string(),
            occupancy_chart_id: "occupancyRateChart".to_string(),
            currency_input: ".currency-input".to_string(),
            modal_host_id: "transactionModalHost".to_string(),
        }
    }
}

impl Selectors {
    /// Day cells that open the detail overlay when clicked
    pub fn day_with_transactions(&self) -> String {
        format!("{}[data-has-transactions=\"true\"]", self.day_cell)
    }

    /// The cell for one specific day of the displayed month
    pub fn day_cell_for(&self, day: u32) -> String {
        format!("{}[data-day=\"{}\"]", self.day_cell, day)
    }
}

/// Localized strings shown to the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Labels {
    pub income: String,
    pub expense: String,
    pub detail_title: String,
    pub detail_headers: [String; 4],
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            income: "Pendapatan".to_string(),
            expense: "Pengeluaran".to_string(),
            detail_title: "Transaksi Tanggal".to_string(),
            detail_headers: [
                "Tipe".to_string(),
                "Kategori".to_string(),
                "Jumlah".to_string(),
                "Deskripsi".to_string(),
            ],
        }
    }
}

/// Pixel size used when a canvas reports no layout size of its own
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: 800,
            height: 350,
        }
    }
}

/// Presenter configuration.
///
/// Defaults match the markup the server renders; a page may override any
/// field through a JSON `data-presenter-config` attribute on `<body>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PresenterConfig {
    pub selectors: Selectors,
    pub labels: Labels,
    /// Path the month navigation redirects to
    pub calendar_path: String,
    /// Use `Rp1500K` style ticks on the income/expense y-axis
    pub compact_axis: bool,
    pub canvas: CanvasSize,
    pub log_level: LogLevel,
}

impl Default for PresenterConfig {
    fn default() -> Self {
        Self {
            selectors: Selectors::default(),
            labels: Labels::default(),
            calendar_path: "/calendar".to_string(),
            compact_axis: false,
            canvas: CanvasSize::default(),
            log_level: LogLevel::Warn,
        }
    }
}

impl PresenterConfig {
    pub const ATTRIBUTE: &'static str = "data-presenter-config";

    /// Parse overrides; fields left out keep their defaults.
    pub fn from_json(raw: Option<&str>) -> Result<Self, PayloadError> {
        let raw = raw.ok_or(PayloadError::Missing(Self::ATTRIBUTE))?;
        Ok(serde_json::from_str(raw)?)
    }

    /// Defaults when the attribute is absent; defaults plus the parse error
    /// when it is present but unreadable, so the caller can report it.
    pub fn resolve(raw: Option<&str>) -> (Self, Option<PayloadError>) {
        match Self::from_json(raw) {
            Ok(config) => (config, None),
            Err(PayloadError::Missing(_)) => (Self::default(), None),
            Err(e) => (Self::default(), Some(e)),
        }
    }
}
