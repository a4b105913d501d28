//! Page-independent pieces of the kos presenter: payload parsing, Rupiah
//! formatting, chart specifications and the event binding table.

pub mod bindings;
pub mod calendar;
pub mod chart;
pub mod config;
pub mod currency;
pub mod error;

pub use bindings::{binding_table, Action, Binding, EventKind};
pub use calendar::{
    CalendarContext, DayCell, DetailRow, Direction, NavigationTarget, TransactionDetail,
    TransactionEntry, TransactionKind,
};
pub use chart::{
    BarChartData, BarChartSpec, ChartRenderer, HoverLayout, LineChartData, LineChartSpec, Rgba,
};
pub use config::{LogLevel, PresenterConfig};
pub use currency::{format_rupiah, normalize_currency_input};
pub use error::{PayloadError, RenderError};
