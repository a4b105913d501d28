pub mod rust_chart;
pub mod transaction_modal;

pub use rust_chart::PlottersRenderer;
