//! Handlers behind each entry of the binding table.

pub mod calendar;
pub mod charts;
pub mod currency_input;

use shared::{Action, Direction, PresenterConfig};
use web_sys::Element;

/// Run one bound action against the element it was bound to
pub fn run(action: Action, element: &Element, config: &PresenterConfig) {
    match action {
        Action::HighlightToday => calendar::highlight_today(element, config),
        Action::ShowTransactionDetail => calendar::show_transaction_detail(element, config),
        Action::NavigatePrevious => calendar::navigate(element, Direction::Previous, config),
        Action::NavigateNext => calendar::navigate(element, Direction::Next, config),
        Action::RenderIncomeExpenseChart => charts::render_income_expense(element, config),
        Action::RenderOccupancyChart => charts::render_occupancy(element, config),
        Action::FormatCurrencyInput => currency_input::format_field(element),
        Action::NormalizePrefilledCurrency => currency_input::normalize_prefilled(element),
    }
}
