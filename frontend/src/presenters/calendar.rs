use chrono::NaiveDate;
use shared::calendar::{
    ATTR_DAY, ATTR_HAS_TRANSACTIONS, ATTR_MONTH, ATTR_TRANSACTIONS, ATTR_YEAR, TODAY_CLASS,
};
use shared::{CalendarContext, DayCell, Direction, NavigationTarget, PresenterConfig, TransactionDetail};
use web_sys::Element;

use crate::components::transaction_modal;
use crate::services::{date_utils, dom, Logger};

const COMPONENT: &str = "calendar";

fn context_of(container: &Element) -> Option<CalendarContext> {
    match CalendarContext::from_attributes(
        dom::attr(container, ATTR_MONTH).as_deref(),
        dom::attr(container, ATTR_YEAR).as_deref(),
    ) {
        Ok(context) => Some(context),
        Err(e) => {
            Logger::debug_with_component(COMPONENT, &format!("no calendar context: {}", e));
            None
        }
    }
}

/// Mark today's cell when the grid shows the current month
pub fn highlight_today(container: &Element, config: &PresenterConfig) {
    let Some(context) = context_of(container) else {
        return;
    };
    let Some(today) = date_utils::today() else {
        Logger::warn_with_component(COMPONENT, "browser clock returned an invalid date");
        return;
    };
    highlight_on(context, today, config);
}

/// Returns whether a cell was marked.
pub fn highlight_on(context: CalendarContext, today: NaiveDate, config: &PresenterConfig) -> bool {
    let Some(day) = context.highlight_day(today) else {
        return false;
    };
    // Short months have no cell for 29-31
    let Some(cell) = dom::query_first(&config.selectors.day_cell_for(day)) else {
        return false;
    };
    match cell.class_list().add_1(TODAY_CLASS) {
        Ok(()) => true,
        Err(e) => {
            Logger::warn_with_component(COMPONENT, &format!("cannot mark today: {:?}", e));
            false
        }
    }
}

/// Open the overlay for a clicked day cell
pub fn show_transaction_detail(cell: &Element, config: &PresenterConfig) {
    let day = match DayCell::from_attributes(
        dom::attr(cell, ATTR_DAY).as_deref(),
        dom::attr(cell, ATTR_HAS_TRANSACTIONS).as_deref(),
        dom::attr(cell, ATTR_TRANSACTIONS).as_deref(),
    ) {
        Ok(day) => day,
        Err(e) => {
            Logger::warn_with_component(COMPONENT, &format!("unreadable day cell: {}", e));
            return;
        }
    };

    let detail = TransactionDetail::for_day(&day, &config.labels);
    Logger::debug_with_component(
        COMPONENT,
        &format!("showing {} transaction(s) for day {}", detail.rows.len(), day.day),
    );
    if let Err(e) = transaction_modal::open(detail, &config.selectors.modal_host_id) {
        Logger::error_with_component(COMPONENT, &e.to_string());
    }
}

/// Leave the page for the month a navigation control points at
pub fn navigate(control: &Element, direction: Direction, config: &PresenterConfig) {
    let displayed = dom::by_id(&config.selectors.calendar_id).and_then(|c| context_of(&c));
    let Some(target) = NavigationTarget::resolve(
        direction,
        dom::attr(control, ATTR_MONTH).as_deref(),
        dom::attr(control, ATTR_YEAR).as_deref(),
        displayed,
    ) else {
        Logger::warn_with_component(COMPONENT, "navigation control has no target month");
        return;
    };

    let url = target.url(&config.calendar_path);
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(e) = window.location().set_href(&url) {
        Logger::error_with_component(COMPONENT, &format!("cannot navigate to {}: {:?}", url, e));
    }
}
