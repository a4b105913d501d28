use crate::config::PresenterConfig;

/// Browser event a binding reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Fires once when the document has been parsed
    Ready,
    Click,
    Input,
}

impl EventKind {
    /// DOM event name passed to `addEventListener`
    pub fn dom_name(&self) -> &'static str {
        match self {
            EventKind::Ready => "DOMContentLoaded",
            EventKind::Click => "click",
            EventKind::Input => "input",
        }
    }
}

/// What a binding does when its event fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    HighlightToday,
    ShowTransactionDetail,
    NavigatePrevious,
    NavigateNext,
    RenderIncomeExpenseChart,
    RenderOccupancyChart,
    FormatCurrencyInput,
    /// Page-ready pass over inputs that already hold a value
    NormalizePrefilledCurrency,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub event: EventKind,
    /// CSS selector of the elements involved
    pub selector: String,
    pub action: Action,
}

impl Binding {
    fn new(event: EventKind, selector: String, action: Action) -> Self {
        Self {
            event,
            selector,
            action,
        }
    }
}

fn id_selector(id: &str) -> String {
    format!("#{}", id)
}

/// Every handler the presenters install, in installation order.
pub fn binding_table(config: &PresenterConfig) -> Vec<Binding> {
    let s = &config.selectors;
    vec![
        Binding::new(EventKind::Ready, id_selector(&s.calendar_id), Action::HighlightToday),
        Binding::new(EventKind::Click, s.day_with_transactions(), Action::ShowTransactionDetail),
        Binding::new(EventKind::Click, id_selector(&s.prev_month_id), Action::NavigatePrevious),
        Binding::new(EventKind::Click, id_selector(&s.next_month_id), Action::NavigateNext),
        Binding::new(
            EventKind::Ready,
            id_selector(&s.income_expense_chart_id),
            Action::RenderIncomeExpenseChart,
        ),
        Binding::new(
            EventKind::Ready,
            id_selector(&s.occupancy_chart_id),
            Action::RenderOccupancyChart,
        ),
        Binding::new(EventKind::Input, s.currency_input.clone(), Action::FormatCurrencyInput),
        Binding::new(
            EventKind::Ready,
            s.currency_input.clone(),
            Action::NormalizePrefilledCurrency,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binding_table_default_selectors() {
        let table = binding_table(&PresenterConfig::default());
        assert_eq!(table.len(), 8);

        let find = |action: Action| table.iter().find(|b| b.action == action).unwrap();
        assert_eq!(find(Action::HighlightToday).selector, "#calendar");
        assert_eq!(
            find(Action::ShowTransactionDetail).selector,
            ".calendar-day[data-has-transactions=\"true\"]"
        );
        assert_eq!(find(Action::NavigatePrevious).selector, "#prevMonth");
        assert_eq!(find(Action::NavigateNext).selector, "#nextMonth");
        assert_eq!(find(Action::RenderIncomeExpenseChart).selector, "#incomeExpenseChart");
        assert_eq!(find(Action::RenderOccupancyChart).selector, "#occupancyRateChart");
        assert_eq!(find(Action::FormatCurrencyInput).event, EventKind::Input);
        assert_eq!(find(Action::NormalizePrefilledCurrency).event, EventKind::Ready);
    }

    #[test]
    fn test_each_action_bound_once() {
        let table = binding_table(&PresenterConfig::default());
        for binding in &table {
            let count = table.iter().filter(|b| b.action == binding.action).count();
            assert_eq!(count, 1, "{:?}", binding.action);
        }
    }

    #[test]
    fn test_clicks_only_on_calendar_controls() {
        let table = binding_table(&PresenterConfig::default());
        let clicks: Vec<Action> = table
            .iter()
            .filter(|b| b.event == EventKind::Click)
            .map(|b| b.action)
            .collect();
        assert_eq!(
            clicks,
            vec![Action::ShowTransactionDetail, Action::NavigatePrevious, Action::NavigateNext]
        );
    }

    #[test]
    fn test_dom_event_names() {
        assert_eq!(EventKind::Click.dom_name(), "click");
        assert_eq!(EventKind::Input.dom_name(), "input");
        assert_eq!(EventKind::Ready.dom_name(), "DOMContentLoaded");
    }
}
