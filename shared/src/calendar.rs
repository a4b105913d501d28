use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::chart::numeric_value;
use crate::config::Labels;
use crate::currency::format_rupiah;
use crate::error::PayloadError;

pub const ATTR_MONTH: &str = "data-month";
pub const ATTR_YEAR: &str = "data-year";
pub const ATTR_DAY: &str = "data-day";
pub const ATTR_HAS_TRANSACTIONS: &str = "data-has-transactions";
pub const ATTR_TRANSACTIONS: &str = "data-transactions";

/// Class added to the cell of the current day
pub const TODAY_CLASS: &str = "today";

/// Parse an integer attribute the lenient way browsers do: leading
/// whitespace is skipped and anything after the leading digits is ignored.
pub fn parse_int_attribute(attribute: &'static str, raw: Option<&str>) -> Result<i32, PayloadError> {
    let raw = raw.ok_or(PayloadError::Missing(attribute))?;
    let trimmed = raw.trim_start();
    let sign_len = usize::from(trimmed.starts_with(|c: char| c == '-' || c == '+'));
    let digits_len = trimmed[sign_len..]
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .count();
    trimmed[..sign_len + digits_len]
        .parse()
        .map_err(|_| PayloadError::InvalidNumber {
            attribute,
            value: raw.to_string(),
        })
}

/// The month shown by the calendar grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarContext {
    pub month: i32,
    pub year: i32,
}

impl CalendarContext {
    pub fn from_attributes(month: Option<&str>, year: Option<&str>) -> Result<Self, PayloadError> {
        Ok(Self {
            month: parse_int_attribute(ATTR_MONTH, month)?,
            year: parse_int_attribute(ATTR_YEAR, year)?,
        })
    }

    /// Whether `today` falls inside the displayed month
    pub fn contains(&self, today: NaiveDate) -> bool {
        self.month == today.month() as i32 && self.year == today.year()
    }

    /// Day number to highlight, if the displayed month is the current one
    pub fn highlight_day(&self, today: NaiveDate) -> Option<u32> {
        self.contains(today).then(|| today.day())
    }

    pub fn previous(&self) -> Self {
        if self.month <= 1 {
            Self { month: 12, year: self.year - 1 }
        } else {
            Self { month: self.month - 1, year: self.year }
        }
    }

    pub fn next(&self) -> Self {
        if self.month >= 12 {
            Self { month: 1, year: self.year + 1 }
        } else {
            Self { month: self.month + 1, year: self.year }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// Month a navigation control leads to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationTarget {
    pub month: i32,
    pub year: i32,
}

impl From<CalendarContext> for NavigationTarget {
    fn from(context: CalendarContext) -> Self {
        Self {
            month: context.month,
            year: context.year,
        }
    }
}

impl NavigationTarget {
    /// Target carried by the control itself, else the month adjacent to
    /// the displayed one.
    pub fn resolve(
        direction: Direction,
        month: Option<&str>,
        year: Option<&str>,
        displayed: Option<CalendarContext>,
    ) -> Option<Self> {
        if let (Ok(month), Ok(year)) = (
            parse_int_attribute(ATTR_MONTH, month),
            parse_int_attribute(ATTR_YEAR, year),
        ) {
            return Some(Self { month, year });
        }
        displayed.map(|context| match direction {
            Direction::Previous => context.previous().into(),
            Direction::Next => context.next().into(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}?month={}&year={}", path, self.month, self.year)
    }
}

/// Kind of a transaction; any type other than `income` is treated as expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum TransactionKind {
    Income,
    #[default]
    Expense,
}

impl From<String> for TransactionKind {
    fn from(value: String) -> Self {
        if value == "income" {
            TransactionKind::Income
        } else {
            TransactionKind::Expense
        }
    }
}

impl TransactionKind {
    pub fn label<'a>(&self, labels: &'a Labels) -> &'a str {
        match self {
            TransactionKind::Income => &labels.income,
            TransactionKind::Expense => &labels.expense,
        }
    }

    /// Row style in the detail table
    pub fn row_class(&self) -> &'static str {
        match self {
            TransactionKind::Income => "table-success",
            TransactionKind::Expense => "table-warning",
        }
    }
}

/// One transaction as embedded in a day cell
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TransactionEntry {
    #[serde(rename = "type", default)]
    pub kind: TransactionKind,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "number_or_text")]
    pub amount: f64,
    #[serde(default)]
    pub description: Option<String>,
}

// Amounts arrive either as JSON numbers or as numeric strings.
fn number_or_text<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(numeric_value(&value).unwrap_or(0.0))
}

pub fn parse_transactions(raw: Option<&str>) -> Result<Vec<TransactionEntry>, PayloadError> {
    let raw = raw.ok_or(PayloadError::Missing(ATTR_TRANSACTIONS))?;
    Ok(serde_json::from_str(raw)?)
}

/// Missing or unreadable transaction lists count as empty.
pub fn transactions_or_default(raw: Option<&str>) -> Vec<TransactionEntry> {
    parse_transactions(raw).unwrap_or_default()
}

/// A day of the calendar grid
#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    pub day: u32,
    pub has_transactions: bool,
    pub transactions: Vec<TransactionEntry>,
}

impl DayCell {
    pub fn from_attributes(
        day: Option<&str>,
        has_transactions: Option<&str>,
        transactions: Option<&str>,
    ) -> Result<Self, PayloadError> {
        let day = parse_int_attribute(ATTR_DAY, day)?;
        let day = u32::try_from(day).map_err(|_| PayloadError::InvalidNumber {
            attribute: ATTR_DAY,
            value: day.to_string(),
        })?;
        Ok(Self {
            day,
            has_transactions: has_transactions == Some("true"),
            transactions: transactions_or_default(transactions),
        })
    }
}

/// A row of the transaction detail table, already formatted for display
#[derive(Debug, Clone, PartialEq)]
pub struct DetailRow {
    pub kind: TransactionKind,
    pub kind_label: String,
    pub category: String,
    pub amount: String,
    pub description: String,
}

/// Content of the overlay opened from a day cell
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDetail {
    pub title: String,
    pub headers: [String; 4],
    pub rows: Vec<DetailRow>,
}

impl TransactionDetail {
    pub fn for_day(cell: &DayCell, labels: &Labels) -> Self {
        let rows = cell
            .transactions
            .iter()
            .map(|entry| DetailRow {
                kind: entry.kind,
                kind_label: entry.kind.label(labels).to_string(),
                category: entry.category.clone().unwrap_or_default(),
                amount: format_rupiah(entry.amount),
                description: entry
                    .description
                    .clone()
                    .filter(|d| !d.is_empty())
                    .unwrap_or_else(|| "-".to_string()),
            })
            .collect();

        Self {
            title: format!("{} {}", labels.detail_title, cell.day),
            headers: labels.detail_headers.clone(),
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_parse_int_attribute_is_lenient() {
        assert_eq!(parse_int_attribute(ATTR_MONTH, Some("7")).unwrap(), 7);
        assert_eq!(parse_int_attribute(ATTR_MONTH, Some(" 12px")).unwrap(), 12);
        assert_eq!(parse_int_attribute(ATTR_YEAR, Some("-3")).unwrap(), -3);
        assert!(matches!(
            parse_int_attribute(ATTR_MONTH, Some("abc")),
            Err(PayloadError::InvalidNumber { .. })
        ));
        assert!(matches!(
            parse_int_attribute(ATTR_MONTH, None),
            Err(PayloadError::Missing(ATTR_MONTH))
        ));
    }

    #[test]
    fn test_highlight_only_for_current_month() {
        let today = date(2025, 6, 17);
        let context = CalendarContext::from_attributes(Some("6"), Some("2025")).unwrap();
        assert_eq!(context.highlight_day(today), Some(17));

        let other_month = CalendarContext { month: 5, year: 2025 };
        assert_eq!(other_month.highlight_day(today), None);

        let other_year = CalendarContext { month: 6, year: 2024 };
        assert_eq!(other_year.highlight_day(today), None);

        let out_of_range = CalendarContext { month: 13, year: 2025 };
        assert_eq!(out_of_range.highlight_day(today), None);
    }

    #[test]
    fn test_adjacent_months_roll_over_years() {
        let january = CalendarContext { month: 1, year: 2025 };
        assert_eq!(january.previous(), CalendarContext { month: 12, year: 2024 });
        assert_eq!(january.next(), CalendarContext { month: 2, year: 2025 });

        let december = CalendarContext { month: 12, year: 2025 };
        assert_eq!(december.next(), CalendarContext { month: 1, year: 2026 });
    }

    #[test]
    fn test_navigation_prefers_control_attributes() {
        let displayed = Some(CalendarContext { month: 3, year: 2025 });
        let target =
            NavigationTarget::resolve(Direction::Next, Some("9"), Some("2030"), displayed).unwrap();
        assert_eq!(target.url("/calendar"), "/calendar?month=9&year=2030");
    }

    #[test]
    fn test_navigation_falls_back_to_adjacent_month() {
        let displayed = Some(CalendarContext { month: 1, year: 2025 });
        let prev = NavigationTarget::resolve(Direction::Previous, None, None, displayed).unwrap();
        assert_eq!(prev.url("/calendar"), "/calendar?month=12&year=2024");
        assert_eq!(NavigationTarget::resolve(Direction::Next, Some("x"), None, None), None);
    }

    #[test]
    fn test_transactions_default_to_empty() {
        assert!(transactions_or_default(None).is_empty());
        assert!(transactions_or_default(Some("")).is_empty());
        assert!(transactions_or_default(Some("{\"type\":")).is_empty());
        assert!(transactions_or_default(Some("[]")).is_empty());
    }

    #[test]
    fn test_transaction_entry_fields() {
        let raw = r#"[
            {"type":"income","category":"Sewa","amount":500000},
            {"type":"refund","category":"Lain","amount":"2500","description":"Kembalian"},
            {"category":null}
        ]"#;
        let entries = parse_transactions(Some(raw)).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].kind, TransactionKind::Income);
        assert_eq!(entries[0].amount, 500000.0);
        assert_eq!(entries[1].kind, TransactionKind::Expense);
        assert_eq!(entries[1].amount, 2500.0);
        assert_eq!(entries[2].kind, TransactionKind::Expense);
        assert_eq!(entries[2].category, None);
        assert_eq!(entries[2].amount, 0.0);
    }

    #[test]
    fn test_day_cell_from_attributes() {
        let cell = DayCell::from_attributes(Some("4"), Some("true"), None).unwrap();
        assert_eq!(cell.day, 4);
        assert!(cell.has_transactions);
        assert!(cell.transactions.is_empty());

        let cell = DayCell::from_attributes(Some("5"), Some("True"), Some("[]")).unwrap();
        assert!(!cell.has_transactions);

        assert!(DayCell::from_attributes(None, Some("true"), None).is_err());
    }

    #[test]
    fn test_detail_rows_keep_input_order() {
        let raw = r#"[{"type":"income","category":"Sewa","amount":500000},
                      {"type":"expense","category":"Listrik","amount":100000}]"#;
        let cell = DayCell::from_attributes(Some("12"), Some("true"), Some(raw)).unwrap();
        let detail = TransactionDetail::for_day(&cell, &Labels::default());

        assert_eq!(detail.title, "Transaksi Tanggal 12");
        assert_eq!(detail.headers[2], "Jumlah");
        assert_eq!(detail.rows.len(), 2);

        assert_eq!(detail.rows[0].kind_label, "Pendapatan");
        assert_eq!(detail.rows[0].category, "Sewa");
        assert_eq!(detail.rows[0].amount, "Rp 500.000");
        assert_eq!(detail.rows[0].description, "-");
        assert_eq!(detail.rows[0].kind.row_class(), "table-success");

        assert_eq!(detail.rows[1].kind_label, "Pengeluaran");
        assert_eq!(detail.rows[1].category, "Listrik");
        assert_eq!(detail.rows[1].amount, "Rp 100.000");
        assert_eq!(detail.rows[1].kind.row_class(), "table-warning");
    }

    #[test]
    fn test_detail_for_unreadable_list_has_no_rows() {
        let cell = DayCell::from_attributes(Some("2"), Some("true"), Some("oops")).unwrap();
        let detail = TransactionDetail::for_day(&cell, &Labels::default());
        assert_eq!(detail.title, "Transaksi Tanggal 2");
        assert!(detail.rows.is_empty());
    }

    #[test]
    fn test_empty_description_shows_dash() {
        let raw = r#"[{"type":"expense","category":"Air","amount":1,"description":""}]"#;
        let cell = DayCell::from_attributes(Some("1"), Some("true"), Some(raw)).unwrap();
        let detail = TransactionDetail::for_day(&cell, &Labels::default());
        assert_eq!(detail.rows[0].description, "-");
    }
}
