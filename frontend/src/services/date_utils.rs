use chrono::NaiveDate;
use js_sys::Date;

/// Today's date according to the browser clock, in local time
pub fn today() -> Option<NaiveDate> {
    let now = Date::new_0();
    let year = now.get_full_year() as i32;
    let month = now.get_month() + 1; // JavaScript months are 0-indexed
    let day = now.get_date();
    NaiveDate::from_ymd_opt(year, month, day)
}
