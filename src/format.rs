//! Currency and date formatting shared by the invoice and collection views.

use chrono::{DateTime, Local, LocalResult, NaiveDate, NaiveDateTime, TimeZone};

use crate::error::{PosError, Result};

pub const RUPEE: &str = "₹";

/// Invoice style amount: rupee symbol, two decimals, no digit grouping.
pub fn format_rupees(value: f64) -> String {
    if value < 0.0 {
        format!("-{}{:.2}", RUPEE, value.abs())
    } else {
        format!("{}{:.2}", RUPEE, value)
    }
}

/// Indian Rupee currency string with lakh/crore grouping, e.g. `₹1,23,456.00`.
pub fn format_inr(value: f64) -> String {
    let rounded = format!("{:.2}", value.abs());
    let (whole, frac) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));
    let grouped = group_indian(whole);

    // "-0.00" is not worth a sign
    if value < 0.0 && rounded != "0.00" {
        format!("-{}{}.{}", RUPEE, grouped, frac)
    } else {
        format!("{}{}.{}", RUPEE, grouped, frac)
    }
}

/// Group a run of ASCII digits as 3 then 2,2,2... from the right.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut out = String::with_capacity(digits.len() + digits.len() / 2);
    for (i, ch) in head.chars().enumerate() {
        if i > 0 && (head.len() - i) % 2 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.push(',');
    out.push_str(tail);
    out
}

/// Parse a backend timestamp. Offset-carrying values are shown in local time;
/// naive values are taken as already local.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// The instant a local wall-clock time refers to. Ambiguous times (clocks
/// turned back) take the earlier instant; skipped times are read as UTC.
pub fn local_instant(ts: &NaiveDateTime) -> DateTime<Local> {
    match Local.from_local_datetime(ts) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt,
        LocalResult::None => Local.from_utc_datetime(ts),
    }
}

/// `dd/mm/yyyy`
pub fn format_date(ts: &NaiveDateTime) -> String {
    ts.format("%d/%m/%Y").to_string()
}

/// `HH:MM`, 24-hour clock
pub fn format_time(ts: &NaiveDateTime) -> String {
    ts.format("%H:%M").to_string()
}

/// Display form used for report date ranges.
pub fn format_day(date: &NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Parse a `YYYY-MM-DD` date given on the command line.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| PosError::InvalidDate(input.to_string()))
}
