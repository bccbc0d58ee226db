use chrono::{Datelike, Duration, Local, NaiveDate};

/// Parse a stored date string.
///
/// Three slash-separated components are read as `DD/MM/YYYY` — this is the
/// format `today_string` writes and the one older blobs contain. Anything
/// else falls back to `YYYY-MM-DD` and then to an RFC 3339 timestamp. This
/// is a documented format contract, not a locale guess.
pub fn parse_loose_date(s: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = s.split('/').collect();
    if parts.len() == 3 {
        let day: u32 = parts[0].trim().parse().ok()?;
        let month: u32 = parts[1].trim().parse().ok()?;
        let year: i32 = parts[2].trim().parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    chrono::DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.date_naive())
}

/// Today's date in the stored `DD/MM/YYYY` form.
pub fn today_string() -> String {
    Local::now().format("%d/%m/%Y").to_string()
}

/// Format a date in the stored `DD/MM/YYYY` form.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// The named due-date filter presets. Each is a closed interval relative to
/// `today`, evaluated at day granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePreset {
    Today,
    ThisWeek,
    Next7Days,
    ThisMonth,
    Next30Days,
}

impl DatePreset {
    pub fn from_name(name: &str) -> Option<DatePreset> {
        match name {
            "Today" => Some(DatePreset::Today),
            "This week" => Some(DatePreset::ThisWeek),
            "Next 7 days" => Some(DatePreset::Next7Days),
            "This month" => Some(DatePreset::ThisMonth),
            "Next 30 days" => Some(DatePreset::Next30Days),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DatePreset::Today => "Today",
            DatePreset::ThisWeek => "This week",
            DatePreset::Next7Days => "Next 7 days",
            DatePreset::ThisMonth => "This month",
            DatePreset::Next30Days => "Next 30 days",
        }
    }

    pub const ALL: [DatePreset; 5] = [
        DatePreset::Today,
        DatePreset::ThisWeek,
        DatePreset::Next7Days,
        DatePreset::ThisMonth,
        DatePreset::Next30Days,
    ];

    /// Whether `date` falls inside this preset's interval relative to `today`.
    pub fn contains(self, date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            DatePreset::Today => date == today,
            DatePreset::ThisWeek => {
                // Weeks run Sunday through Saturday.
                let offset = today.weekday().num_days_from_sunday() as i64;
                let start = today - Duration::days(offset);
                let end = start + Duration::days(6);
                date >= start && date <= end
            }
            DatePreset::Next7Days => date >= today && date <= today + Duration::days(7),
            DatePreset::ThisMonth => {
                let start = match today.with_day(1) {
                    Some(d) => d,
                    None => return false,
                };
                let end = match next_month_start(start) {
                    Some(d) => d - Duration::days(1),
                    None => return false,
                };
                date >= start && date <= end
            }
            DatePreset::Next30Days => date >= today && date <= today + Duration::days(30),
        }
    }
}

fn next_month_start(first_of_month: NaiveDate) -> Option<NaiveDate> {
    if first_of_month.month() == 12 {
        NaiveDate::from_ymd_opt(first_of_month.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first_of_month.year(), first_of_month.month() + 1, 1)
    }
}
