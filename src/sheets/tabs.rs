use chrono::{Datelike, NaiveDate};

use crate::error::ReportError;
use crate::sheets::client::SheetsApi;

// ============================================================================
// Tab naming conventions — fixed, locale-independent titles
// ============================================================================

/// Daily tab title, e.g. `Aug 6, 2026`.
pub fn daily_tab_title(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Monthly summary tab title, e.g. `Jul 2026`.
pub fn monthly_tab_title(month_start: NaiveDate) -> String {
    month_start.format("%b %Y").to_string()
}

/// First day of the month before `today`'s month.
pub fn previous_month_start(today: NaiveDate) -> Option<NaiveDate> {
    let (year, month) = if today.month() == 1 {
        (today.year() - 1, 12)
    } else {
        (today.year(), today.month() - 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Every day of `month_start`'s month, in chronological order.
pub fn month_days(month_start: NaiveDate) -> Vec<NaiveDate> {
    let mut days = Vec::new();
    let mut day = month_start;
    while day.month() == month_start.month() {
        days.push(day);
        let Some(next) = day.succ_opt() else { break };
        day = next;
    }
    days
}

// ============================================================================
// Duplicate-title resolution
// ============================================================================

/// Resolve a free title: `base` itself if no tab uses it, otherwise
/// `base (2)`, `base (3)`, ... up to a sanity cap.
pub fn uniquified_title(client: &dyn SheetsApi, base: &str) -> Result<String, ReportError> {
    if client.tab_id(base)?.is_none() {
        return Ok(base.to_string());
    }
    for n in 2..=99 {
        let candidate = format!("{} ({})", base, n);
        if client.tab_id(&candidate)?.is_none() {
            return Ok(candidate);
        }
    }
    Err(ReportError::Api {
        context: "duplicate-title".to_string(),
        detail: format!("no free title found for '{}' after 99 attempts", base),
    })
}
