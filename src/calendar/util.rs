use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Lit une date renvoyée par l'API : timestamp RFC3339 (jour UTC), datetime naïf ou `YYYY-MM-DD`.
pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Comme `parse_day`, mais trace un avertissement quand la date est ignorée.
pub(super) fn day_or_warn(raw: &str, what: &str) -> Option<NaiveDate> {
    let day = parse_day(raw);
    if day.is_none() {
        tracing::warn!(date = raw, source = what, "skipping entry with invalid date");
    }
    day
}
