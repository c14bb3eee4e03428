use chrono::{DateTime, Utc};

/// Hours and minutes, as shown next to chat messages.
#[must_use]
pub fn format_clock(value: DateTime<Utc>) -> String {
    value.format("%H:%M").to_string()
}

/// Calendar date, as shown next to saved items.
#[must_use]
pub fn format_date(value: DateTime<Utc>) -> String {
    value.format("%d %b %Y").to_string()
}
