use chrono::{DateTime, Local, Utc};

/// File timestamps are shown in the viewer's local time, to the second.
#[must_use]
pub fn format_datetime(value: DateTime<Utc>) -> String {
    value
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_without_fractional_seconds() {
        let value = DateTime::parse_from_rfc3339("2025-05-03T08:30:15.250Z")
            .unwrap()
            .with_timezone(&Utc);
        let formatted = format_datetime(value);
        assert_eq!(formatted.len(), "2025-05-03 08:30:15".len());
        assert!(formatted.ends_with(":15"));
    }
}
