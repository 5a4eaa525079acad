use time::{Date, Month, OffsetDateTime};

/// Current UTC calendar date.
pub fn today_utc() -> Date {
    OffsetDateTime::now_utc().date()
}

/// `YYYY-MM-DD`, the path segment the remote API expects.
pub fn format_api_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Short `DD.MM` label shown next to series points.
pub fn format_label(date: Date) -> String {
    format!("{:02}.{:02}", date.day(), u8::from(date.month()))
}

/// Parse a `YYYY-MM-DD` date, ignoring anything after the day.
pub fn parse_api_date(input: &str) -> Option<Date> {
    let head = input.trim().get(..10)?;
    let mut parts = head.split('-');
    let year = parts.next()?.parse::<i32>().ok()?;
    let month = parts.next()?.parse::<u8>().ok()?;
    let day = parts.next()?.parse::<u8>().ok()?;
    let month = Month::try_from(month).ok()?;
    Date::from_calendar_date(year, month, day).ok()
}

/// Serde adapter writing dates as `YYYY-MM-DD`.
pub mod serde_date {
    use serde::de::Error as DeError;
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Date;

    pub fn serialize<S>(date: &Date, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_api_date(*date))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Date, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        super::parse_api_date(&value)
            .ok_or_else(|| D::Error::custom(format!("invalid date '{value}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_and_parses_api_dates() {
        let date = Date::from_calendar_date(2024, Month::March, 7).expect("valid date");
        assert_eq!(format_api_date(date), "2024-03-07");
        assert_eq!(format_label(date), "07.03");
        assert_eq!(parse_api_date("2024-03-07"), Some(date));
        assert_eq!(parse_api_date("2024-03-07T10:00:00Z"), Some(date));
    }

    #[test]
    fn rejects_malformed_dates() {
        assert_eq!(parse_api_date("2024-13-01"), None);
        assert_eq!(parse_api_date("yesterday"), None);
        assert_eq!(parse_api_date(""), None);
    }
}
