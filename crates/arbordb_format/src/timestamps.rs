//! Wall-clock timestamp rendering.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Parses an IANA zone name, falling back to UTC for anything unknown.
///
/// ```rust
/// use arbordb_format::zone_from_tag;
/// use chrono_tz::Tz;
///
/// assert_eq!(zone_from_tag("America/New_York"), Tz::America__New_York);
/// assert_eq!(zone_from_tag("Mars/Olympus"), Tz::UTC);
/// assert_eq!(zone_from_tag(""), Tz::UTC);
/// ```
#[must_use]
pub fn zone_from_tag(tag: &str) -> Tz {
    tag.trim().parse().unwrap_or(Tz::UTC)
}

/// Renders a UTC instant as `YYYY-MM-DD HH:MM:SS` wall-clock time in the
/// given zone.
#[must_use]
pub fn render_timestamp(ts: DateTime<Utc>, zone: Tz) -> String {
    ts.with_timezone(&zone).format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 45).unwrap()
    }

    #[test]
    fn utc_renders_as_is() {
        assert_eq!(render_timestamp(instant(), Tz::UTC), "2024-03-01 12:30:45");
    }

    #[test]
    fn zones_shift_the_wall_clock() {
        assert_eq!(
            render_timestamp(instant(), zone_from_tag("America/Mexico_City")),
            "2024-03-01 06:30:45"
        );
        assert_eq!(
            render_timestamp(instant(), zone_from_tag("Europe/Madrid")),
            "2024-03-01 13:30:45"
        );
    }

    #[test]
    fn unknown_zone_falls_back_to_utc() {
        assert_eq!(
            render_timestamp(instant(), zone_from_tag("Not/AZone")),
            "2024-03-01 12:30:45"
        );
    }

    #[test]
    fn zone_tags_tolerate_surrounding_whitespace() {
        assert_eq!(zone_from_tag("  UTC  "), Tz::UTC);
    }
}
