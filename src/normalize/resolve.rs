// src/normalize/resolve.rs
use chrono::{DateTime, LocalResult, NaiveDateTime, Offset, TimeDelta, TimeZone};
use chrono_tz::Tz;
use tracing::debug;

use super::fold::Occurrence;

/// Map a wall-clock datetime in `tz` to one absolute instant.
///
/// * unique local time: that instant
/// * repeated (fall-back): earlier or later instant per `occurrence`
/// * skipped (spring-forward): read with the offset in force before the
///   transition, which moves it forward by the length of the gap
pub fn resolve_local(tz: &Tz, local: NaiveDateTime, occurrence: Occurrence) -> DateTime<Tz> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earlier, later) => match occurrence {
            Occurrence::Earlier => earlier,
            Occurrence::Later => later,
        },
        LocalResult::None => {
            // Transitions are months apart; a day earlier is safely before the gap.
            let before = tz
                .offset_from_utc_datetime(&(local - TimeDelta::days(1)))
                .fix();
            let utc = local - TimeDelta::seconds(i64::from(before.local_minus_utc()));
            let shifted = tz.from_utc_datetime(&utc);
            debug!(%local, %shifted, "wall-clock time falls in a clock-change gap");
            shifted
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use chrono_tz::Europe::London;

    fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_unique_time_ignores_occurrence() {
        let a = resolve_local(&London, local(2024, 12, 4, 10, 0), Occurrence::Earlier);
        let b = resolve_local(&London, local(2024, 12, 4, 10, 0), Occurrence::Later);
        assert_eq!(a, b);
        assert_eq!(a.to_rfc3339(), "2024-12-04T10:00:00+00:00");
    }

    #[test]
    fn test_fall_back_picks_requested_instant() {
        let t = local(2024, 10, 27, 1, 30);
        let first = resolve_local(&London, t, Occurrence::Earlier);
        let second = resolve_local(&London, t, Occurrence::Later);

        assert_eq!(first.to_rfc3339(), "2024-10-27T01:30:00+01:00");
        assert_eq!(second.to_rfc3339(), "2024-10-27T01:30:00+00:00");
        assert_eq!((second - first).num_seconds(), 3600);
    }

    #[test]
    fn test_spring_forward_shifts_by_gap() {
        let shifted = resolve_local(&London, local(2024, 3, 31, 1, 30), Occurrence::Earlier);
        assert_eq!(shifted.to_rfc3339(), "2024-03-31T02:30:00+01:00");

        let before = resolve_local(&London, local(2024, 3, 31, 0, 30), Occurrence::Earlier);
        assert_eq!((shifted - before).num_minutes(), 60);
    }
}
