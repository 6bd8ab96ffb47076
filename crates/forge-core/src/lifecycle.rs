use crate::dates::{parse_instant, parse_optional_date};
use crate::error::{ForgeError, Result};
use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// LifecyclePhase
// ---------------------------------------------------------------------------

/// Where "now" sits relative to a forge window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecyclePhase {
    Pre,
    During,
    Post,
}

impl LifecyclePhase {
    pub fn all() -> &'static [LifecyclePhase] {
        &[
            LifecyclePhase::Pre,
            LifecyclePhase::During,
            LifecyclePhase::Post,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LifecyclePhase::Pre => "pre",
            LifecyclePhase::During => "during",
            LifecyclePhase::Post => "post",
        }
    }
}

impl fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LifecyclePhase {
    type Err = ForgeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        LifecyclePhase::all()
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ForgeError::InvalidPhase(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Boundary normalization
// ---------------------------------------------------------------------------

const LAST_MILLI_OF_DAY: i64 = 86_400_000 - 1;

/// 00:00:00.000 on `date`.
pub fn normalize_start(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// 23:59:59.999 on `date`.
pub fn normalize_end(date: NaiveDate) -> NaiveDateTime {
    normalize_start(date) + Duration::milliseconds(LAST_MILLI_OF_DAY)
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Classify `now` against an optional `[start, end]` day window.
///
/// `now` is the wall-clock time in the zone calendar days are read in. Both
/// boundaries are inclusive; a window without a start has not been
/// scheduled and is always `Pre`, and a window without an end never closes.
pub fn classify(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    now: NaiveDateTime,
) -> LifecyclePhase {
    let Some(start) = start else {
        return LifecyclePhase::Pre;
    };
    if now < normalize_start(start) {
        return LifecyclePhase::Pre;
    }
    match end {
        Some(end) if now > normalize_end(end) => LifecyclePhase::Post,
        _ => LifecyclePhase::During,
    }
}

/// Classify against an instant, using that instant's local calendar.
pub fn classify_at<Tz: TimeZone>(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    now: &DateTime<Tz>,
) -> LifecyclePhase {
    classify(start, end, now.naive_local())
}

/// Classify against the system clock in the local time zone.
pub fn classify_now(start: Option<NaiveDate>, end: Option<NaiveDate>) -> LifecyclePhase {
    classify_at(start, end, &Local::now())
}

/// Parse both boundaries strictly, then classify.
pub fn classify_str(
    start: Option<&str>,
    end: Option<&str>,
    now: NaiveDateTime,
) -> Result<LifecyclePhase> {
    let window = ForgeWindow::parse(start, end)?;
    Ok(window.phase_at(now))
}

// ---------------------------------------------------------------------------
// ForgeWindow
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForgeWindow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDate>,
}

impl ForgeWindow {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn parse(start: Option<&str>, end: Option<&str>) -> Result<Self> {
        Ok(Self {
            start: parse_optional_date(start)?,
            end: parse_optional_date(end)?,
        })
    }

    pub fn phase_at(&self, now: NaiveDateTime) -> LifecyclePhase {
        classify(self.start, self.end, now)
    }

    /// Like [`phase_at`](Self::phase_at) but `now` is a string in any form
    /// [`parse_instant`] accepts.
    pub fn phase_at_str(&self, now: &str) -> Result<LifecyclePhase> {
        Ok(self.phase_at(parse_instant(now)?))
    }

    pub fn phase_now(&self) -> LifecyclePhase {
        classify_now(self.start, self.end)
    }

    pub fn is_open_ended(&self) -> bool {
        self.start.is_some() && self.end.is_none()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(s: &str) -> NaiveDateTime {
        parse_instant(s).unwrap()
    }

    #[test]
    fn phase_roundtrip_via_str() {
        for phase in LifecyclePhase::all() {
            let parsed: LifecyclePhase = phase.as_str().parse().unwrap();
            assert_eq!(parsed, *phase);
        }
        assert!(matches!(
            "live".parse::<LifecyclePhase>(),
            Err(ForgeError::InvalidPhase(_))
        ));
    }

    #[test]
    fn phase_serializes_snake_case() {
        let json = serde_json::to_string(&LifecyclePhase::During).unwrap();
        assert_eq!(json, "\"during\"");
    }

    #[test]
    fn normalization_bounds_the_day() {
        let d = ymd(2025, 6, 10);
        assert_eq!(normalize_start(d), at("2025-06-10T00:00:00"));
        assert_eq!(normalize_end(d), at("2025-06-10T23:59:59.999"));
    }

    #[test]
    fn absent_start_is_always_pre() {
        let now = at("2030-01-01T12:00:00");
        assert_eq!(classify(None, None, now), LifecyclePhase::Pre);
        assert_eq!(classify(None, Some(ymd(2020, 1, 1)), now), LifecyclePhase::Pre);
    }

    #[test]
    fn before_start_is_pre() {
        let start = Some(ymd(2025, 6, 1));
        assert_eq!(
            classify(start, None, at("2025-05-30")),
            LifecyclePhase::Pre
        );
        assert_eq!(
            classify(start, None, at("2025-05-31T23:59:59.999")),
            LifecyclePhase::Pre
        );
    }

    #[test]
    fn start_boundary_is_inclusive() {
        let start = Some(ymd(2025, 6, 1));
        assert_eq!(
            classify(start, None, at("2025-06-01T00:00:00")),
            LifecyclePhase::During
        );
    }

    #[test]
    fn end_boundary_is_inclusive() {
        let (start, end) = (Some(ymd(2025, 6, 1)), Some(ymd(2025, 6, 10)));
        assert_eq!(
            classify(start, end, at("2025-06-10T23:59:59.999")),
            LifecyclePhase::During
        );
        assert_eq!(
            classify(start, end, at("2025-06-11T00:00:00")),
            LifecyclePhase::Post
        );
    }

    #[test]
    fn sub_millisecond_after_end_is_post() {
        let end = ymd(2025, 6, 10);
        let now = normalize_end(end) + Duration::microseconds(1);
        assert_eq!(
            classify(Some(ymd(2025, 6, 1)), Some(end), now),
            LifecyclePhase::Post
        );
    }

    #[test]
    fn open_ended_window_never_closes() {
        let start = Some(ymd(2025, 6, 1));
        assert_eq!(
            classify(start, None, at("9999-12-31T23:59:59")),
            LifecyclePhase::During
        );
    }

    #[test]
    fn single_day_window() {
        let day = Some(ymd(2025, 6, 1));
        assert_eq!(classify(day, day, at("2025-06-01T12:00:00")), LifecyclePhase::During);
        assert_eq!(classify(day, day, at("2025-06-02")), LifecyclePhase::Post);
    }

    #[test]
    fn classify_at_uses_local_wall_clock() {
        // 2025-06-11T01:00 at +02:00 is still June 10 in UTC, but the
        // instant's own calendar has already moved past the window.
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let now = tz.with_ymd_and_hms(2025, 6, 11, 1, 0, 0).unwrap();
        let (start, end) = (Some(ymd(2025, 6, 1)), Some(ymd(2025, 6, 10)));
        assert_eq!(classify_at(start, end, &now), LifecyclePhase::Post);
        assert_eq!(
            classify_at(start, end, &now.with_timezone(&chrono::Utc)),
            LifecyclePhase::During
        );
    }

    #[test]
    fn classify_str_rejects_malformed_boundaries() {
        let now = at("2025-06-05");
        assert!(matches!(
            classify_str(Some("June 1st"), None, now),
            Err(ForgeError::InvalidDate(s)) if s == "June 1st"
        ));
        assert!(matches!(
            classify_str(Some("2025-06-01"), Some("2025-06-40"), now),
            Err(ForgeError::InvalidDate(_))
        ));
        assert_eq!(
            classify_str(Some("2025-06-01"), Some("2025-06-10"), now).unwrap(),
            LifecyclePhase::During
        );
        assert_eq!(classify_str(None, None, now).unwrap(), LifecyclePhase::Pre);
    }

    #[test]
    fn window_helpers() {
        let window = ForgeWindow::parse(Some("2025-06-01"), None).unwrap();
        assert!(window.is_open_ended());
        assert_eq!(window.phase_at_str("2025-05-30").unwrap(), LifecyclePhase::Pre);
        assert_eq!(
            window.phase_at_str("2025-06-01T00:00:00").unwrap(),
            LifecyclePhase::During
        );
        assert!(window.phase_at_str("later").is_err());
        assert!(!ForgeWindow::default().is_open_ended());
    }

    #[test]
    fn phase_now_reads_the_system_clock() {
        let opened = ForgeWindow::parse(Some("2000-01-01"), None).unwrap();
        assert_eq!(opened.phase_now(), LifecyclePhase::During);
        assert_eq!(classify_now(opened.start, opened.end), LifecyclePhase::During);

        let closed = ForgeWindow::parse(Some("2000-01-01"), Some("2000-01-02")).unwrap();
        assert_eq!(closed.phase_now(), LifecyclePhase::Post);
    }

    #[test]
    fn window_yaml_shape() {
        let window: ForgeWindow =
            serde_yaml::from_str("start: 2025-06-01\nend: 2025-06-10\n").unwrap();
        assert_eq!(window, ForgeWindow::new(Some(ymd(2025, 6, 1)), Some(ymd(2025, 6, 10))));

        let unscheduled: ForgeWindow = serde_yaml::from_str("{}").unwrap();
        assert_eq!(unscheduled.phase_now(), LifecyclePhase::Pre);
    }

    #[test]
    fn classification_is_repeatable() {
        let (start, end) = (Some(ymd(2025, 6, 1)), Some(ymd(2025, 6, 10)));
        let now = at("2025-06-05T08:30:00");
        let first = classify(start, end, now);
        for _ in 0..10 {
            assert_eq!(classify(start, end, now), first);
        }
    }
}
