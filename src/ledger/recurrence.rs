use std::fmt;

use chrono::{DateTime, Datelike, Duration, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::config::Locale;

pub const DEFAULT_DAY_OF_WEEK: u8 = 1;
pub const DEFAULT_DAY_OF_MONTH: u8 = 1;
pub const MAX_DAY_OF_MONTH: u8 = 28;

const WEEKLY_MIN_GAP_DAYS: i64 = 6;
const BIWEEKLY_MIN_GAP_DAYS: i64 = 13;

const DAY_NAMES_ES: [&str; 7] = [
    "Domingo",
    "Lunes",
    "Martes",
    "Miércoles",
    "Jueves",
    "Viernes",
    "Sábado",
];
const DAY_NAMES_EN: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Schedule attached to a quick transaction. Days of week count from Sunday = 0.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "frequency", rename_all = "lowercase")]
pub enum Recurrence {
    Daily,
    Weekly {
        #[serde(default, rename = "dayOfWeek", skip_serializing_if = "Option::is_none")]
        day_of_week: Option<u8>,
    },
    Biweekly {
        #[serde(default, rename = "dayOfWeek", skip_serializing_if = "Option::is_none")]
        day_of_week: Option<u8>,
    },
    Monthly {
        #[serde(default, rename = "dayOfMonth", skip_serializing_if = "Option::is_none")]
        day_of_month: Option<u8>,
    },
}

impl Recurrence {
    pub fn weekly(day_of_week: u8) -> Self {
        Recurrence::Weekly {
            day_of_week: Some(day_of_week),
        }
    }

    pub fn biweekly(day_of_week: u8) -> Self {
        Recurrence::Biweekly {
            day_of_week: Some(day_of_week),
        }
    }

    pub fn monthly(day_of_month: u8) -> Self {
        Recurrence::Monthly {
            day_of_month: Some(day_of_month),
        }
    }

    /// Decides whether the rule fires on the calendar day of `now`.
    ///
    /// Both timestamps must carry the local offset that applied at their own
    /// instant, so a run before a DST change keeps its original calendar day.
    /// A rule that already ran on the same calendar day never fires again that
    /// day. Out-of-range day values are not rejected here; they simply never
    /// match.
    pub fn is_due(
        &self,
        now: DateTime<FixedOffset>,
        last: Option<DateTime<FixedOffset>>,
    ) -> bool {
        if let Some(last) = &last {
            if last.date_naive() == now.date_naive() {
                return false;
            }
        }

        match *self {
            Recurrence::Daily => true,
            Recurrence::Weekly { day_of_week } => {
                weekday_matches(&now, day_of_week)
                    && elapsed_at_least(&now, last.as_ref(), WEEKLY_MIN_GAP_DAYS)
            }
            Recurrence::Biweekly { day_of_week } => {
                weekday_matches(&now, day_of_week)
                    && elapsed_at_least(&now, last.as_ref(), BIWEEKLY_MIN_GAP_DAYS)
            }
            Recurrence::Monthly { day_of_month } => {
                let target = u32::from(day_of_month.unwrap_or(DEFAULT_DAY_OF_MONTH));
                now.day() == target
                    && last.map_or(true, |last| {
                        last.month() != now.month() || last.year() != now.year()
                    })
            }
        }
    }

    /// One-line label such as "Cada 1° del mes" or "Every Friday".
    pub fn describe(&self, locale: Locale) -> String {
        match (*self, locale) {
            (Recurrence::Daily, Locale::Es) => "Diario".into(),
            (Recurrence::Daily, Locale::En) => "Every day".into(),
            (Recurrence::Weekly { day_of_week }, Locale::Es) => {
                format!("Cada {}", day_name(day_of_week, locale))
            }
            (Recurrence::Weekly { day_of_week }, Locale::En) => {
                format!("Every {}", day_name(day_of_week, locale))
            }
            (Recurrence::Biweekly { day_of_week }, Locale::Es) => {
                format!("Cada 2 semanas ({})", day_name(day_of_week, locale))
            }
            (Recurrence::Biweekly { day_of_week }, Locale::En) => {
                format!("Every 2 weeks ({})", day_name(day_of_week, locale))
            }
            (Recurrence::Monthly { day_of_month }, Locale::Es) => {
                format!("Cada {}° del mes", day_of_month.unwrap_or(DEFAULT_DAY_OF_MONTH))
            }
            (Recurrence::Monthly { day_of_month }, Locale::En) => {
                let day = day_of_month.unwrap_or(DEFAULT_DAY_OF_MONTH);
                format!("Every {}{} of the month", day, ordinal_suffix(day))
            }
        }
    }

    /// Range check applied when a template is saved.
    pub fn validate(&self) -> Result<(), String> {
        match *self {
            Recurrence::Daily => Ok(()),
            Recurrence::Weekly { day_of_week } | Recurrence::Biweekly { day_of_week } => {
                match day_of_week {
                    Some(day) if day > 6 => Err(format!("day of week {day} is outside 0-6")),
                    _ => Ok(()),
                }
            }
            Recurrence::Monthly { day_of_month } => match day_of_month {
                Some(day) if day == 0 || day > MAX_DAY_OF_MONTH => Err(format!(
                    "day of month {day} is outside 1-{MAX_DAY_OF_MONTH}"
                )),
                _ => Ok(()),
            },
        }
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe(Locale::En))
    }
}

fn weekday_matches(now: &DateTime<FixedOffset>, day_of_week: Option<u8>) -> bool {
    let target = u32::from(day_of_week.unwrap_or(DEFAULT_DAY_OF_WEEK));
    now.weekday().num_days_from_sunday() == target
}

fn elapsed_at_least(
    now: &DateTime<FixedOffset>,
    last: Option<&DateTime<FixedOffset>>,
    days: i64,
) -> bool {
    last.map_or(true, |last| {
        now.signed_duration_since(*last) >= Duration::days(days)
    })
}

fn day_name(day_of_week: Option<u8>, locale: Locale) -> String {
    let day = day_of_week.unwrap_or(DEFAULT_DAY_OF_WEEK);
    let names = match locale {
        Locale::Es => &DAY_NAMES_ES,
        Locale::En => &DAY_NAMES_EN,
    };
    names
        .get(usize::from(day))
        .map(|name| (*name).to_string())
        .unwrap_or_else(|| format!("#{day}"))
}

fn ordinal_suffix(day: u8) -> &'static str {
    match (day % 10, day % 100) {
        (1, n) if n != 11 => "st",
        (2, n) if n != 12 => "nd",
        (3, n) if n != 13 => "rd",
        _ => "th",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<FixedOffset> {
        FixedOffset::west_opt(6 * 3600)
            .unwrap()
            .with_ymd_and_hms(y, m, d, h, 0, 0)
            .unwrap()
    }

    fn ran(ts: DateTime<FixedOffset>) -> Option<DateTime<FixedOffset>> {
        Some(ts)
    }

    #[test]
    fn daily_fires_unless_already_ran_today() {
        let now = at(2025, 3, 12, 9);
        assert!(Recurrence::Daily.is_due(now, None));
        assert!(Recurrence::Daily.is_due(now, ran(at(2025, 3, 11, 23))));
        assert!(!Recurrence::Daily.is_due(now, ran(at(2025, 3, 12, 0))));
    }

    #[test]
    fn same_day_guard_uses_local_calendar_not_elapsed_hours() {
        // 23:30 local the previous day is only 30 minutes earlier but a different day.
        let now = at(2025, 3, 12, 0);
        let last = FixedOffset::west_opt(6 * 3600)
            .unwrap()
            .with_ymd_and_hms(2025, 3, 11, 23, 30, 0)
            .unwrap();
        assert!(Recurrence::Daily.is_due(now, ran(last)));
    }

    #[test]
    fn each_run_keeps_the_calendar_day_of_its_own_offset() {
        // 23:30 EST on Saturday 2025-03-08 is 00:30 on Sunday in EDT.
        let est = FixedOffset::west_opt(5 * 3600).unwrap();
        let edt = FixedOffset::west_opt(4 * 3600).unwrap();
        let last = est.with_ymd_and_hms(2025, 3, 8, 23, 30, 0).unwrap();
        let now = edt.with_ymd_and_hms(2025, 3, 9, 9, 0, 0).unwrap();
        assert!(Recurrence::Daily.is_due(now, ran(last)));

        // 23:30 EST on Feb 28 belongs to February even when read in March.
        let last = est.with_ymd_and_hms(2025, 2, 28, 23, 30, 0).unwrap();
        let now = edt.with_ymd_and_hms(2025, 3, 15, 9, 0, 0).unwrap();
        assert!(Recurrence::monthly(15).is_due(now, ran(last)));
    }

    #[test]
    fn same_day_guard_applies_to_every_frequency() {
        // 2025-03-17 is a Monday, 2025-03-21 a Friday.
        let monday = at(2025, 3, 17, 18);
        assert!(!Recurrence::weekly(1).is_due(monday, ran(at(2025, 3, 17, 7))));
        let friday = at(2025, 3, 21, 18);
        assert!(!Recurrence::biweekly(5).is_due(friday, ran(at(2025, 3, 21, 7))));
        let first = at(2025, 4, 1, 18);
        assert!(!Recurrence::monthly(1).is_due(first, ran(at(2025, 4, 1, 7))));
        assert!(!Recurrence::Daily.is_due(first, ran(at(2025, 4, 1, 7))));
    }

    #[test]
    fn monthly_matches_day_and_new_month() {
        let rule = Recurrence::monthly(1);
        assert!(rule.is_due(at(2025, 4, 1, 8), None));
        assert!(!rule.is_due(at(2025, 4, 2, 8), None));
        assert!(rule.is_due(at(2025, 4, 1, 8), ran(at(2025, 3, 1, 8))));
        assert!(rule.is_due(at(2025, 1, 1, 8), ran(at(2024, 1, 1, 8))));
    }

    #[test]
    fn monthly_skips_when_already_executed_this_month() {
        let rule = Recurrence::monthly(15);
        assert!(!rule.is_due(at(2025, 4, 15, 18), ran(at(2025, 4, 3, 8))));
    }

    #[test]
    fn monthly_defaults_to_first_day() {
        let rule = Recurrence::Monthly { day_of_month: None };
        assert!(rule.is_due(at(2025, 6, 1, 12), None));
    }

    #[test]
    fn weekly_requires_six_full_days() {
        let rule = Recurrence::weekly(1);
        // 2025-03-17 is a Monday.
        let now = at(2025, 3, 17, 10);
        assert!(rule.is_due(now, None));
        assert!(rule.is_due(now, ran(now - Duration::days(6))));
        assert!(!rule.is_due(now, ran(now - Duration::days(5))));
        assert!(!rule.is_due(at(2025, 3, 18, 10), None));
    }

    #[test]
    fn biweekly_requires_thirteen_days() {
        let rule = Recurrence::biweekly(5);
        // 2025-03-21 is a Friday.
        let now = at(2025, 3, 21, 10);
        assert!(rule.is_due(now, ran(now - Duration::days(13))));
        assert!(!rule.is_due(now, ran(now - Duration::days(7))));
    }

    #[test]
    fn out_of_range_days_never_match() {
        let now = at(2025, 3, 17, 10);
        assert!(!Recurrence::weekly(9).is_due(now, None));
        assert!(!Recurrence::monthly(45).is_due(now, None));
        assert!(Recurrence::weekly(9).validate().is_err());
        assert!(Recurrence::monthly(0).validate().is_err());
        assert!(Recurrence::monthly(28).validate().is_ok());
    }

    #[test]
    fn describes_rules_in_both_locales() {
        assert_eq!(Recurrence::monthly(1).describe(Locale::Es), "Cada 1° del mes");
        assert_eq!(Recurrence::weekly(5).describe(Locale::Es), "Cada Viernes");
        assert_eq!(
            Recurrence::Biweekly { day_of_week: None }.describe(Locale::Es),
            "Cada 2 semanas (Lunes)"
        );
        assert_eq!(Recurrence::Daily.describe(Locale::Es), "Diario");
        assert_eq!(Recurrence::monthly(22).to_string(), "Every 22nd of the month");
        assert_eq!(Recurrence::monthly(11).to_string(), "Every 11th of the month");
        assert_eq!(Recurrence::weekly(0).to_string(), "Every Sunday");
    }

    #[test]
    fn serializes_with_frequency_tag() {
        let json = serde_json::to_string(&Recurrence::monthly(15)).unwrap();
        assert_eq!(json, r#"{"frequency":"monthly","dayOfMonth":15}"#);
        let parsed: Recurrence = serde_json::from_str(r#"{"frequency":"weekly"}"#).unwrap();
        assert_eq!(parsed, Recurrence::Weekly { day_of_week: None });
    }
}
