//! Reporting period boundaries.
//!
//! Two independent schemes are derived from a single reference date: weekly
//! windows aligned so each full week runs Saturday through Friday, and the
//! trailing three post months as `MM/YYYY` labels. Callers resolve "now"
//! once with [`today_in`] and pass the resulting date to both.

use chrono::{Datelike, Duration, NaiveDate, Utc, Weekday};
use chrono_tz::Tz;
use serde::Serialize;

/// Current civil date in `tz`.
pub fn today_in(tz: Tz) -> NaiveDate {
    Utc::now().with_timezone(&tz).date_naive()
}

fn last_weekday_on_or_before(date: NaiveDate, weekday: Weekday) -> NaiveDate {
    let back = (7 + date.weekday().num_days_from_monday() - weekday.num_days_from_monday()) % 7;
    date - Duration::days(i64::from(back))
}

/// An inclusive date range used to request and label one report instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl WeekWindow {
    /// `"{start}-{end}"` with both dates in ISO-8601.
    pub fn label(&self) -> String {
        format!("{}-{}", self.start, self.end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekBoundaries {
    pub today: NaiveDate,
    pub last_saturday: NaiveDate,
    pub last_friday: NaiveDate,
    pub saturday_before_last_friday: NaiveDate,
    pub last_to_last_friday: NaiveDate,
    pub saturday_before_last_to_last_friday: NaiveDate,
}

impl WeekBoundaries {
    /// The partial week in progress: last Saturday through today.
    pub fn current_window(&self) -> WeekWindow {
        WeekWindow {
            start: self.last_saturday,
            end: self.today,
        }
    }

    pub fn last_window(&self) -> WeekWindow {
        WeekWindow {
            start: self.saturday_before_last_friday,
            end: self.last_friday,
        }
    }

    pub fn two_ago_window(&self) -> WeekWindow {
        WeekWindow {
            start: self.saturday_before_last_to_last_friday,
            end: self.last_to_last_friday,
        }
    }

    /// Current, last and two-ago windows, most recent first.
    pub fn windows(&self) -> [WeekWindow; 3] {
        [
            self.current_window(),
            self.last_window(),
            self.two_ago_window(),
        ]
    }

    /// All six boundaries as ISO-8601 text, in declaration order.
    pub fn to_iso(&self) -> [(&'static str, String); 6] {
        [
            ("today", self.today.to_string()),
            ("last_saturday", self.last_saturday.to_string()),
            ("last_friday", self.last_friday.to_string()),
            (
                "saturday_before_last_friday",
                self.saturday_before_last_friday.to_string(),
            ),
            ("last_to_last_friday", self.last_to_last_friday.to_string()),
            (
                "saturday_before_last_to_last_friday",
                self.saturday_before_last_to_last_friday.to_string(),
            ),
        ]
    }
}

pub fn weekly_boundaries(today: NaiveDate) -> WeekBoundaries {
    let last_saturday = last_weekday_on_or_before(today, Weekday::Sat);
    let last_friday = last_weekday_on_or_before(last_saturday, Weekday::Fri);
    let saturday_before_last_friday = last_friday - Duration::days(6);
    let last_to_last_friday = last_friday - Duration::days(7);
    let saturday_before_last_to_last_friday = last_to_last_friday - Duration::days(6);

    WeekBoundaries {
        today,
        last_saturday,
        last_friday,
        saturday_before_last_friday,
        last_to_last_friday,
        saturday_before_last_to_last_friday,
    }
}

/// A calendar month, rendered as `MM/YYYY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PostMonth {
    pub year: i32,
    pub month: u32,
}

impl PostMonth {
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The month `count` months earlier, rolling the year back as needed.
    pub fn months_before(self, count: u32) -> Self {
        let index = self.year * 12 + self.month as i32 - 1 - count as i32;
        Self {
            year: index.div_euclid(12),
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    pub fn label(self) -> String {
        format!("{:02}/{}", self.month, self.year)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthLabels {
    pub current: String,
    pub last: String,
    pub last_to_last: String,
}

impl MonthLabels {
    pub fn ordered(&self) -> [&str; 3] {
        [&self.current, &self.last, &self.last_to_last]
    }
}

pub fn three_months_mm_yyyy(today: NaiveDate) -> MonthLabels {
    let current = PostMonth::containing(today);
    MonthLabels {
        current: current.label(),
        last: current.months_before(1).label(),
        last_to_last: current.months_before(2).label(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    fn every_day(from: NaiveDate, to: NaiveDate) -> impl Iterator<Item = NaiveDate> {
        from.iter_days().take_while(move |day| *day <= to)
    }

    #[test]
    fn monday_reference_produces_expected_boundaries() {
        // 2026-01-05 is a Monday.
        let weeks = weekly_boundaries(date(2026, 1, 5));
        assert_eq!(weeks.last_saturday, date(2026, 1, 3));
        assert_eq!(weeks.last_friday, date(2026, 1, 2));
        assert_eq!(weeks.saturday_before_last_friday, date(2025, 12, 27));
        assert_eq!(weeks.last_to_last_friday, date(2025, 12, 26));
        assert_eq!(
            weeks.saturday_before_last_to_last_friday,
            date(2025, 12, 20)
        );
    }

    #[test]
    fn saturday_reference_starts_current_week_today() {
        let saturday = date(2025, 11, 1);
        let weeks = weekly_boundaries(saturday);
        assert_eq!(weeks.last_saturday, saturday);
        assert_eq!(weeks.last_friday, date(2025, 10, 31));
        assert_eq!(weeks.current_window().label(), "2025-11-01-2025-11-01");
    }

    #[test]
    fn friday_reference_keeps_partial_week_open() {
        let friday = date(2025, 10, 31);
        let weeks = weekly_boundaries(friday);
        assert_eq!(weeks.last_saturday, date(2025, 10, 25));
        assert_eq!(weeks.last_friday, date(2025, 10, 24));
        assert_eq!(
            weeks.current_window(),
            WeekWindow {
                start: date(2025, 10, 25),
                end: friday,
            }
        );
    }

    #[test]
    fn weekly_windows_hold_for_every_day() {
        for today in every_day(date(2024, 1, 1), date(2026, 12, 31)) {
            let weeks = weekly_boundaries(today);
            assert_eq!(weeks.last_saturday.weekday(), Weekday::Sat, "{today}");
            assert_eq!(weeks.last_friday.weekday(), Weekday::Fri, "{today}");
            assert!(weeks.last_saturday <= today);
            assert!(today - weeks.last_saturday < Duration::days(7));
            assert!(weeks.last_friday <= weeks.last_saturday);
            assert_eq!(weeks.last_saturday - weeks.last_friday, Duration::days(1));
            assert_eq!(
                weeks.saturday_before_last_friday,
                weeks.last_friday - Duration::days(6)
            );
            assert_eq!(
                weeks.last_to_last_friday,
                weeks.last_friday - Duration::days(7)
            );
            assert_eq!(
                weeks.saturday_before_last_to_last_friday,
                weeks.last_to_last_friday - Duration::days(6)
            );

            let [current, last, two_ago] = weeks.windows();
            assert_eq!(two_ago.end + Duration::days(1), last.start);
            assert_eq!(last.end + Duration::days(1), current.start);
            assert!(current.start <= current.end);
        }
    }

    #[test]
    fn iso_text_matches_dates() {
        let weeks = weekly_boundaries(date(2026, 1, 5));
        let iso = weeks.to_iso();
        assert_eq!(iso[0], ("today", "2026-01-05".to_string()));
        assert_eq!(
            iso[5],
            ("saturday_before_last_to_last_friday", "2025-12-20".to_string())
        );
    }

    #[test]
    fn january_rolls_back_into_prior_year() {
        let months = three_months_mm_yyyy(date(2026, 1, 5));
        assert_eq!(months.current, "01/2026");
        assert_eq!(months.last, "12/2025");
        assert_eq!(months.last_to_last, "11/2025");
    }

    #[test]
    fn february_rolls_two_ago_into_prior_year() {
        let months = three_months_mm_yyyy(date(2026, 2, 28));
        assert_eq!(months.ordered(), ["02/2026", "01/2026", "12/2025"]);
    }

    #[test]
    fn december_stays_within_year() {
        let months = three_months_mm_yyyy(date(2025, 12, 5));
        assert_eq!(months.current, "12/2025");
        assert_eq!(months.last, "11/2025");
        assert_eq!(months.last_to_last, "10/2025");
    }

    #[test]
    fn month_labels_step_back_one_month_for_every_day() {
        for today in every_day(date(2024, 1, 1), date(2026, 12, 31)) {
            let current = PostMonth::containing(today);
            let last = current.months_before(1);
            let two_ago = current.months_before(2);

            let expected_last = if today.month() == 1 {
                PostMonth {
                    year: today.year() - 1,
                    month: 12,
                }
            } else {
                PostMonth {
                    year: today.year(),
                    month: today.month() - 1,
                }
            };
            assert_eq!(last, expected_last, "{today}");
            assert_eq!(last.months_before(1), two_ago, "{today}");
            assert!(two_ago < last && last < current);

            let labels = three_months_mm_yyyy(today);
            assert_eq!(labels.last, expected_last.label());
        }
    }
}
