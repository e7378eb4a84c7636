use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Which weekdays get a row on the grid.
///
/// Days are numbered Monday=1 .. Sunday=7; the first `visible_days` of them
/// are shown, the rest are dropped from the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekModel {
    pub visible_days: u32,
}

impl WeekModel {
    /// Monday through Saturday.
    pub const ACADEMIC: WeekModel = WeekModel { visible_days: 6 };

    /// Day number of `date`, Monday=1 .. Sunday=7.
    pub fn day_of_week(date: &NaiveDate) -> u32 {
        date.weekday().number_from_monday()
    }

    pub fn is_visible(&self, day_of_week: u32) -> bool {
        (1..=self.visible_days).contains(&day_of_week)
    }

    /// Monday on or before `date`.
    pub fn week_start(date: &NaiveDate) -> NaiveDate {
        *date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
    }

    /// Last visible day on or after `date`. Days past the last visible day
    /// are returned unchanged.
    pub fn week_end(&self, date: &NaiveDate) -> NaiveDate {
        let dow = Self::day_of_week(date);
        if dow > self.visible_days {
            *date
        } else {
            *date + Duration::days(i64::from(self.visible_days - dow))
        }
    }

    /// Sunday on or after `date`, the boundary session weeks are counted from.
    pub fn week_boundary(date: &NaiveDate) -> NaiveDate {
        let from_sunday = i64::from(date.weekday().num_days_from_sunday());
        *date + Duration::days((7 - from_sunday) % 7)
    }

    /// Visible days from `start` to `end` inclusive, in calendar order.
    pub fn visible_dates(&self, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
        start
            .iter_days()
            .take_while(|d| *d <= end)
            .filter(|d| self.is_visible(Self::day_of_week(d)))
            .collect()
    }
}

impl Default for WeekModel {
    fn default() -> Self {
        Self::ACADEMIC
    }
}

/// Number of whole weeks covering `days`, rounded towards positive infinity.
pub(crate) fn ceil_weeks(days: i64) -> i64 {
    -((-days).div_euclid(7))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_day_of_week_sunday_is_seven() {
        assert_eq!(WeekModel::day_of_week(&d(2024, 1, 8)), 1);
        assert_eq!(WeekModel::day_of_week(&d(2024, 1, 13)), 6);
        assert_eq!(WeekModel::day_of_week(&d(2024, 1, 14)), 7);
    }

    #[test]
    fn test_academic_week_hides_sunday() {
        let week = WeekModel::ACADEMIC;
        assert!(week.is_visible(1));
        assert!(week.is_visible(6));
        assert!(!week.is_visible(7));
        assert!(!week.is_visible(0));
    }

    #[test]
    fn test_week_start() {
        assert_eq!(WeekModel::week_start(&d(2024, 1, 10)), d(2024, 1, 8));
        assert_eq!(WeekModel::week_start(&d(2024, 1, 8)), d(2024, 1, 8));
        assert_eq!(WeekModel::week_start(&d(2024, 1, 14)), d(2024, 1, 8));
    }

    #[test]
    fn test_week_end() {
        let week = WeekModel::ACADEMIC;
        assert_eq!(week.week_end(&d(2024, 1, 8)), d(2024, 1, 13));
        assert_eq!(week.week_end(&d(2024, 1, 13)), d(2024, 1, 13));
        assert_eq!(week.week_end(&d(2024, 1, 14)), d(2024, 1, 14));
    }

    #[test]
    fn test_week_boundary() {
        assert_eq!(WeekModel::week_boundary(&d(2024, 1, 8)), d(2024, 1, 14));
        assert_eq!(WeekModel::week_boundary(&d(2024, 1, 13)), d(2024, 1, 14));
        assert_eq!(WeekModel::week_boundary(&d(2024, 1, 14)), d(2024, 1, 14));
        assert_eq!(WeekModel::week_boundary(&d(2024, 1, 15)), d(2024, 1, 21));
    }

    #[test]
    fn test_visible_dates_skip_sunday() {
        let dates = WeekModel::ACADEMIC.visible_dates(d(2024, 1, 8), d(2024, 1, 20));
        assert_eq!(dates.len(), 12);
        assert_eq!(dates[5], d(2024, 1, 13));
        assert_eq!(dates[6], d(2024, 1, 15));
    }

    #[test]
    fn test_ceil_weeks() {
        assert_eq!(ceil_weeks(0), 0);
        assert_eq!(ceil_weeks(1), 1);
        assert_eq!(ceil_weeks(7), 1);
        assert_eq!(ceil_weeks(8), 2);
        assert_eq!(ceil_weeks(-1), 0);
        assert_eq!(ceil_weeks(-7), -1);
        assert_eq!(ceil_weeks(-8), -1);
    }
}
