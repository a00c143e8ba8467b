//! Age calculation from date of birth.

use std::fmt;

use chrono::{Datelike, NaiveDate};

/// Whole years and months elapsed since birth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Age {
    pub years: u32,
    pub months: u32,
}

impl Age {
    /// Calendar difference between `date_of_birth` and `today`.
    ///
    /// A month only counts once its day-of-month has been reached, so a pet
    /// born on the 31st is not a month old on the 1st. Dates of birth on or
    /// after `today` yield zero.
    pub fn between(date_of_birth: NaiveDate, today: NaiveDate) -> Self {
        if date_of_birth >= today {
            return Self { years: 0, months: 0 };
        }

        let mut years = today.year() - date_of_birth.year();
        let mut months = today.month() as i32 - date_of_birth.month() as i32;
        if today.day() < date_of_birth.day() {
            months -= 1;
        }
        if months < 0 {
            years -= 1;
            months += 12;
        }

        Self {
            years: years.max(0) as u32,
            months: months as u32,
        }
    }

    pub fn total_months(&self) -> u32 {
        self.years * 12 + self.months
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.years, self.months) {
            (0, 0) => f.write_str("New"),
            (0, m) => write!(f, "{}m", m),
            (y, 0) => write!(f, "{}y", y),
            (y, m) => write!(f, "{}y {}m", y, m),
        }
    }
}

/// Human-readable age label: `"2y 3m"`, `"2y"`, `"5m"` or `"New"`.
pub fn age_label(date_of_birth: NaiveDate, today: NaiveDate) -> String {
    Age::between(date_of_birth, today).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Months;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_born_today_is_new() {
        let today = date(2024, 6, 15);
        assert_eq!(age_label(today, today), "New");
    }

    #[test]
    fn test_thirteen_months() {
        let today = date(2024, 6, 15);
        let dob = today.checked_sub_months(Months::new(13)).unwrap();
        assert_eq!(age_label(dob, today), "1y 1m");
    }

    #[test]
    fn test_month_part_omitted_when_zero() {
        assert_eq!(age_label(date(2021, 6, 15), date(2024, 6, 15)), "3y");
    }

    #[test]
    fn test_months_only() {
        assert_eq!(age_label(date(2024, 1, 10), date(2024, 6, 15)), "5m");
    }

    #[test]
    fn test_borrows_year_before_birthday() {
        // Birthday in November has not happened yet in June.
        assert_eq!(age_label(date(2020, 11, 3), date(2024, 6, 15)), "3y 7m");
    }

    #[test]
    fn test_day_of_month_not_reached() {
        assert_eq!(age_label(date(2024, 1, 31), date(2024, 2, 28)), "New");
        assert_eq!(age_label(date(2023, 6, 20), date(2024, 6, 15)), "11m");
    }

    #[test]
    fn test_future_date_clamps_to_new() {
        assert_eq!(age_label(date(2025, 1, 1), date(2024, 6, 15)), "New");
    }

    #[test]
    fn test_total_months() {
        let age = Age::between(date(2020, 1, 1), date(2022, 4, 1));
        assert_eq!(age, Age { years: 2, months: 3 });
        assert_eq!(age.total_months(), 27);
    }
}
