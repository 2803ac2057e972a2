//! Age arithmetic on calendar dates

use chrono::{Datelike, NaiveDate};

/// Age used for the adult / minor split
pub const ADULT_AGE: i32 = 18;

/// Whole years between `birth` and `end`.
///
/// One year is subtracted when the end month/day falls before the birth
/// month/day. A birth after `end` gives a negative age.
pub fn age_in_years(birth: NaiveDate, end: NaiveDate) -> i32 {
    let mut age = end.year() - birth.year();
    if (end.month(), end.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}
