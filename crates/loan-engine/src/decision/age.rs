use chrono::{Datelike, NaiveDate};

use super::error::DecisionError;
use super::personal_code::{calendar_date, digits, two_digit};

/// Birth date encoded in a personal code, restricted to the centuries the
/// lending product serves.
pub fn birth_date(code: &str) -> Result<NaiveDate, DecisionError> {
    let digits = digits(code).ok_or(DecisionError::InvalidPersonalCode)?;

    let century = match digits[0] {
        3 | 4 => 1900,
        5 | 6 => 2000,
        7 | 8 => 2100,
        other => {
            return Err(DecisionError::UnknownCentury {
                indicator: char::from_digit(other, 10).unwrap_or('?'),
            })
        }
    };

    let year = century + two_digit(digits[1], digits[2]);
    let month = two_digit(digits[3], digits[4]);
    let day = two_digit(digits[5], digits[6]);

    calendar_date(year, month, day).ok_or(DecisionError::InvalidPersonalCode)
}

/// Whole years lived as of `today`, truncated toward zero. Negative when the
/// birth date lies ahead.
pub fn derive_age(code: &str, today: NaiveDate) -> Result<i32, DecisionError> {
    let born = birth_date(code)?;
    Ok(completed_years(born, today))
}

fn completed_years(born: NaiveDate, today: NaiveDate) -> i32 {
    let mut months =
        (today.year() - born.year()) * 12 + today.month() as i32 - born.month() as i32;
    let days = today.day() as i32 - born.day() as i32;

    // An unfinished month never counts, in either direction.
    if months > 0 && days < 0 {
        months -= 1;
    } else if months < 0 && days > 0 {
        months += 1;
    }

    months / 12
}
