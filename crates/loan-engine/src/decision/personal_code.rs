//! Structural validation of Estonian personal identification codes.
//!
//! A code is `GYYMMDDSSSC`: a gender/century digit, a birth date, a three digit
//! serial and a check digit. Only the format is checked here; no population
//! registry is consulted.

use chrono::NaiveDate;

pub(crate) const CODE_LENGTH: usize = 11;

const FIRST_WEIGHTS: [u32; 10] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 1];
const SECOND_WEIGHTS: [u32; 10] = [3, 4, 5, 6, 7, 8, 9, 1, 2, 3];

/// Returns `true` when `code` is a well-formed personal code with a valid
/// birth date and check digit.
pub fn is_valid(code: &str) -> bool {
    let Some(digits) = digits(code) else {
        return false;
    };

    let Some(century) = registry_century(digits[0]) else {
        return false;
    };

    let year = century + two_digit(digits[1], digits[2]);
    let month = two_digit(digits[3], digits[4]);
    let day = two_digit(digits[5], digits[6]);
    if calendar_date(year, month, day).is_none() {
        return false;
    }

    check_digit(&digits) == digits[10]
}

/// Splits the code into its eleven decimal digits.
pub(crate) fn digits(code: &str) -> Option<[u32; CODE_LENGTH]> {
    let bytes = code.as_bytes();
    if bytes.len() != CODE_LENGTH {
        return None;
    }

    let mut out = [0u32; CODE_LENGTH];
    for (slot, byte) in out.iter_mut().zip(bytes) {
        *slot = char::from(*byte).to_digit(10)?;
    }
    Some(out)
}

pub(crate) fn two_digit(tens: u32, ones: u32) -> i32 {
    (tens * 10 + ones) as i32
}

pub(crate) fn calendar_date(year: i32, month: i32, day: i32) -> Option<NaiveDate> {
    let month = u32::try_from(month).ok()?;
    let day = u32::try_from(day).ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

// The registry format reserves 1-8; 1 and 2 denote the 1800s.
fn registry_century(indicator: u32) -> Option<i32> {
    match indicator {
        1 | 2 => Some(1800),
        3 | 4 => Some(1900),
        5 | 6 => Some(2000),
        7 | 8 => Some(2100),
        _ => None,
    }
}

fn weighted_remainder(digits: &[u32; CODE_LENGTH], weights: &[u32; 10]) -> u32 {
    digits
        .iter()
        .zip(weights)
        .map(|(digit, weight)| digit * weight)
        .sum::<u32>()
        % 11
}

pub(crate) fn check_digit(digits: &[u32; CODE_LENGTH]) -> u32 {
    match weighted_remainder(digits, &FIRST_WEIGHTS) {
        10 => match weighted_remainder(digits, &SECOND_WEIGHTS) {
            10 => 0,
            remainder => remainder,
        },
        remainder => remainder,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_registry_sample() {
        assert!(is_valid("37605030299"));
        assert!(is_valid("39001054321"));
        assert!(is_valid("60002297505"));
    }

    #[test]
    fn rejects_wrong_check_digit() {
        assert!(!is_valid("37605030298"));
        assert!(!is_valid("39001054322"));
    }

    #[test]
    fn rejects_wrong_length_and_non_digits() {
        assert!(!is_valid(""));
        assert!(!is_valid("1234"));
        assert!(!is_valid("376050302990"));
        assert!(!is_valid("3760503029x"));
        assert!(!is_valid(" 3760503029"));
    }

    #[test]
    fn rejects_impossible_birth_dates() {
        // 1990-02-30 with a check digit that would otherwise match
        assert!(!is_valid("39002301231"));
    }

    #[test]
    fn rejects_reserved_century_indicators() {
        assert!(!is_valid("07605030299"));
        assert!(!is_valid("97605030299"));
    }

    #[test]
    fn second_weight_pass_is_used_when_first_remainder_is_ten() {
        let digits = digits("39001050167").expect("eleven digits");
        assert_eq!(weighted_remainder(&digits, &FIRST_WEIGHTS), 10);
        assert_eq!(check_digit(&digits), 7);
        assert!(is_valid("39001050167"));
    }

    #[test]
    fn check_digit_falls_back_to_zero_when_both_passes_give_ten() {
        let digits = digits("39001050040").expect("eleven digits");
        assert_eq!(weighted_remainder(&digits, &SECOND_WEIGHTS), 10);
        assert_eq!(check_digit(&digits), 0);
        assert!(is_valid("39001050040"));
    }
}
