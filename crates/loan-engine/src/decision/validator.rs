use chrono::NaiveDate;

use super::age::derive_age;
use super::domain::LoanRequest;
use super::error::{AgeViolation, DecisionError};
use super::personal_code;
use crate::config::LendingConfig;

/// Gate a request against the lending bounds, returning the applicant age.
///
/// Checks run in a fixed order and the first failure wins: personal code
/// format, amount, period, then age.
pub fn validate(
    config: &LendingConfig,
    request: &LoanRequest,
    today: NaiveDate,
) -> Result<i32, DecisionError> {
    if !personal_code::is_valid(&request.personal_code) {
        return Err(DecisionError::InvalidPersonalCode);
    }

    if !(config.min_amount..=config.max_amount).contains(&request.loan_amount) {
        return Err(DecisionError::InvalidLoanAmount {
            requested: request.loan_amount,
        });
    }

    if !(config.min_period..=config.max_period).contains(&request.loan_period) {
        return Err(DecisionError::InvalidLoanPeriod {
            requested: request.loan_period,
        });
    }

    let age = derive_age(&request.personal_code, today)?;
    check_age(config, age)?;
    Ok(age)
}

fn check_age(config: &LendingConfig, age: i32) -> Result<(), AgeViolation> {
    if age < config.min_age {
        return Err(AgeViolation::Underage {
            age,
            minimum: config.min_age,
        });
    }

    let maximum = config.max_age();
    if age > maximum {
        return Err(AgeViolation::ExceedsMaxAge { age, maximum });
    }

    Ok(())
}
