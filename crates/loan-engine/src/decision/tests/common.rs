use std::sync::Arc;

use axum::body::to_bytes;
use axum::response::Response;
use chrono::NaiveDate;

use crate::config::LendingConfig;
use crate::decision::personal_code::{check_digit, digits};
use crate::decision::{DecisionEngine, DecisionResponse, LoanRequest};

/// Born 1990-01-05, suffix 4321 (tier 1).
pub(super) const TIER_1_CODE: &str = "39001054321";
/// Born 1988-01-03, suffix 5000 (tier 2).
pub(super) const TIER_2_CODE: &str = "38801035000";
/// Born 1988-01-07, suffix 7500 (tier 3).
pub(super) const TIER_3_CODE: &str = "38801077500";
/// Born 1990-01-03, suffix 1000 (debtor).
pub(super) const DEBTOR_CODE: &str = "39001031000";
/// Born 2008-01-01, tier 3 suffix; 17 on the reference day.
pub(super) const SEVENTEEN_CODE: &str = "50801017500";
/// Born 1945-01-02, tier 3 suffix; 80 on the reference day.
pub(super) const EIGHTY_CODE: &str = "34501029999";
/// Born 2020-01-01; underage for the foreseeable future.
pub(super) const CHILD_CODE: &str = "62001017502";
/// 1800s century digit with a valid check digit.
pub(super) const NINETEENTH_CENTURY_CODE: &str = "19001055000";
/// Same as `TIER_1_CODE` with a broken check digit.
pub(super) const BAD_CHECKSUM_CODE: &str = "39001054322";

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid date")
}

pub(super) fn lending_config() -> LendingConfig {
    LendingConfig::default()
}

pub(super) fn engine() -> DecisionEngine {
    DecisionEngine::new(lending_config())
}

pub(super) fn shared_engine() -> Arc<DecisionEngine> {
    Arc::new(engine())
}

pub(super) fn request(code: &str, amount: i64, period: i32) -> LoanRequest {
    LoanRequest::new(code, amount, period)
}

/// Completes `prefix` (ten digits) with its check digit.
pub(super) fn with_check_digit(prefix: &str) -> String {
    let code = format!("{prefix}0");
    let parsed = digits(&code).expect("ten digit prefix");
    format!("{prefix}{}", check_digit(&parsed))
}

pub(super) async fn read_response(response: Response) -> DecisionResponse {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("decision response json")
}
