use serde::{Deserialize, Serialize};

/// Applicant input for a single decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanRequest {
    pub personal_code: String,
    pub loan_amount: i64,
    pub loan_period: i32,
}

impl LoanRequest {
    pub fn new(personal_code: impl Into<String>, loan_amount: i64, loan_period: i32) -> Self {
        Self {
            personal_code: personal_code.into(),
            loan_amount,
            loan_period,
        }
    }
}

/// Largest approvable amount at the shortest acceptable period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanOffer {
    pub loan_amount: i64,
    pub loan_period: i32,
}
