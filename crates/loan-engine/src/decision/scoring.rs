/// Credit score for lending `amount` over `period` months to an applicant
/// with the given segment modifier.
pub fn credit_score(modifier: u32, amount: i64, period: i32, divisor: f64) -> f64 {
    ((f64::from(modifier) / amount as f64) * f64::from(period)) / divisor
}

pub fn is_approvable(score: f64, minimum: f64) -> bool {
    score >= minimum
}
