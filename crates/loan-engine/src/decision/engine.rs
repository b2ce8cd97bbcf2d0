use chrono::{Local, NaiveDate};
use tracing::{debug, info};

use super::domain::{LoanOffer, LoanRequest};
use super::error::DecisionError;
use super::scoring::{credit_score, is_approvable};
use super::segment::classify;
use super::validator::validate;
use crate::config::LendingConfig;

/// Outcome of a decision together with how much search work it took.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTrace {
    pub outcome: Result<LoanOffer, DecisionError>,
    pub score_evaluations: usize,
}

/// Stateless decision engine. Holds only the read-only lending configuration,
/// so one instance can serve any number of concurrent callers.
#[derive(Debug, Clone)]
pub struct DecisionEngine {
    config: LendingConfig,
}

impl DecisionEngine {
    pub fn new(config: LendingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LendingConfig {
        &self.config
    }

    /// Decide against the local calendar date.
    pub fn decide(&self, request: &LoanRequest) -> Result<LoanOffer, DecisionError> {
        self.decide_on(request, Local::now().date_naive())
    }

    pub fn decide_on(
        &self,
        request: &LoanRequest,
        today: NaiveDate,
    ) -> Result<LoanOffer, DecisionError> {
        self.decide_traced(request, today).outcome
    }

    pub fn decide_traced(&self, request: &LoanRequest, today: NaiveDate) -> DecisionTrace {
        let mut score_evaluations = 0;
        let outcome = self.run(request, today, &mut score_evaluations);

        match &outcome {
            Ok(offer) => info!(
                amount = offer.loan_amount,
                period = offer.loan_period,
                score_evaluations,
                "loan approved"
            ),
            Err(err) => info!(kind = ?err.kind(), score_evaluations, "loan rejected"),
        }

        DecisionTrace {
            outcome,
            score_evaluations,
        }
    }

    fn run(
        &self,
        request: &LoanRequest,
        today: NaiveDate,
        evaluations: &mut usize,
    ) -> Result<LoanOffer, DecisionError> {
        self.config
            .validate()
            .map_err(|err| DecisionError::unclassified(err.to_string()))?;

        let age = validate(&self.config, request, today)?;
        let modifier = classify(&request.personal_code, &self.config.segments)?;
        debug!(
            age,
            modifier,
            requested_amount = request.loan_amount,
            requested_period = request.loan_period,
            "applicant eligible for scoring"
        );

        if modifier == 0 {
            return Err(DecisionError::NoValidLoan);
        }

        self.search(modifier, request.loan_period, evaluations)?
            .ok_or(DecisionError::NoValidLoan)
    }

    /// Walk periods upward from the request and, within each period, amounts
    /// downward from the maximum. The first approvable pair wins.
    fn search(
        &self,
        modifier: u32,
        requested_period: i32,
        evaluations: &mut usize,
    ) -> Result<Option<LoanOffer>, DecisionError> {
        let config = &self.config;
        let step = usize::try_from(config.amount_step).map_err(|_| {
            DecisionError::unclassified(format!(
                "amount step {} cannot drive the offer search",
                config.amount_step
            ))
        })?;

        for period in requested_period..=config.max_period {
            for amount in (config.min_amount..=config.max_amount).rev().step_by(step) {
                *evaluations += 1;
                let score = credit_score(modifier, amount, period, config.score_divisor);
                if is_approvable(score, config.min_credit_score) {
                    return Ok(Some(LoanOffer {
                        loan_amount: amount,
                        loan_period: period,
                    }));
                }
            }
        }

        Ok(None)
    }
}
