//! Loan decision pipeline: personal code checks, eligibility gating, segment
//! classification and the offer search.

mod age;
pub mod domain;
pub mod engine;
pub mod error;
pub mod personal_code;
pub mod router;
pub(crate) mod scoring;
pub mod segment;
pub mod validator;

#[cfg(test)]
mod tests;

pub use age::{birth_date, derive_age};
pub use domain::{LoanOffer, LoanRequest};
pub use engine::{DecisionEngine, DecisionTrace};
pub use error::{AgeViolation, DecisionError, DecisionErrorKind};
pub use router::{decision_router, DecisionResponse};
pub use segment::{classify, Segment};
pub use validator::validate;
