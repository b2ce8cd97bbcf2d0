use axum::http::StatusCode;
use serde::Serialize;

/// Reason an applicant falls outside the lending age window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AgeViolation {
    #[error("Applicant is underage.")]
    Underage { age: i32, minimum: i32 },
    #[error("Applicant exceeds max age.")]
    ExceedsMaxAge { age: i32, maximum: i32 },
}

/// Terminal failure of a single loan decision. The `Display` text is the
/// message returned to the caller.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecisionError {
    #[error("Invalid personal ID code!")]
    InvalidPersonalCode,
    #[error("Unknown century indicator in personal code")]
    UnknownCentury { indicator: char },
    #[error("Invalid loan amount!")]
    InvalidLoanAmount { requested: i64 },
    #[error("Invalid loan period!")]
    InvalidLoanPeriod { requested: i32 },
    #[error(transparent)]
    InvalidAge(#[from] AgeViolation),
    #[error("No valid loan found!")]
    NoValidLoan,
    /// Detail stays in the logs; callers only see the generic message.
    #[error("An unexpected error occurred")]
    Unclassified { detail: String },
}

impl DecisionError {
    pub fn unclassified(detail: impl Into<String>) -> Self {
        Self::Unclassified {
            detail: detail.into(),
        }
    }

    pub fn kind(&self) -> DecisionErrorKind {
        match self {
            DecisionError::InvalidPersonalCode | DecisionError::UnknownCentury { .. } => {
                DecisionErrorKind::InvalidPersonalCode
            }
            DecisionError::InvalidLoanAmount { .. } => DecisionErrorKind::InvalidLoanAmount,
            DecisionError::InvalidLoanPeriod { .. } => DecisionErrorKind::InvalidLoanPeriod,
            DecisionError::InvalidAge(_) => DecisionErrorKind::InvalidAge,
            DecisionError::NoValidLoan => DecisionErrorKind::NoValidLoan,
            DecisionError::Unclassified { .. } => DecisionErrorKind::Unclassified,
        }
    }
}

/// Closed classification of decision failures used for transport mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionErrorKind {
    InvalidPersonalCode,
    InvalidLoanAmount,
    InvalidLoanPeriod,
    InvalidAge,
    NoValidLoan,
    Unclassified,
}

impl DecisionErrorKind {
    /// The one place failure kinds are translated into HTTP statuses.
    pub fn status_code(self) -> StatusCode {
        match self {
            DecisionErrorKind::InvalidPersonalCode
            | DecisionErrorKind::InvalidLoanAmount
            | DecisionErrorKind::InvalidLoanPeriod
            | DecisionErrorKind::InvalidAge => StatusCode::BAD_REQUEST,
            DecisionErrorKind::NoValidLoan => StatusCode::NOT_FOUND,
            DecisionErrorKind::Unclassified => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
