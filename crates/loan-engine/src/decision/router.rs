use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use super::domain::{LoanOffer, LoanRequest};
use super::engine::DecisionEngine;
use super::error::DecisionError;

/// Body returned by the decision endpoint for both approvals and rejections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionResponse {
    pub loan_amount: Option<i64>,
    pub loan_period: Option<i32>,
    pub error_message: Option<String>,
}

impl DecisionResponse {
    pub fn approved(offer: LoanOffer) -> Self {
        Self {
            loan_amount: Some(offer.loan_amount),
            loan_period: Some(offer.loan_period),
            error_message: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            loan_amount: None,
            loan_period: None,
            error_message: Some(message.into()),
        }
    }
}

impl From<&DecisionError> for DecisionResponse {
    fn from(err: &DecisionError) -> Self {
        Self::rejected(err.to_string())
    }
}

/// Router builder exposing the loan decision endpoint.
pub fn decision_router(engine: Arc<DecisionEngine>) -> Router {
    Router::new()
        .route("/loan/decision", post(decision_handler))
        .with_state(engine)
}

pub(crate) async fn decision_handler(
    State(engine): State<Arc<DecisionEngine>>,
    payload: Result<Json<LoanRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!(error = %rejection, "malformed decision request");
            let body = DecisionResponse::rejected("Invalid request");
            return (StatusCode::BAD_REQUEST, Json(body)).into_response();
        }
    };

    match engine.decide(&request) {
        Ok(offer) => (StatusCode::OK, Json(DecisionResponse::approved(offer))).into_response(),
        Err(err) => rejection_response(&err),
    }
}

fn rejection_response(err: &DecisionError) -> Response {
    if let DecisionError::Unclassified { detail } = err {
        error!(%detail, "loan decision failed unexpectedly");
    }

    let status = err.kind().status_code();
    (status, Json(DecisionResponse::from(err))).into_response()
}
