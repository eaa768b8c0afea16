//! HTTP error mapping

use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use sunops_common::{LedgerError, PremissaError, PricingError, SunOpsError};
use tracing::error;

/// Error returned by handlers, rendered as `{"detail": "..."}`
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    detail: &'a str,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }
}

fn status_for(err: &SunOpsError) -> StatusCode {
    match err {
        SunOpsError::Pricing(e) => match e {
            PricingError::NotFound(_) | PricingError::NoApplicablePremissa(_) => {
                StatusCode::NOT_FOUND
            }
            PricingError::PowerBelowRange { .. }
            | PricingError::PowerOutsideTiers { .. }
            | PricingError::UnknownRegion(_)
            | PricingError::Validation(_)
            | PricingError::Overflow => StatusCode::UNPROCESSABLE_ENTITY,
        },
        SunOpsError::Premissa(PremissaError::NotFound(_)) => StatusCode::NOT_FOUND,
        SunOpsError::Premissa(PremissaError::Invalid(_)) => StatusCode::UNPROCESSABLE_ENTITY,
        SunOpsError::Ledger(LedgerError::NotFound(_)) => StatusCode::NOT_FOUND,
        SunOpsError::Ledger(LedgerError::AlreadyPaid(_)) => StatusCode::BAD_REQUEST,
        SunOpsError::Ledger(LedgerError::Invalid(_)) | SunOpsError::Validation(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        SunOpsError::Storage(_)
        | SunOpsError::Config(_)
        | SunOpsError::Serialization(_)
        | SunOpsError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<SunOpsError> for ApiError {
    fn from(err: SunOpsError) -> Self {
        Self::new(status_for(&err), err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, detail = %self.detail, "Request failed");
        }
        (self.status, Json(ErrorBody { detail: &self.detail })).into_response()
    }
}

/// JSON body extractor whose rejections use the `detail` error shape
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (SunOpsError::from(PricingError::NotFound(1)), StatusCode::NOT_FOUND),
            (
                SunOpsError::from(PricingError::NoApplicablePremissa(
                    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                )),
                StatusCode::NOT_FOUND,
            ),
            (
                SunOpsError::from(PricingError::UnknownRegion("XX".into())),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                SunOpsError::from(PricingError::PowerOutsideTiers { power: dec!(25) }),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (SunOpsError::from(PricingError::Overflow), StatusCode::UNPROCESSABLE_ENTITY),
            (SunOpsError::validation("potencia_kw"), StatusCode::UNPROCESSABLE_ENTITY),
            (
                SunOpsError::from(PremissaError::Invalid("faixas".into())),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (SunOpsError::from(LedgerError::NotFound(9)), StatusCode::NOT_FOUND),
            (SunOpsError::from(LedgerError::AlreadyPaid(9)), StatusCode::BAD_REQUEST),
            (SunOpsError::Storage("disk".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status, expected);
        }
    }

    #[test]
    fn test_detail_carries_message() {
        let api = ApiError::from(SunOpsError::from(LedgerError::AlreadyPaid(4)));
        assert_eq!(api.detail, "Transação 4 já está paga");
    }
}
