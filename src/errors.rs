use actix_web::HttpResponse;
use thiserror::Error;

use crate::domain::errors::DomainError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    BadGateway(String),

    #[error("Not found")]
    NotFound,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(_)
            | DomainError::InvalidCoupon
            | DomainError::CouponNotEligible
            | DomainError::CouponNotRedeemable
            | DomainError::InvalidTransition(_) => AppError::BadRequest(e.to_string()),
            DomainError::AddressResolution(_) => AppError::BadGateway(e.to_string()),
            DomainError::NotFound => AppError::NotFound,
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::BadRequest(msg) => HttpResponse::BadRequest().json(serde_json::json!({
                "error": msg
            })),
            AppError::BadGateway(msg) => HttpResponse::BadGateway().json(serde_json::json!({
                "error": msg
            })),
            AppError::NotFound => HttpResponse::NotFound().json(serde_json::json!({
                "error": self.to_string()
            })),
            AppError::Internal(msg) => {
                // Full detail stays server-side.
                log::error!("internal error: {}", msg);
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": "Internal server error"
                }))
            }
        }
    }
}
