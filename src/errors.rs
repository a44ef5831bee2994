use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use thiserror::Error;

use crate::domain::errors::DomainError;

/// HTTP-facing error. Every domain failure maps onto a status class plus a
/// machine-readable `code`, so clients can branch without parsing messages.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}")]
    BadRequest {
        code: &'static str,
        message: String,
    },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("{message}")]
    NotFound {
        code: &'static str,
        message: String,
    },

    #[error("{message}")]
    Conflict {
        code: &'static str,
        message: String,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(message: &str) -> Self {
        AppError::NotFound {
            code: "not_found",
            message: message.to_string(),
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::BadRequest { code, .. }
            | AppError::NotFound { code, .. }
            | AppError::Conflict { code, .. } => code,
            AppError::Unauthorized => "unauthorized",
            AppError::Internal(_) => "internal",
        }
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        let message = e.to_string();
        match e {
            DomainError::InvalidCart(_) => AppError::BadRequest {
                code: "invalid_cart",
                message,
            },
            DomainError::InvalidInput(_) => AppError::BadRequest {
                code: "invalid_input",
                message,
            },
            DomainError::CodeExpired => AppError::BadRequest {
                code: "code_expired",
                message,
            },
            DomainError::MinimumNotMet { .. } => AppError::BadRequest {
                code: "minimum_not_met",
                message,
            },
            DomainError::CodeNotFound => AppError::NotFound {
                code: "code_not_found",
                message,
            },
            DomainError::OrderNotFound => AppError::NotFound {
                code: "order_not_found",
                message,
            },
            DomainError::UsageLimitReached => AppError::Conflict {
                code: "usage_limit_reached",
                message,
            },
            DomainError::InvalidTransition { .. } => AppError::Conflict {
                code: "invalid_transition",
                message,
            },
            DomainError::InvalidState(_) => AppError::Conflict {
                code: "invalid_state",
                message,
            },
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<diesel::result::Error> for AppError {
    fn from(e: diesel::result::Error) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl From<r2d2::Error> for AppError {
    fn from(e: r2d2::Error) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            // Internal details stay in the logs, not the response body.
            AppError::Internal(msg) => {
                log::error!("internal error: {}", msg);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": message,
            "code": self.code(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use actix_web::ResponseError;

    use super::*;

    #[test]
    fn invalid_cart_maps_to_bad_request() {
        let err: AppError = DomainError::InvalidCart("cart is empty".to_string()).into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "invalid_cart");
    }

    #[test]
    fn order_not_found_maps_to_404() {
        let err: AppError = DomainError::OrderNotFound.into();
        assert_eq!(err.error_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(err.code(), "order_not_found");
    }

    #[test]
    fn invalid_transition_maps_to_conflict() {
        let err: AppError = DomainError::InvalidTransition {
            from: "completed".to_string(),
            to: "pending".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.code(), "invalid_transition");
    }

    #[test]
    fn usage_limit_maps_to_conflict() {
        let err: AppError = DomainError::UsageLimitReached.into();
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.code(), "usage_limit_reached");
    }

    #[test]
    fn internal_error_hides_details() {
        let err = AppError::Internal("connection refused".to_string());
        assert_eq!(
            err.error_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn unauthorized_maps_to_401() {
        assert_eq!(AppError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
    }
}
