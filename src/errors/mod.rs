use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;
use validator::ValidationErrors;

use crate::utils::validation::{self, FieldViolation};

pub const DUPLICATE_MESSAGE: &str = "Duplicate entry detected. Check EmployeeId or Email.";
pub const INTERNAL_MESSAGE: &str = "Internal Server Error";

#[derive(Debug)]
pub enum AppError {
    Validation(Vec<FieldViolation>),
    /// The request body exceeded the JSON extractor's limit, in bytes.
    PayloadTooLarge(usize),
    Conflict,
    /// The detail is for the server log only and never reaches the client.
    InternalServerError(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
}

#[derive(Serialize)]
struct ValidationResponse<'a> {
    errors: &'a [FieldViolation],
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(violations) => write!(f, "Validation failed: {} violation(s)", violations.len()),
            AppError::PayloadTooLarge(limit) => write!(f, "Payload Too Large: limit is {} bytes", limit),
            AppError::Conflict => write!(f, "Conflict: {}", DUPLICATE_MESSAGE),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(validation::violations(&errors))
    }
}

impl ResponseError for AppError {
    // Duplicates are reported as 400, not 409, to keep the existing client contract.
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Conflict => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Validation(violations) => HttpResponse::BadRequest().json(ValidationResponse { errors: violations }),
            AppError::PayloadTooLarge(limit) => HttpResponse::PayloadTooLarge().json(ValidationResponse {
                errors: &[FieldViolation::body(
                    "payload_too_large",
                    format!("Request body exceeds the {} byte limit", limit),
                )],
            }),
            AppError::Conflict => HttpResponse::BadRequest().json(ErrorResponse { error: DUPLICATE_MESSAGE }),
            AppError::InternalServerError(_) => HttpResponse::InternalServerError().json(ErrorResponse { error: INTERNAL_MESSAGE }),
        }
    }
}
