pub mod employee;

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::web;

use crate::db::EmployeeStore;
use crate::errors::AppError;
use crate::utils::validation::{FieldViolation, QUERY_FIELD};

fn json_error(err: JsonPayloadError) -> AppError {
    match err {
        JsonPayloadError::OverflowKnownLength { limit, .. } | JsonPayloadError::Overflow { limit } => {
            AppError::PayloadTooLarge(limit)
        }
        other => AppError::Validation(vec![FieldViolation::body("invalid_json", other.to_string())]),
    }
}

fn query_error(err: QueryPayloadError) -> AppError {
    AppError::Validation(vec![FieldViolation::new(QUERY_FIELD, "invalid_query", err.to_string())])
}

/// Registers the employee routes against a concrete store type.
pub fn configure<S: EmployeeStore>(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| json_error(err).into()))
        .app_data(web::QueryConfig::default().error_handler(|err, _req| query_error(err).into()))
        .service(
            web::resource("/api/employees")
                .route(web::post().to(employee::create_employee::<S>)),
        )
        .service(
            web::resource("/api/employees/schema")
                .route(web::get().to(employee::get_form_schema)),
        );
}
