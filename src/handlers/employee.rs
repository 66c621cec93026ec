use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::db::{EmployeeStore, StoreError};
use crate::errors::AppError;
use crate::models::employee::Employee;
use crate::utils::validation::{self, Tier};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreatedEmployee {
    message: &'static str,
    new_employee: Employee,
}

#[derive(Deserialize)]
pub struct SchemaQueryParams {
    tier: Option<Tier>,
}

/// Validates a raw payload against the server tier and inserts it.
pub async fn register_employee<S: EmployeeStore>(
    store: &S,
    raw: &Value,
    now: DateTime<Utc>,
) -> Result<Employee, AppError> {
    let new_employee = validation::validate_employee(raw, now)?;

    store.create(new_employee).await.map_err(|err| match err {
        StoreError::Conflict { constraint } => {
            warn!(
                "Rejected duplicate employee (constraint: {})",
                constraint.as_deref().unwrap_or("unknown")
            );
            AppError::Conflict
        }
        StoreError::Database(err) => {
            error!("Failed to insert employee: {}", err);
            AppError::InternalServerError(err.to_string())
        }
    })
}

pub async fn create_employee<S: EmployeeStore>(
    store: web::Data<S>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let employee = register_employee(store.get_ref(), &payload, Utc::now()).await?;
    info!("Created employee {}", employee.employee_id);

    Ok(HttpResponse::Created().json(CreatedEmployee {
        message: "Employee added successfully",
        new_employee: employee,
    }))
}

pub async fn get_form_schema(query: web::Query<SchemaQueryParams>) -> HttpResponse {
    let tier = query.tier.unwrap_or(Tier::Client);
    HttpResponse::Ok().json(validation::form_schema(tier))
}
