use std::future::Future;

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use super::{EmployeeStore, StoreError};
use crate::models::employee::{Employee, NewEmployee};

#[derive(Clone)]
pub struct PgEmployeeStore {
    pool: PgPool,
}

impl PgEmployeeStore {
    pub fn new(pool: PgPool) -> Self {
        PgEmployeeStore { pool }
    }
}

impl EmployeeStore for PgEmployeeStore {
    fn create(
        &self,
        employee: NewEmployee,
    ) -> impl Future<Output = Result<Employee, StoreError>> + Send + '_ {
        async move {
            let employee = sqlx::query_as::<_, Employee>(
                "INSERT INTO employees (id, employee_id, name, email, phone, department, date_of_joining, role, created_at) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
                 RETURNING id, employee_id, name, email, phone, department, date_of_joining, role, created_at",
            )
            .bind(Uuid::new_v4())
            .bind(&employee.employee_id)
            .bind(&employee.name)
            .bind(&employee.email)
            .bind(&employee.phone)
            .bind(&employee.department)
            .bind(employee.date_of_joining)
            .bind(&employee.role)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await?;

            Ok(employee)
        }
    }
}
