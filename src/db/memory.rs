//! Stores used by the HTTP tests in place of PostgreSQL.

use std::future::{self, Future};
use std::sync::Mutex;

use chrono::Utc;
use uuid::Uuid;

use super::{EmployeeStore, StoreError};
use crate::models::employee::{Employee, NewEmployee};

/// Keeps rows in memory and enforces the same unique keys as the table.
#[derive(Default)]
pub struct MemoryEmployeeStore {
    rows: Mutex<Vec<Employee>>,
}

impl MemoryEmployeeStore {
    pub fn row_count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    fn insert(&self, employee: NewEmployee) -> Result<Employee, StoreError> {
        let mut rows = self.rows.lock().unwrap();

        let constraint = if rows.iter().any(|row| row.employee_id == employee.employee_id) {
            Some("employees_employee_id_key")
        } else if rows.iter().any(|row| row.email == employee.email) {
            Some("employees_email_key")
        } else {
            None
        };
        if let Some(constraint) = constraint {
            return Err(StoreError::Conflict { constraint: Some(constraint.to_string()) });
        }

        let row = Employee {
            id: Uuid::new_v4(),
            employee_id: employee.employee_id,
            name: employee.name,
            email: employee.email,
            phone: employee.phone,
            department: employee.department,
            date_of_joining: employee.date_of_joining,
            role: employee.role,
            created_at: Utc::now(),
        };
        rows.push(row.clone());
        Ok(row)
    }
}

impl EmployeeStore for MemoryEmployeeStore {
    fn create(
        &self,
        employee: NewEmployee,
    ) -> impl Future<Output = Result<Employee, StoreError>> + Send + '_ {
        future::ready(self.insert(employee))
    }
}

/// Behaves like a database whose pool never hands out a connection.
pub struct UnavailableStore;

impl EmployeeStore for UnavailableStore {
    fn create(
        &self,
        _employee: NewEmployee,
    ) -> impl Future<Output = Result<Employee, StoreError>> + Send + '_ {
        future::ready(Err(StoreError::Database(sqlx::Error::PoolTimedOut)))
    }
}
