use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};

/// A persisted employee record, as returned to API callers.
#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: Uuid,
    pub employee_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub date_of_joining: DateTime<Utc>,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// A payload that passed server-side validation, with the joining date
/// already converted to its storage representation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEmployee {
    pub employee_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub date_of_joining: DateTime<Utc>,
    pub role: String,
}
