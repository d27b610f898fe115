//! Employee DTOs for API requests and responses.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use jiff::civil::Date;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::models::{
    EmployeeCandidate, EmployeeChanges, EmployeeDetail, EmployeeStatistics, EmployeeStatus, Gender,
};

static CCCD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{12}$").expect("valid CCCD pattern"));

static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9][0-9 \-]*$").expect("valid phone pattern"));

fn validate_cccd(value: &str) -> Result<(), ValidationError> {
    if CCCD_REGEX.is_match(value) {
        return Ok(());
    }
    Err(ValidationError::new("cccd").with_message(Cow::Borrowed("CCCD must be exactly 12 digits")))
}

fn validate_fullname(value: &str) -> Result<(), ValidationError> {
    let name = value.trim();
    if name.is_empty() {
        return Err(ValidationError::new("required")
            .with_message(Cow::Borrowed("Full name is required")));
    }
    if name.chars().count() > 100 {
        return Err(ValidationError::new("length")
            .with_message(Cow::Borrowed("Full name must not exceed 100 characters")));
    }
    Ok(())
}

// Empty phone strings are treated as absent by the conversions below
fn validate_phone(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || PHONE_REGEX.is_match(value) {
        return Ok(());
    }
    Err(ValidationError::new("phone").with_message(Cow::Borrowed("Invalid phone number")))
}

/// `Some("")` and whitespace-only strings become `None`
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ============================================================================
// Request DTOs
// ============================================================================

/// Request body for creating an employee.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeRequest {
    #[validate(custom(function = "validate_fullname"))]
    #[schema(example = "Nguyen Van A", max_length = 100)]
    pub fullname: String,

    #[validate(custom(function = "validate_cccd"))]
    #[schema(example = "079000000001", pattern = r"^\d{12}$")]
    pub cccd: String,

    #[validate(length(max = 13, message = "Tax code must not exceed 13 characters"))]
    #[schema(max_length = 13)]
    pub tax_code: Option<String>,

    #[validate(
        length(max = 15, message = "Phone number must not exceed 15 characters"),
        custom(function = "validate_phone")
    )]
    #[schema(example = "0901234567", max_length = 15)]
    pub phone: Option<String>,

    pub address: Option<String>,

    #[validate(length(max = 50, message = "Bank account must not exceed 50 characters"))]
    #[schema(max_length = 50)]
    pub bank_account: Option<String>,

    #[schema(value_type = String, format = Date, example = "2024-01-15")]
    pub join_date: Date,

    #[schema(value_type = Option<String>, format = Date)]
    pub birthday: Option<Date>,

    pub gender: Option<Gender>,

    #[validate(
        email(message = "Invalid email address"),
        length(max = 100, message = "Email must not exceed 100 characters")
    )]
    #[schema(format = "email", example = "a@x.com", max_length = 100)]
    pub email: String,

    /// Omitted or 0 selects the default employee role
    #[validate(range(min = 0, message = "Role ID must not be negative"))]
    #[schema(minimum = 0)]
    pub role_id: Option<i32>,

    #[validate(range(min = 1, message = "Department ID must be at least 1"))]
    #[schema(minimum = 1)]
    pub department_id: Option<i32>,
}

impl CreateEmployeeRequest {
    /// Converts the request DTO into the service's creation input.
    pub fn into_candidate(self) -> EmployeeCandidate {
        EmployeeCandidate {
            fullname: self.fullname.trim().to_string(),
            cccd: self.cccd,
            tax_code: non_blank(self.tax_code),
            phone: non_blank(self.phone),
            address: non_blank(self.address),
            bank_account: non_blank(self.bank_account),
            join_date: self.join_date,
            birthday: self.birthday,
            gender: self.gender,
            email: self.email,
            role_id: self.role_id,
            department_id: self.department_id,
        }
    }
}

/// Request body for updating an employee. Omitted fields stay unchanged.
#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeRequest {
    #[validate(custom(function = "validate_fullname"))]
    #[schema(max_length = 100)]
    pub fullname: Option<String>,

    #[validate(
        length(max = 15, message = "Phone number must not exceed 15 characters"),
        custom(function = "validate_phone")
    )]
    #[schema(max_length = 15)]
    pub phone: Option<String>,

    pub address: Option<String>,

    #[validate(length(max = 50, message = "Bank account must not exceed 50 characters"))]
    #[schema(max_length = 50)]
    pub bank_account: Option<String>,

    pub status: Option<EmployeeStatus>,

    #[schema(value_type = Option<String>, format = Date)]
    pub birthday: Option<Date>,

    pub gender: Option<Gender>,

    #[validate(range(min = 1, message = "Department ID must be at least 1"))]
    #[schema(minimum = 1)]
    pub department_id: Option<i32>,
}

impl UpdateEmployeeRequest {
    /// Converts the request DTO into a partial update.
    pub fn into_changes(self) -> EmployeeChanges {
        EmployeeChanges {
            fullname: self.fullname.map(|name| name.trim().to_string()),
            phone: non_blank(self.phone),
            address: non_blank(self.address),
            bank_account: non_blank(self.bank_account),
            status: self.status,
            birthday: self.birthday,
            gender: self.gender,
            department_id: self.department_id,
        }
    }
}

// ============================================================================
// Response DTOs
// ============================================================================

/// Row of the paged employee list.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeListItem {
    pub id: i32,
    pub fullname: String,
    pub email: String,
    pub phone: Option<String>,
    pub status: Option<EmployeeStatus>,
    #[schema(value_type = String, format = Date)]
    pub join_date: Date,
    pub role_name: Option<String>,
    pub department_name: Option<String>,
}

impl From<EmployeeDetail> for EmployeeListItem {
    fn from(detail: EmployeeDetail) -> Self {
        let employee = detail.employee;
        Self {
            id: employee.id,
            fullname: employee.fullname,
            email: employee.email,
            phone: employee.phone,
            status: employee.status,
            join_date: employee.join_date.to_jiff(),
            role_name: detail.role_name,
            department_name: detail.department_name,
        }
    }
}

/// Full employee record with role and department names flattened in.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeResponse {
    pub id: i32,
    pub fullname: String,
    pub cccd: String,
    pub tax_code: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub bank_account: Option<String>,
    #[schema(value_type = String, format = Date)]
    pub join_date: Date,
    pub status: Option<EmployeeStatus>,
    #[schema(value_type = Option<String>, format = Date)]
    pub birthday: Option<Date>,
    pub gender: Option<Gender>,
    pub email: String,
    pub role_id: i32,
    pub role_name: Option<String>,
    pub department_id: Option<i32>,
    pub department_name: Option<String>,
    #[schema(value_type = Option<String>, format = DateTime)]
    pub created_at: Option<jiff::Timestamp>,
    #[schema(value_type = Option<String>, format = DateTime)]
    pub updated_at: Option<jiff::Timestamp>,
}

impl From<EmployeeDetail> for EmployeeResponse {
    fn from(detail: EmployeeDetail) -> Self {
        let employee = detail.employee;
        Self {
            id: employee.id,
            fullname: employee.fullname,
            cccd: employee.cccd,
            tax_code: employee.tax_code,
            phone: employee.phone,
            address: employee.address,
            bank_account: employee.bank_account,
            join_date: employee.join_date.to_jiff(),
            status: employee.status,
            birthday: employee.birthday.map(|d| d.to_jiff()),
            gender: employee.gender,
            email: employee.email,
            role_id: employee.role_id,
            role_name: detail.role_name,
            department_id: employee.department_id,
            department_name: detail.department_name,
            created_at: employee.created_at.map(|t| t.to_jiff()),
            updated_at: employee.updated_at.map(|t| t.to_jiff()),
        }
    }
}

/// Workforce summary.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "totalEmployees": 3,
    "activeEmployees": 2,
    "inactiveEmployees": 1,
    "byStatus": { "active": 2, "inactive": 1 },
    "byDepartment": { "Engineering": 2, "No Department": 1 }
}))]
pub struct StatisticsResponse {
    pub total_employees: i64,
    pub active_employees: i64,
    pub inactive_employees: i64,
    pub by_status: BTreeMap<String, i64>,
    pub by_department: BTreeMap<String, i64>,
}

impl From<EmployeeStatistics> for StatisticsResponse {
    fn from(stats: EmployeeStatistics) -> Self {
        Self {
            total_employees: stats.total,
            active_employees: stats.active,
            inactive_employees: stats.inactive,
            by_status: stats.by_status,
            by_department: stats.by_department,
        }
    }
}
