//! Employee models for database operations.
//!
//! Besides the Diesel row types this module holds the typed inputs the
//! service works with: [`EmployeeCandidate`] for creation, [`EmployeeChanges`]
//! for partial updates and [`EmployeeFilter`] for paged listing.

use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

use diesel::AsExpression;
use diesel::FromSqlRow;
use diesel::deserialize::{self, FromSql};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::serialize::{self, Output, ToSql};
use diesel::sql_types::Text;
use jiff::civil::Date;
use jiff_diesel::ToDiesel;
use serde::{Deserialize, Serialize};

// ============================================================================
// Enums
// ============================================================================

/// Lifecycle status of an employee
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    utoipa::ToSchema,
    AsExpression,
    FromSqlRow,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "lowercase")]
pub enum EmployeeStatus {
    Active,
    Inactive,
    Suspended,
}

impl EmployeeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeStatus::Active => "active",
            EmployeeStatus::Inactive => "inactive",
            EmployeeStatus::Suspended => "suspended",
        }
    }
}

impl fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmployeeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(EmployeeStatus::Active),
            "inactive" => Ok(EmployeeStatus::Inactive),
            "suspended" => Ok(EmployeeStatus::Suspended),
            _ => Err(format!("Unrecognized employee status: {}", s)),
        }
    }
}

impl diesel::query_builder::QueryId for EmployeeStatus {
    type QueryId = EmployeeStatus;
    const HAS_STATIC_QUERY_ID: bool = false;
}

impl ToSql<Text, Pg> for EmployeeStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<Text, Pg> for EmployeeStatus {
    fn from_sql(
        bytes: <Pg as diesel::backend::Backend>::RawValue<'_>,
    ) -> deserialize::Result<Self> {
        let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
        s.parse::<EmployeeStatus>().map_err(Into::into)
    }
}

/// Gender of an employee
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    utoipa::ToSchema,
    AsExpression,
    FromSqlRow,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            _ => Err(format!("Unrecognized gender: {}", s)),
        }
    }
}

impl diesel::query_builder::QueryId for Gender {
    type QueryId = Gender;
    const HAS_STATIC_QUERY_ID: bool = false;
}

impl ToSql<Text, Pg> for Gender {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<Text, Pg> for Gender {
    fn from_sql(
        bytes: <Pg as diesel::backend::Backend>::RawValue<'_>,
    ) -> deserialize::Result<Self> {
        let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
        s.parse::<Gender>().map_err(Into::into)
    }
}

// ============================================================================
// Employee Models (Query/Insert/Update)
// ============================================================================

/// Employee query model for SELECT operations.
///
/// Also used as the changeset for full updates: `None` fields are written
/// as NULL.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, AsChangeset)]
#[diesel(table_name = crate::schema::employee)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct Employee {
    pub id: i32,
    pub fullname: String,
    pub cccd: String,
    pub tax_code: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub bank_account: Option<String>,
    pub join_date: jiff_diesel::Date,
    pub status: Option<EmployeeStatus>,
    pub birthday: Option<jiff_diesel::Date>,
    pub gender: Option<Gender>,
    pub email: String,
    pub role_id: i32,
    pub department_id: Option<i32>,
    pub created_at: Option<jiff_diesel::Timestamp>,
    pub updated_at: Option<jiff_diesel::Timestamp>,
}

impl Employee {
    /// Refresh `updated_at` to the current time
    pub fn touch(&mut self) {
        self.updated_at = Some(jiff::Timestamp::now().to_diesel());
    }
}

/// NewEmployee insert model for INSERT operations
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::employee)]
pub struct NewEmployee {
    pub fullname: String,
    pub cccd: String,
    pub tax_code: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub bank_account: Option<String>,
    pub join_date: jiff_diesel::Date,
    pub status: EmployeeStatus,
    pub birthday: Option<jiff_diesel::Date>,
    pub gender: Option<Gender>,
    pub email: String,
    pub role_id: i32,
    pub department_id: Option<i32>,
    pub created_at: jiff_diesel::Timestamp,
    pub updated_at: jiff_diesel::Timestamp,
}

/// Detail projection: an employee with its role and department names
/// flattened in.
#[derive(Debug, Clone)]
pub struct EmployeeDetail {
    pub employee: Employee,
    pub role_name: Option<String>,
    pub department_name: Option<String>,
}

impl From<(Employee, Option<String>, Option<String>)> for EmployeeDetail {
    fn from((employee, role_name, department_name): (Employee, Option<String>, Option<String>)) -> Self {
        Self {
            employee,
            role_name,
            department_name,
        }
    }
}

// ============================================================================
// Service Inputs
// ============================================================================

/// Validated input for creating an employee.
///
/// `role_id` of `None` or `Some(0)` selects the configured default role.
#[derive(Debug, Clone)]
pub struct EmployeeCandidate {
    pub fullname: String,
    pub cccd: String,
    pub tax_code: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub bank_account: Option<String>,
    pub join_date: Date,
    pub birthday: Option<Date>,
    pub gender: Option<Gender>,
    pub email: String,
    pub role_id: Option<i32>,
    pub department_id: Option<i32>,
}

impl EmployeeCandidate {
    /// Build the insert row with a resolved role, `active` status and both
    /// timestamps set to `now`.
    pub fn into_new_employee(self, role_id: i32, now: jiff::Timestamp) -> NewEmployee {
        let now = now.to_diesel();
        NewEmployee {
            fullname: self.fullname,
            cccd: self.cccd,
            tax_code: self.tax_code,
            phone: self.phone,
            address: self.address,
            bank_account: self.bank_account,
            join_date: self.join_date.to_diesel(),
            status: EmployeeStatus::Active,
            birthday: self.birthday.map(|d| d.to_diesel()),
            gender: self.gender,
            email: self.email,
            role_id,
            department_id: self.department_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update of an employee. Absent fields leave the stored value alone.
///
/// Email, CCCD, tax code, role and join date are not part of this type and
/// therefore never change through an update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeeChanges {
    pub fullname: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub bank_account: Option<String>,
    pub status: Option<EmployeeStatus>,
    pub birthday: Option<Date>,
    pub gender: Option<Gender>,
    pub department_id: Option<i32>,
}

impl EmployeeChanges {
    /// Copy every present field onto `target`
    pub fn apply_to(&self, target: &mut Employee) {
        if let Some(fullname) = &self.fullname {
            target.fullname = fullname.clone();
        }
        if let Some(phone) = &self.phone {
            target.phone = Some(phone.clone());
        }
        if let Some(address) = &self.address {
            target.address = Some(address.clone());
        }
        if let Some(bank_account) = &self.bank_account {
            target.bank_account = Some(bank_account.clone());
        }
        if let Some(status) = self.status {
            target.status = Some(status);
        }
        if let Some(birthday) = self.birthday {
            target.birthday = Some(birthday.to_diesel());
        }
        if let Some(gender) = self.gender {
            target.gender = Some(gender);
        }
        if let Some(department_id) = self.department_id {
            target.department_id = Some(department_id);
        }
    }
}

/// Optional criteria for paged listing. Every present field narrows the result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeeFilter {
    /// Case-insensitive substring matched against fullname, email, phone and CCCD
    pub search: Option<String>,
    pub status: Option<EmployeeStatus>,
    pub department_id: Option<i32>,
    pub role_id: Option<i32>,
}

impl EmployeeFilter {
    /// The search term with surrounding whitespace removed, if anything is left
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }
}

/// Listing request: raw paging values plus the filter
///
/// Paging values are clamped by the service, so out-of-range input is accepted here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeeQuery {
    pub page_number: Option<i64>,
    pub page_size: Option<i64>,
    pub filter: EmployeeFilter,
}

/// Read-only summary of the employee population
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeStatistics {
    pub total: i64,
    pub active: i64,
    pub inactive: i64,
    pub by_status: BTreeMap<String, i64>,
    pub by_department: BTreeMap<String, i64>,
}

/// Label for employees whose status is NULL
pub const UNKNOWN_STATUS_LABEL: &str = "unknown";

/// Label for employees without a department
pub const NO_DEPARTMENT_LABEL: &str = "No Department";

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;
    use proptest::prelude::*;

    fn employee() -> Employee {
        Employee {
            id: 7,
            fullname: "Nguyen Van A".to_string(),
            cccd: "079000000001".to_string(),
            tax_code: Some("0101234567".to_string()),
            phone: Some("0901234567".to_string()),
            address: Some("Old street".to_string()),
            bank_account: None,
            join_date: date(2024, 1, 15).to_diesel(),
            status: Some(EmployeeStatus::Active),
            birthday: None,
            gender: Some(Gender::Male),
            email: "a@x.com".to_string(),
            role_id: 4,
            department_id: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn snapshot(e: &Employee) -> String {
        format!(
            "{}|{}|{}|{:?}|{:?}|{:?}|{:?}|{}|{:?}|{:?}|{:?}|{}|{}|{:?}",
            e.id,
            e.fullname,
            e.cccd,
            e.tax_code,
            e.phone,
            e.address,
            e.bank_account,
            e.join_date.to_jiff(),
            e.status,
            e.birthday.map(|d| d.to_jiff()),
            e.gender,
            e.email,
            e.role_id,
            e.department_id,
        )
    }

    #[test]
    fn test_status_round_trip_through_str() {
        for status in [
            EmployeeStatus::Active,
            EmployeeStatus::Inactive,
            EmployeeStatus::Suspended,
        ] {
            assert_eq!(status.as_str().parse::<EmployeeStatus>(), Ok(status));
        }
        assert!("retired".parse::<EmployeeStatus>().is_err());
    }

    #[test]
    fn test_gender_serde_is_lowercase() {
        let json = serde_json::to_string(&Gender::Female).unwrap();
        assert_eq!(json, "\"female\"");
        let parsed: Gender = serde_json::from_str("\"other\"").unwrap();
        assert_eq!(parsed, Gender::Other);
    }

    #[test]
    fn test_apply_changes_leaves_omitted_fields() {
        let mut target = employee();
        let before = employee();
        let changes = EmployeeChanges {
            address: Some("X".to_string()),
            ..Default::default()
        };

        changes.apply_to(&mut target);

        assert_eq!(target.address.as_deref(), Some("X"));
        assert_eq!(target.fullname, before.fullname);
        assert_eq!(target.phone, before.phone);
        assert_eq!(target.email, before.email);
        assert_eq!(target.cccd, before.cccd);
        assert_eq!(target.role_id, before.role_id);
    }

    #[test]
    fn test_candidate_forces_active_status() {
        let candidate = EmployeeCandidate {
            fullname: "B".to_string(),
            cccd: "079000000002".to_string(),
            tax_code: None,
            phone: None,
            address: None,
            bank_account: None,
            join_date: date(2024, 3, 1),
            birthday: Some(date(1990, 5, 20)),
            gender: None,
            email: "b@x.com".to_string(),
            role_id: Some(0),
            department_id: None,
        };
        let now = jiff::Timestamp::from_second(1_700_000_000).unwrap();

        let row = candidate.into_new_employee(4, now);

        assert_eq!(row.status, EmployeeStatus::Active);
        assert_eq!(row.role_id, 4);
        assert_eq!(row.created_at.to_jiff(), now);
        assert_eq!(row.updated_at.to_jiff(), now);
        assert_eq!(row.birthday.map(|d| d.to_jiff()), Some(date(1990, 5, 20)));
    }

    #[test]
    fn test_search_term_ignores_blank() {
        let filter = EmployeeFilter {
            search: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.search_term(), None);

        let filter = EmployeeFilter {
            search: Some("  an ".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.search_term(), Some("an"));
    }

    fn status_strategy() -> impl Strategy<Value = Option<EmployeeStatus>> {
        prop_oneof![
            Just(None),
            Just(Some(EmployeeStatus::Active)),
            Just(Some(EmployeeStatus::Inactive)),
            Just(Some(EmployeeStatus::Suspended)),
        ]
    }

    proptest! {
        #[test]
        fn prop_apply_changes_is_idempotent(
            fullname in proptest::option::of("[A-Za-z ]{1,20}"),
            phone in proptest::option::of("[0-9]{9,12}"),
            address in proptest::option::of(".{0,30}"),
            status in status_strategy(),
            department_id in proptest::option::of(1i32..50),
        ) {
            let changes = EmployeeChanges {
                fullname,
                phone,
                address,
                status,
                department_id,
                ..Default::default()
            };

            let mut once = employee();
            changes.apply_to(&mut once);
            let mut twice = employee();
            changes.apply_to(&mut twice);
            changes.apply_to(&mut twice);

            prop_assert_eq!(snapshot(&once), snapshot(&twice));
        }
    }
}
