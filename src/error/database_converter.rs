use crate::error::{AppError, ConstraintParser};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// Utility for converting database errors to structured AppError variants.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    /// Converts a Diesel error to an appropriate AppError variant.
    ///
    /// # Arguments
    /// * `error` - The Diesel error to convert
    /// * `operation` - Description of the database operation that failed
    ///
    /// # Returns
    /// An AppError variant appropriate for the type of database error
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::DatabaseError(kind, info) => {
                Self::convert_database_error(kind, info.as_ref(), operation)
            }
            DieselError::NotFound => AppError::NotFound {
                entity: "resource".to_string(),
                field: "id".to_string(),
                value: "unknown".to_string(),
            },
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }

    /// Converts a database error with detailed constraint information.
    ///
    /// The PostgreSQL DETAIL line (`Key (email)=(...) already exists.`) is
    /// reported separately from the primary message, so both are joined
    /// before parsing.
    fn convert_database_error(
        kind: DatabaseErrorKind,
        info: &(dyn DatabaseErrorInformation + Send + Sync),
        operation: &str,
    ) -> AppError {
        let message = match info.details() {
            Some(details) => format!("{}\n{}", info.message(), details),
            None => info.message().to_string(),
        };
        let constraint_name = info.constraint_name();

        let parsed = match kind {
            DatabaseErrorKind::UniqueViolation => {
                ConstraintParser::parse_unique_violation(&message, constraint_name).map(
                    |(entity, field, value)| AppError::Duplicate {
                        entity,
                        field,
                        value,
                    },
                )
            }
            DatabaseErrorKind::NotNullViolation => {
                ConstraintParser::parse_not_null_violation(&message, constraint_name).map(
                    |(entity, field)| AppError::Validation {
                        field,
                        reason: format!("Field is required for {}", entity),
                    },
                )
            }
            DatabaseErrorKind::ForeignKeyViolation => {
                ConstraintParser::parse_foreign_key_violation(&message, constraint_name).map(
                    |(entity, field, referenced_value)| AppError::Validation {
                        field,
                        reason: format!(
                            "Invalid reference from {} with value '{}'",
                            entity, referenced_value
                        ),
                    },
                )
            }
            DatabaseErrorKind::CheckViolation => {
                ConstraintParser::parse_check_violation(&message, constraint_name).map(
                    |(entity, field)| AppError::Validation {
                        field,
                        reason: format!("Check constraint failed for {} field", entity),
                    },
                )
            }
            _ => None,
        };

        parsed.unwrap_or_else(|| AppError::Database {
            operation: operation.to_string(),
            source: anyhow::Error::msg(format!("{:?}: {}", kind, message)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockDatabaseErrorInfo {
        message: String,
        details: Option<String>,
        constraint_name: Option<String>,
    }

    impl DatabaseErrorInformation for MockDatabaseErrorInfo {
        fn message(&self) -> &str {
            &self.message
        }

        fn details(&self) -> Option<&str> {
            self.details.as_deref()
        }

        fn hint(&self) -> Option<&str> {
            None
        }

        fn table_name(&self) -> Option<&str> {
            None
        }

        fn column_name(&self) -> Option<&str> {
            None
        }

        fn constraint_name(&self) -> Option<&str> {
            self.constraint_name.as_deref()
        }

        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn db_error(kind: DatabaseErrorKind, message: &str, details: Option<&str>, constraint: Option<&str>) -> DieselError {
        DieselError::DatabaseError(
            kind,
            Box::new(MockDatabaseErrorInfo {
                message: message.to_string(),
                details: details.map(str::to_string),
                constraint_name: constraint.map(str::to_string),
            }),
        )
    }

    #[test]
    fn test_unique_violation_reads_detail_line() {
        let error = db_error(
            DatabaseErrorKind::UniqueViolation,
            "duplicate key value violates unique constraint \"employee_email_key\"",
            Some("Key (email)=(a@x.com) already exists."),
            Some("employee_email_key"),
        );

        match DatabaseErrorConverter::convert_diesel_error(error, "insert employee") {
            AppError::Duplicate {
                entity,
                field,
                value,
            } => {
                assert_eq!(entity, "employee");
                assert_eq!(field, "email");
                assert_eq!(value, "a@x.com");
            }
            other => panic!("Expected Duplicate error, got: {:?}", other),
        }
    }

    #[test]
    fn test_foreign_key_violation_becomes_validation() {
        let error = db_error(
            DatabaseErrorKind::ForeignKeyViolation,
            "insert or update on table \"point\" violates foreign key constraint \"point_employee_id_fkey\"",
            Some("Key (employee_id)=(-1) is not present in table \"employee\"."),
            Some("point_employee_id_fkey"),
        );

        match DatabaseErrorConverter::convert_diesel_error(error, "insert point") {
            AppError::Validation { field, reason } => {
                assert_eq!(field, "employee_id");
                assert!(reason.contains("-1"));
            }
            other => panic!("Expected Validation error, got: {:?}", other),
        }
    }

    #[test]
    fn test_not_null_violation_becomes_validation() {
        let error = db_error(
            DatabaseErrorKind::NotNullViolation,
            "null value in column \"cccd\" of relation \"employee\" violates not-null constraint",
            None,
            None,
        );

        match DatabaseErrorConverter::convert_diesel_error(error, "insert employee") {
            AppError::Validation { field, reason } => {
                assert_eq!(field, "cccd");
                assert!(reason.contains("required"));
            }
            other => panic!("Expected Validation error, got: {:?}", other),
        }
    }

    #[test]
    fn test_unparseable_violation_falls_back_to_database() {
        let error = db_error(
            DatabaseErrorKind::UniqueViolation,
            "something odd happened",
            None,
            None,
        );

        match DatabaseErrorConverter::convert_diesel_error(error, "insert employee") {
            AppError::Database { operation, source } => {
                assert_eq!(operation, "insert employee");
                assert!(source.to_string().contains("something odd happened"));
            }
            other => panic!("Expected Database error, got: {:?}", other),
        }
    }

    #[test]
    fn test_other_errors_keep_operation() {
        let error = DieselError::RollbackTransaction;
        match DatabaseErrorConverter::convert_diesel_error(error, "create employee") {
            AppError::Database { operation, .. } => assert_eq!(operation, "create employee"),
            other => panic!("Expected Database error, got: {:?}", other),
        }
    }
}
