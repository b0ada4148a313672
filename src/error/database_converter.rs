use std::borrow::Cow;

use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

use super::constraint_parser::UNKNOWN_ENTITY;
use crate::error::{AppError, ConstraintParser, ConstraintViolation};

/// Converts Diesel errors into structured [`AppError`] variants.
///
/// Constraint violations are decoded with [`ConstraintParser`]; anything the
/// parser cannot make sense of is kept as `AppError::Database` with the raw
/// server message attached.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    /// Converts a Diesel error raised while performing `operation`.
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::DatabaseError(kind, info) => {
                Self::convert_database_error(kind, info.as_ref(), operation)
            }
            DieselError::NotFound => AppError::not_found("resource", "id", "unknown"),
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }

    fn convert_database_error(
        kind: DatabaseErrorKind,
        info: &(dyn DatabaseErrorInformation + Send + Sync),
        operation: &str,
    ) -> AppError {
        let message = info.message();
        let constraint = info.constraint_name();
        // PostgreSQL reports `Key (col)=(value)` in DETAIL, not in the primary message.
        let joined = match info.details() {
            Some(details) => Cow::Owned(format!("{}\n{}", message, details)),
            None => Cow::Borrowed(message),
        };
        let text = joined.as_ref();

        let parsed = match kind {
            DatabaseErrorKind::UniqueViolation => {
                ConstraintParser::parse_unique_violation(text, constraint)
                    .map(|v| Self::with_table(v, info.table_name()))
                    .map(|v| AppError::Duplicate {
                        entity: v.entity,
                        field: v.field,
                        value: v.value.unwrap_or_else(|| "duplicate_value".to_string()),
                    })
            }
            DatabaseErrorKind::ForeignKeyViolation => {
                ConstraintParser::parse_foreign_key_violation(text, constraint).map(|v| {
                    let reason = match &v.value {
                        Some(value) => {
                            format!("Invalid reference from {} with value '{}'", v.entity, value)
                        }
                        None => format!("Invalid reference from {}", v.entity),
                    };
                    AppError::validation(v.field, reason)
                })
            }
            DatabaseErrorKind::NotNullViolation => {
                ConstraintParser::parse_not_null_violation(text, constraint)
                    .map(|v| Self::field_rule(v, "Field is required for"))
            }
            DatabaseErrorKind::CheckViolation => {
                ConstraintParser::parse_check_violation(text, constraint)
                    .map(|v| Self::field_rule(v, "Check constraint failed for"))
            }
            DatabaseErrorKind::ClosedConnection => {
                return AppError::ConnectionPool {
                    source: anyhow::anyhow!("Connection closed during {}: {}", operation, message),
                };
            }
            _ => None,
        };

        parsed.unwrap_or_else(|| AppError::Database {
            operation: operation.to_string(),
            source: anyhow::anyhow!("{:?}: {}", kind, message),
        })
    }

    /// Fills an unknown entity from the table the server attached to the error.
    fn with_table(mut violation: ConstraintViolation, table: Option<&str>) -> ConstraintViolation {
        if violation.entity == UNKNOWN_ENTITY
            && let Some(table) = table
        {
            violation.entity = table.to_string();
        }
        violation
    }

    fn field_rule(violation: ConstraintViolation, prefix: &str) -> AppError {
        AppError::validation(violation.field, format!("{} {}", prefix, violation.entity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeErrorInfo {
        message: String,
        details: Option<String>,
        table_name: Option<String>,
        constraint_name: Option<String>,
    }

    impl FakeErrorInfo {
        fn boxed(message: &str, constraint_name: Option<&str>) -> Box<Self> {
            Box::new(Self {
                message: message.to_string(),
                constraint_name: constraint_name.map(str::to_string),
                ..Default::default()
            })
        }

        fn with_details(mut self: Box<Self>, details: &str) -> Box<Self> {
            self.details = Some(details.to_string());
            self
        }

        fn with_table(mut self: Box<Self>, table: &str) -> Box<Self> {
            self.table_name = Some(table.to_string());
            self
        }
    }

    impl DatabaseErrorInformation for FakeErrorInfo {
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
            self.table_name.as_deref()
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

    #[test]
    fn test_duplicate_slug_becomes_duplicate() {
        let info = FakeErrorInfo::boxed(
            "duplicate key value violates unique constraint \"farms_slug_key\"",
            Some("farms_slug_key"),
        )
        .with_details("Key (slug)=(farm_1) already exists.");
        let error = DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info);

        match DatabaseErrorConverter::convert_diesel_error(error, "insert farm") {
            AppError::Duplicate { entity, field, value } => {
                assert_eq!(entity, "farms");
                assert_eq!(field, "slug");
                assert_eq!(value, "farm_1");
            }
            other => panic!("Expected Duplicate error, got: {:?}", other),
        }
    }

    #[test]
    fn test_missing_farm_reference_becomes_validation() {
        let info = FakeErrorInfo::boxed(
            concat!(
                "insert or update on table \"ponds\" ",
                "violates foreign key constraint \"ponds_farm_id_fkey\""
            ),
            Some("ponds_farm_id_fkey"),
        )
        .with_details("Key (farm_id)=(42) is not present in table \"farms\".");
        let error = DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info);

        match DatabaseErrorConverter::convert_diesel_error(error, "insert pond") {
            AppError::Validation { field, reason } => {
                assert_eq!(field, "farm_id");
                assert!(reason.contains("Invalid reference"));
                assert!(reason.contains("42"));
            }
            other => panic!("Expected Validation error, got: {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_without_constraint_name_uses_details_and_table() {
        let info = FakeErrorInfo::boxed("duplicate key value violates unique constraint", None)
            .with_details("Key (id)=(3) already exists.")
            .with_table("farms");
        let error = DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info);

        match DatabaseErrorConverter::convert_diesel_error(error, "insert farm") {
            AppError::Duplicate { entity, field, value } => {
                assert_eq!(entity, "farms");
                assert_eq!(field, "id");
                assert_eq!(value, "3");
            }
            other => panic!("Expected Duplicate error, got: {:?}", other),
        }
    }

    #[test]
    fn test_not_null_violation_becomes_validation() {
        let info = FakeErrorInfo::boxed(
            "null value in column \"slug\" of relation \"farms\" violates not-null constraint",
            None,
        );
        let error = DieselError::DatabaseError(DatabaseErrorKind::NotNullViolation, info);

        match DatabaseErrorConverter::convert_diesel_error(error, "insert farm") {
            AppError::Validation { field, reason } => {
                assert_eq!(field, "slug");
                assert!(reason.contains("required"));
            }
            other => panic!("Expected Validation error, got: {:?}", other),
        }
    }

    #[test]
    fn test_unparsable_unique_violation_stays_database_error() {
        let info = FakeErrorInfo::boxed("something odd happened", None);
        let error = DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info);

        match DatabaseErrorConverter::convert_diesel_error(error, "update farm") {
            AppError::Database { operation, source } => {
                assert_eq!(operation, "update farm");
                assert!(source.to_string().contains("something odd happened"));
            }
            other => panic!("Expected Database error, got: {:?}", other),
        }
    }

    #[test]
    fn test_closed_connection_becomes_pool_error() {
        let info = FakeErrorInfo::boxed("server closed the connection unexpectedly", None);
        let error = DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info);

        let result = DatabaseErrorConverter::convert_diesel_error(error, "select farms");
        assert!(matches!(result, AppError::ConnectionPool { .. }));
    }

    #[test]
    fn test_not_found_keeps_generic_entity() {
        let result =
            DatabaseErrorConverter::convert_diesel_error(DieselError::NotFound, "find farm");
        match result {
            AppError::NotFound { entity, field, value } => {
                assert_eq!(entity, "resource");
                assert_eq!(field, "id");
                assert_eq!(value, "unknown");
            }
            other => panic!("Expected NotFound error, got: {:?}", other),
        }
    }
}
