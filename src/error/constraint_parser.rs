use std::sync::OnceLock;

use regex::Regex;

/// Structured view of a PostgreSQL constraint violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintViolation {
    /// Table the violated constraint belongs to (`resource` when unknown)
    pub entity: String,
    /// Column the constraint covers
    pub field: String,
    /// Offending value, when the server reported one
    pub value: Option<String>,
}

impl ConstraintViolation {
    fn new(entity: String, field: String, value: Option<String>) -> Self {
        Self {
            entity,
            field,
            value,
        }
    }
}

/// Parser for PostgreSQL constraint violation messages.
///
/// Works from the constraint name first (`farms_slug_key`, `ponds_farm_id_fkey`,
/// `farms_pkey`) and falls back to the `Key (col)=(value)` detail line.
pub struct ConstraintParser;

struct Patterns {
    key_value: Regex,
    column: Regex,
    table: Regex,
    relation: Regex,
}

static PATTERNS: OnceLock<Patterns> = OnceLock::new();

/// Suffixes PostgreSQL appends to generated constraint names.
const CONSTRAINT_SUFFIXES: &[&str] = &["_pkey", "_fkey", "_key", "_check", "_idx"];

pub(super) const UNKNOWN_ENTITY: &str = "resource";

impl ConstraintParser {
    fn patterns() -> &'static Patterns {
        PATTERNS.get_or_init(|| Patterns {
            key_value: Regex::new(r"Key \(([^)]+)\)=\(([^)]*)\)").expect("valid key/value pattern"),
            column: Regex::new(r#"column "([^"]+)""#).expect("valid column pattern"),
            table: Regex::new(r#"table "([^"]+)""#).expect("valid table pattern"),
            relation: Regex::new(r#"relation "([^"]+)""#).expect("valid relation pattern"),
        })
    }

    /// Parses a unique violation (duplicate slug, duplicate primary key).
    ///
    /// ```
    /// use aquafarm_rs::error::ConstraintParser;
    ///
    /// let message = concat!(
    ///     "duplicate key value violates unique constraint \"farms_slug_key\"\n",
    ///     "Key (slug)=(farm_1) already exists."
    /// );
    /// let violation =
    ///     ConstraintParser::parse_unique_violation(message, Some("farms_slug_key")).unwrap();
    /// assert_eq!(violation.entity, "farms");
    /// assert_eq!(violation.field, "slug");
    /// assert_eq!(violation.value.as_deref(), Some("farm_1"));
    /// ```
    pub fn parse_unique_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<ConstraintViolation> {
        let detail = Self::extract_key_value(message);

        if let Some((entity, field)) = constraint_name.and_then(Self::split_constraint_name) {
            let value = detail.map(|(_, value)| value);
            return Some(ConstraintViolation::new(entity, field, value));
        }

        let (field, value) = detail?;
        let entity = Self::extract_table(message).unwrap_or_else(|| UNKNOWN_ENTITY.to_string());
        Some(ConstraintViolation::new(entity, field, Some(value)))
    }

    /// Parses a foreign key violation such as a pond pointing at a missing farm.
    pub fn parse_foreign_key_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<ConstraintViolation> {
        let detail = Self::extract_key_value(message);

        if let Some((entity, field)) = constraint_name
            .filter(|name| name.ends_with("_fkey"))
            .and_then(Self::split_constraint_name)
        {
            let value = detail.map(|(_, value)| value);
            return Some(ConstraintViolation::new(entity, field, value));
        }

        let (field, value) = detail?;
        let entity = Self::extract_table(message).unwrap_or_else(|| UNKNOWN_ENTITY.to_string());
        Some(ConstraintViolation::new(entity, field, Some(value)))
    }

    /// Parses a not-null violation; the column always comes from the message.
    pub fn parse_not_null_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<ConstraintViolation> {
        let field = Self::extract_column(message)?;
        let entity = Self::extract_relation(message)
            .or_else(|| constraint_name.and_then(Self::split_constraint_name).map(|(e, _)| e))
            .unwrap_or_else(|| UNKNOWN_ENTITY.to_string());
        Some(ConstraintViolation::new(entity, field, None))
    }

    /// Parses a check constraint violation.
    pub fn parse_check_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<ConstraintViolation> {
        if let Some((entity, field)) = constraint_name.and_then(Self::split_constraint_name) {
            return Some(ConstraintViolation::new(entity, field, None));
        }

        let field = Self::extract_column(message)?;
        let entity = Self::extract_relation(message).unwrap_or_else(|| UNKNOWN_ENTITY.to_string());
        Some(ConstraintViolation::new(entity, field, None))
    }

    /// Splits a generated constraint name into `(table, column)`.
    ///
    /// - `farms_slug_key` -> `("farms", "slug")`
    /// - `ponds_farm_id_fkey` -> `("ponds", "farm_id")`
    /// - `farms_pkey` -> `("farms", "id")`
    pub fn split_constraint_name(constraint_name: &str) -> Option<(String, String)> {
        let suffix = CONSTRAINT_SUFFIXES
            .iter()
            .find(|suffix| constraint_name.ends_with(*suffix))?;
        let stem = &constraint_name[..constraint_name.len() - suffix.len()];

        if *suffix == "_pkey" {
            return (!stem.is_empty()).then(|| (stem.to_string(), "id".to_string()));
        }

        let (table, column) = stem.split_once('_')?;
        if table.is_empty() || column.is_empty() {
            return None;
        }
        Some((table.to_string(), column.to_string()))
    }

    /// Extracts `(field, value)` from a `Key (field)=(value)` detail line.
    pub fn extract_key_value(message: &str) -> Option<(String, String)> {
        let caps = Self::patterns().key_value.captures(message)?;
        Some((caps.get(1)?.as_str().to_string(), caps.get(2)?.as_str().to_string()))
    }

    pub fn extract_column(message: &str) -> Option<String> {
        Self::first_capture(&Self::patterns().column, message)
    }

    pub fn extract_table(message: &str) -> Option<String> {
        Self::first_capture(&Self::patterns().table, message)
    }

    /// Extracts the relation named in `new row for relation "x"` or
    /// `column "c" of relation "x"` messages.
    pub fn extract_relation(message: &str) -> Option<String> {
        Self::first_capture(&Self::patterns().relation, message)
    }

    fn first_capture(pattern: &Regex, message: &str) -> Option<String> {
        pattern
            .captures(message)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }
}
