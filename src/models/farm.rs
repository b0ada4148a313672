use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// Farm model for reading from database
/// Derives Queryable for SELECT operations and Selectable for type-safe column selection
#[derive(
    Debug,
    Queryable,
    Selectable,
    Identifiable,
    Serialize,
    Deserialize,
    Clone,
    PartialEq,
    Eq,
    Default,
)]
#[diesel(table_name = crate::schema::farms)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Farm {
    pub id: i32,
    pub name: String,
    pub slug: String,
}

impl Farm {
    /// Changeset carrying every non-key column, used for full-row saves.
    pub fn changeset(&self) -> UpdateFarm {
        UpdateFarm {
            name: self.name.clone(),
            slug: self.slug.clone(),
        }
    }
}

/// NewFarm model for inserting new records
///
/// `id: None` lets the database assign the identity.
#[derive(Debug, Insertable, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::farms)]
pub struct NewFarm {
    pub id: Option<i32>,
    pub name: String,
    pub slug: String,
}

impl NewFarm {
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            slug: slug.into(),
        }
    }

    pub fn with_id(mut self, id: i32) -> Self {
        self.id = Some(id);
        self
    }
}

/// UpdateFarm model for full-row saves
#[derive(Debug, AsChangeset, Deserialize, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::farms)]
pub struct UpdateFarm {
    pub name: String,
    pub slug: String,
}
