use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// Pond model for reading from database
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
#[diesel(table_name = crate::schema::ponds)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Pond {
    pub id: i32,
    pub farm_id: i32,
    pub name: String,
    pub slug: String,
}

impl Pond {
    pub fn changeset(&self) -> UpdatePond {
        UpdatePond {
            farm_id: self.farm_id,
            name: self.name.clone(),
            slug: self.slug.clone(),
        }
    }
}

/// NewPond model for inserting new records
#[derive(Debug, Insertable, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::ponds)]
pub struct NewPond {
    pub id: Option<i32>,
    pub farm_id: i32,
    pub name: String,
    pub slug: String,
}

impl NewPond {
    pub fn new(farm_id: i32, name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: None,
            farm_id,
            name: name.into(),
            slug: slug.into(),
        }
    }

    pub fn with_id(mut self, id: i32) -> Self {
        self.id = Some(id);
        self
    }
}

/// UpdatePond model for full-row saves
#[derive(Debug, AsChangeset, Deserialize, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::ponds)]
pub struct UpdatePond {
    pub farm_id: i32,
    pub name: String,
    pub slug: String,
}
