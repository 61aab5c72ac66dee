//! Template categories ("types" in the admin vocabulary).

use serde::{Deserialize, Serialize};

use crate::domain::foundation::CategoryId;

/// A named grouping of templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

impl Category {
    pub fn new(id: CategoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
