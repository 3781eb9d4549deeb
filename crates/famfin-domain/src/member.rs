//! Household members who own assets, debts, and incomes.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::{Displayable, Identifiable, NamedEntity};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Member {
    pub id: Uuid,
    pub name: String,
    /// Free-form relation to the household head, e.g. "spouse".
    pub relation: String,
}

impl Member {
    pub fn new(name: impl Into<String>, relation: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            relation: relation.into(),
        }
    }
}

impl Identifiable for Member {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Member {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Member {
    fn display_label(&self) -> String {
        if self.relation.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.relation)
        }
    }
}
