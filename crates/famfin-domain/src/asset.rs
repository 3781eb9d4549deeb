//! Assets held by household members.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::{Amounted, Displayable, Identifiable, NamedEntity, OwnedByMember};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Asset {
    pub id: Uuid,
    pub member_id: Uuid,
    pub name: String,
    pub kind: AssetKind,
    pub amount: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Asset {
    pub fn new(member_id: Uuid, name: impl Into<String>, kind: AssetKind, amount: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            member_id,
            name: name.into(),
            kind,
            amount,
            description: None,
            created_at: Utc::now(),
        }
    }
}

impl Identifiable for Asset {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Asset {
    fn name(&self) -> &str {
        &self.name
    }
}

impl OwnedByMember for Asset {
    fn member_id(&self) -> Uuid {
        self.member_id
    }
}

impl Amounted for Asset {
    fn amount(&self) -> u64 {
        self.amount
    }
}

impl Displayable for Asset {
    fn display_label(&self) -> String {
        format!("{} [{}]", self.name, self.kind)
    }
}

/// Supported asset categories.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetKind {
    Bank,
    Cash,
    Gold,
    Car,
    RealEstate,
    Other,
}

impl AssetKind {
    /// Parses a user-supplied label such as `bank` or `real-estate`.
    pub fn from_label(value: &str) -> Option<Self> {
        let normalized: String = value
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        match normalized.as_str() {
            "bank" => Some(AssetKind::Bank),
            "cash" => Some(AssetKind::Cash),
            "gold" => Some(AssetKind::Gold),
            "car" => Some(AssetKind::Car),
            "realestate" => Some(AssetKind::RealEstate),
            "other" => Some(AssetKind::Other),
            _ => None,
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AssetKind::Bank => "Bank",
            AssetKind::Cash => "Cash",
            AssetKind::Gold => "Gold",
            AssetKind::Car => "Car",
            AssetKind::RealEstate => "Real Estate",
            AssetKind::Other => "Other",
        };
        f.write_str(label)
    }
}
