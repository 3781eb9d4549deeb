//! The household aggregate: every persisted record lives in one of its collections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    asset::Asset,
    common::{Identifiable, NamedEntity},
    debt::Debt,
    income::RecurringIncome,
    member::Member,
};

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Household {
    pub name: String,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub assets: Vec<Asset>,
    #[serde(default)]
    pub debts: Vec<Debt>,
    #[serde(default)]
    pub incomes: Vec<RecurringIncome>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "Household::schema_version_default")]
    pub schema_version: u8,
}

impl Default for Household {
    fn default() -> Self {
        Self::new("Household")
    }
}

impl Household {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            members: Vec::new(),
            assets: Vec::new(),
            debts: Vec::new(),
            incomes: Vec::new(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    /// Inserts the member, replacing any record with the same id.
    pub fn put_member(&mut self, member: Member) -> Uuid {
        let id = upsert(&mut self.members, member);
        self.touch();
        id
    }

    pub fn put_asset(&mut self, asset: Asset) -> Uuid {
        let id = upsert(&mut self.assets, asset);
        self.touch();
        id
    }

    pub fn put_debt(&mut self, debt: Debt) -> Uuid {
        let id = upsert(&mut self.debts, debt);
        self.touch();
        id
    }

    pub fn put_income(&mut self, income: RecurringIncome) -> Uuid {
        let id = upsert(&mut self.incomes, income);
        self.touch();
        id
    }

    pub fn delete_member(&mut self, id: Uuid) -> bool {
        let removed = remove(&mut self.members, id);
        if removed {
            self.touch();
        }
        removed
    }

    pub fn delete_asset(&mut self, id: Uuid) -> bool {
        let removed = remove(&mut self.assets, id);
        if removed {
            self.touch();
        }
        removed
    }

    pub fn delete_debt(&mut self, id: Uuid) -> bool {
        let removed = remove(&mut self.debts, id);
        if removed {
            self.touch();
        }
        removed
    }

    pub fn delete_income(&mut self, id: Uuid) -> bool {
        let removed = remove(&mut self.incomes, id);
        if removed {
            self.touch();
        }
        removed
    }

    pub fn member(&self, id: Uuid) -> Option<&Member> {
        self.members.iter().find(|member| member.id == id)
    }

    /// Finds a member by exact (case-insensitive) name.
    pub fn member_named(&self, name: &str) -> Option<&Member> {
        let needle = name.trim();
        self.members
            .iter()
            .find(|member| member.name().eq_ignore_ascii_case(needle))
    }

    pub fn debt(&self, id: Uuid) -> Option<&Debt> {
        self.debts.iter().find(|debt| debt.id == id)
    }

    pub fn debt_mut(&mut self, id: Uuid) -> Option<&mut Debt> {
        self.debts.iter_mut().find(|debt| debt.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
            && self.assets.is_empty()
            && self.debts.is_empty()
            && self.incomes.is_empty()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}

fn upsert<T: Identifiable>(items: &mut Vec<T>, item: T) -> Uuid {
    let id = item.id();
    match items.iter_mut().find(|existing| existing.id() == id) {
        Some(slot) => *slot = item,
        None => items.push(item),
    }
    id
}

fn remove<T: Identifiable>(items: &mut Vec<T>, id: Uuid) -> bool {
    let before = items.len();
    items.retain(|item| item.id() != id);
    items.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_replaces_records_with_the_same_id() {
        let mut household = Household::default();
        let mut member = Member::new("Sara", "spouse");
        let id = household.put_member(member.clone());
        member.relation = "partner".into();
        household.put_member(member);

        assert_eq!(household.members.len(), 1);
        assert_eq!(household.member(id).unwrap().relation, "partner");
    }

    #[test]
    fn delete_reports_whether_anything_was_removed() {
        let mut household = Household::default();
        let id = household.put_member(Member::new("Ali", "self"));

        assert!(household.delete_member(id));
        assert!(!household.delete_member(id));
        assert!(household.is_empty());
    }

    #[test]
    fn members_are_found_by_name_case_insensitively() {
        let mut household = Household::default();
        household.put_member(Member::new("Reza", "son"));
        assert!(household.member_named("reza").is_some());
        assert!(household.member_named("Maryam").is_none());
    }
}
