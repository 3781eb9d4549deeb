use std::collections::HashSet;

use famfin_domain::Household;

use crate::CoreError;

/// Abstraction over persistence backends capable of storing a household.
pub trait HouseholdStorage: Send + Sync {
    /// Loads the household; a backend with nothing stored yet returns an empty one.
    fn load(&self) -> Result<Household, CoreError>;
    fn save(&self, household: &Household) -> Result<(), CoreError>;
}

/// Detects dangling references and other anomalies within a household snapshot.
pub fn household_warnings(household: &Household) -> Vec<String> {
    let member_ids: HashSet<_> = household.members.iter().map(|m| m.id).collect();
    let mut warnings = Vec::new();

    for asset in &household.assets {
        if !member_ids.contains(&asset.member_id) {
            warnings.push(format!(
                "asset {} references unknown member {}",
                asset.id, asset.member_id
            ));
        }
    }
    for debt in &household.debts {
        if !member_ids.contains(&debt.member_id) {
            warnings.push(format!(
                "debt {} references unknown member {}",
                debt.id, debt.member_id
            ));
        }
        if !debt.installments.is_empty() {
            match debt.installments_total() {
                Some(sum) if sum == debt.total_amount => {}
                Some(sum) => warnings.push(format!(
                    "debt {} total {} differs from its installments ({sum})",
                    debt.id, debt.total_amount
                )),
                None => warnings.push(format!(
                    "debt {} installments overflow the amount range",
                    debt.id
                )),
            }
        }
    }
    for income in &household.incomes {
        if !member_ids.contains(&income.member_id) {
            warnings.push(format!(
                "income {} references unknown member {}",
                income.id, income.member_id
            ));
        }
    }
    warnings
}
