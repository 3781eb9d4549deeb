use chrono::NaiveDate;
use famfin_domain::{checked_total, owned_by, same_jalali_month, Household, Installment};
use tracing::debug;
use uuid::Uuid;

use crate::{
    asset_service::AssetService,
    error::{CoreError, CoreResult},
    income_service::IncomeService,
};

/// Net position of one household member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberBalance {
    pub member_id: Uuid,
    pub name: String,
    pub relation: String,
    pub assets: u64,
    pub debts: u64,
    pub balance: i128,
}

/// Household-wide figures for the current Jalali month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    pub today: NaiveDate,
    pub total_assets: u64,
    pub total_debts: u64,
    pub monthly_income: u64,
    /// Pending installments due in the current Jalali month.
    pub due_this_month: u64,
    pub due_this_month_count: usize,
    /// Monthly income minus what is due this month.
    pub monthly_balance: i128,
    pub members: Vec<MemberBalance>,
}

pub struct SummaryService;

impl SummaryService {
    pub fn dashboard(household: &Household, today: NaiveDate) -> CoreResult<DashboardSummary> {
        let total_assets = AssetService::total(household)?;
        let total_debts = checked_total(&household.debts).ok_or_else(|| overflow("debt totals"))?;
        let monthly_income = IncomeService::monthly_total(household)?;

        let due: Vec<&Installment> = household
            .debts
            .iter()
            .flat_map(|debt| debt.installments.iter())
            .filter(|inst| !inst.is_paid() && same_jalali_month(inst.due_date, today))
            .collect();
        let due_this_month =
            checked_total(due.iter().copied()).ok_or_else(|| overflow("installments due this month"))?;

        let members = household
            .members
            .iter()
            .map(|member| -> CoreResult<MemberBalance> {
                let assets = checked_total(owned_by(&household.assets, member.id))
                    .ok_or_else(|| overflow("member assets"))?;
                let debts = checked_total(owned_by(&household.debts, member.id))
                    .ok_or_else(|| overflow("member debts"))?;
                Ok(MemberBalance {
                    member_id: member.id,
                    name: member.name.clone(),
                    relation: member.relation.clone(),
                    assets,
                    debts,
                    balance: i128::from(assets) - i128::from(debts),
                })
            })
            .collect::<CoreResult<Vec<_>>>()?;

        debug!(%today, due = due.len(), "built dashboard summary");
        Ok(DashboardSummary {
            today,
            total_assets,
            total_debts,
            monthly_income,
            due_this_month,
            due_this_month_count: due.len(),
            monthly_balance: i128::from(monthly_income) - i128::from(due_this_month),
            members,
        })
    }
}

fn overflow(what: &str) -> CoreError {
    CoreError::Validation(format!("Sum of {what} overflows the amount range"))
}

#[cfg(test)]
mod tests {
    use famfin_domain::{
        jalali_to_gregorian, Asset, AssetKind, Debt, Installment, Member, RecurringIncome,
        RepaymentMethod,
    };

    use super::*;

    #[test]
    fn aggregates_household_figures() {
        let mut household = Household::default();
        let ali = household.put_member(Member::new("Ali", "self"));
        let sara = household.put_member(Member::new("Sara", "spouse"));
        household.put_asset(Asset::new(ali, "Account", AssetKind::Bank, 1_000));
        household.put_income(RecurringIncome::new(sara, "Salary", 800, 1));

        let today = jalali_to_gregorian(1403, 7, 15).unwrap();
        let mut debt = Debt::new(ali, "Loan", 0, RepaymentMethod::Installment, today);
        debt.installments = vec![
            Installment::new(300, jalali_to_gregorian(1403, 7, 2).unwrap()),
            Installment::new(300, jalali_to_gregorian(1403, 7, 30).unwrap()),
            Installment::new(300, jalali_to_gregorian(1403, 8, 2).unwrap()),
        ];
        debt.installments[1].toggle_status();
        debt.recompute_total();
        household.put_debt(debt);

        let summary = SummaryService::dashboard(&household, today).unwrap();
        assert_eq!(summary.total_assets, 1_000);
        assert_eq!(summary.total_debts, 900);
        assert_eq!(summary.monthly_income, 800);
        assert_eq!(summary.due_this_month, 300);
        assert_eq!(summary.due_this_month_count, 1);
        assert_eq!(summary.monthly_balance, 500);

        let ali_balance = summary.members.iter().find(|m| m.member_id == ali).unwrap();
        assert_eq!(ali_balance.balance, 100);
        let sara_balance = summary.members.iter().find(|m| m.member_id == sara).unwrap();
        assert_eq!(sara_balance.balance, 0);
    }

    #[test]
    fn empty_household_is_all_zero() {
        let today = jalali_to_gregorian(1403, 1, 1).unwrap();
        let summary = SummaryService::dashboard(&Household::default(), today).unwrap();
        assert_eq!(summary.monthly_balance, 0);
        assert!(summary.members.is_empty());
    }

    #[test]
    fn overflowing_member_debts_are_reported() {
        let mut household = Household::default();
        let ali = household.put_member(Member::new("Ali", "self"));
        let start = jalali_to_gregorian(1403, 1, 1).unwrap();
        household.put_debt(Debt::new(ali, "Loan", u64::MAX, RepaymentMethod::LumpSum, start));
        household.put_debt(Debt::new(ali, "Card", 1, RepaymentMethod::LumpSum, start));

        let err = SummaryService::dashboard(&household, start).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }
}
