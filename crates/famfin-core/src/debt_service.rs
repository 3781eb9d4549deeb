use chrono::NaiveDate;
use famfin_domain::{
    checked_total, AmountBasis, Debt, Household, InstallmentStatus, RepaymentMethod,
};
use tracing::info;
use uuid::Uuid;

use crate::{
    error::{CoreError, CoreResult},
    schedule_service::{ScheduleService, ScheduleTerms},
};

/// Fields collected when adding or editing a debt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebtDraft {
    pub member_id: Uuid,
    pub name: String,
    pub repayment_method: RepaymentMethod,
    pub basis: AmountBasis,
    pub amount: u64,
    pub installment_count: u32,
    pub start_date: NaiveDate,
    pub description: Option<String>,
}

impl DebtDraft {
    /// Lump sums are always a single payment on the start date.
    pub fn terms(&self) -> ScheduleTerms {
        let count = match self.repayment_method {
            RepaymentMethod::LumpSum => 1,
            RepaymentMethod::Installment => self.installment_count,
        };
        ScheduleTerms::new(self.basis, self.amount, count, self.start_date)
    }
}

pub struct DebtService;

impl DebtService {
    /// Creates a debt, or updates `existing` when given, and returns its id.
    pub fn save(household: &mut Household, existing: Option<Uuid>, draft: DebtDraft) -> CoreResult<Uuid> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(CoreError::Validation("Debt name must not be empty".into()));
        }
        if household.member(draft.member_id).is_none() {
            return Err(CoreError::MemberNotFound(draft.member_id.to_string()));
        }
        let terms = draft.terms();

        let mut debt = match existing {
            Some(id) => household
                .debt(id)
                .cloned()
                .ok_or_else(|| CoreError::DebtNotFound(id.to_string()))?,
            None => Debt::new(draft.member_id, name, 0, draft.repayment_method, draft.start_date),
        };
        debt.member_id = draft.member_id;
        debt.name = name.to_string();
        debt.repayment_method = draft.repayment_method;
        debt.amount_basis = draft.basis;
        debt.start_date = draft.start_date;
        debt.description = draft.description.filter(|text| !text.trim().is_empty());
        let regenerated = ScheduleService::reconcile(&mut debt, &terms)?;

        info!(
            debt = %debt.id,
            total = debt.total_amount,
            installments = debt.installments.len(),
            regenerated,
            "saved debt"
        );
        Ok(household.put_debt(debt))
    }

    pub fn remove(household: &mut Household, id: Uuid) -> CoreResult<()> {
        if household.delete_debt(id) {
            info!(debt = %id, "removed debt");
            Ok(())
        } else {
            Err(CoreError::DebtNotFound(id.to_string()))
        }
    }

    /// Flips an installment between paid and pending and returns the new status.
    pub fn toggle_installment(
        household: &mut Household,
        debt_id: Uuid,
        installment_id: Uuid,
    ) -> CoreResult<InstallmentStatus> {
        let debt = household
            .debt_mut(debt_id)
            .ok_or_else(|| CoreError::DebtNotFound(debt_id.to_string()))?;
        let installment = debt
            .installment_mut(installment_id)
            .ok_or_else(|| CoreError::InstallmentNotFound(installment_id.to_string()))?;
        installment.toggle_status();
        let status = installment.status;
        household.touch();
        info!(debt = %debt_id, installment = %installment_id, %status, "toggled installment");
        Ok(status)
    }

    /// Overrides one installment amount; the debt total becomes the new sum.
    pub fn set_installment_amount(
        household: &mut Household,
        debt_id: Uuid,
        installment_id: Uuid,
        amount: u64,
    ) -> CoreResult<u64> {
        let debt = household
            .debt_mut(debt_id)
            .ok_or_else(|| CoreError::DebtNotFound(debt_id.to_string()))?;
        if debt.installment(installment_id).is_none() {
            return Err(CoreError::InstallmentNotFound(installment_id.to_string()));
        }
        let total = checked_total(debt.installments.iter().filter(|inst| inst.id != installment_id))
            .and_then(|others| others.checked_add(amount))
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Installment amount {amount} overflows the total of debt {}",
                    debt.name
                ))
            })?;
        if let Some(installment) = debt.installment_mut(installment_id) {
            installment.amount = amount;
        }
        debt.total_amount = total;
        household.touch();
        info!(debt = %debt_id, installment = %installment_id, amount, total, "edited installment amount");
        Ok(total)
    }

    /// Resolves a 1-based installment position to its id.
    pub fn installment_at(household: &Household, debt_id: Uuid, position: usize) -> CoreResult<Uuid> {
        let debt = household
            .debt(debt_id)
            .ok_or_else(|| CoreError::DebtNotFound(debt_id.to_string()))?;
        position
            .checked_sub(1)
            .and_then(|index| debt.installments.get(index))
            .map(|inst| inst.id)
            .ok_or_else(|| {
                CoreError::InstallmentNotFound(format!("#{position} of debt {}", debt.name))
            })
    }

    /// Finds a debt by full id or by a unique id prefix.
    pub fn resolve(household: &Household, key: &str) -> CoreResult<Uuid> {
        let key = key.trim().to_ascii_lowercase();
        let mut matches = household
            .debts
            .iter()
            .filter(|debt| !key.is_empty() && debt.id.to_string().starts_with(&key));
        match (matches.next(), matches.next()) {
            (Some(debt), None) => Ok(debt.id),
            (Some(_), Some(_)) => Err(CoreError::Validation(format!(
                "Debt id `{key}` is ambiguous"
            ))),
            (None, _) => Err(CoreError::DebtNotFound(key)),
        }
    }
}

#[cfg(test)]
mod tests {
    use famfin_domain::{jalali_to_gregorian, Member};

    use super::*;

    fn household_with_member() -> (Household, Uuid) {
        let mut household = Household::default();
        let id = household.put_member(Member::new("Sara", "self"));
        (household, id)
    }

    fn draft(member_id: Uuid, amount: u64, count: u32) -> DebtDraft {
        DebtDraft {
            member_id,
            name: "Mortgage".into(),
            repayment_method: RepaymentMethod::Installment,
            basis: AmountBasis::Total,
            amount,
            installment_count: count,
            start_date: jalali_to_gregorian(1403, 1, 1).unwrap(),
            description: None,
        }
    }

    #[test]
    fn rejects_unknown_member_and_blank_name() {
        let (mut household, member) = household_with_member();
        let err = DebtService::save(&mut household, None, draft(Uuid::new_v4(), 10, 1)).unwrap_err();
        assert!(matches!(err, CoreError::MemberNotFound(_)));

        let mut blank = draft(member, 10, 1);
        blank.name = "  ".into();
        let err = DebtService::save(&mut household, None, blank).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(household.debts.is_empty());
    }

    #[test]
    fn lump_sum_ignores_requested_count() {
        let (mut household, member) = household_with_member();
        let mut lump = draft(member, 5_000, 6);
        lump.repayment_method = RepaymentMethod::LumpSum;
        let id = DebtService::save(&mut household, None, lump).unwrap();
        let debt = household.debt(id).unwrap();
        assert_eq!(debt.installments.len(), 1);
        assert_eq!(debt.installments[0].amount, 5_000);
    }

    #[test]
    fn editing_amount_recomputes_total() {
        let (mut household, member) = household_with_member();
        let id = DebtService::save(&mut household, None, draft(member, 900, 3)).unwrap();
        let second = DebtService::installment_at(&household, id, 2).unwrap();

        let total = DebtService::set_installment_amount(&mut household, id, second, 500).unwrap();
        assert_eq!(total, 1_100);

        // re-saving with the recomputed total keeps the edited schedule
        DebtService::save(&mut household, Some(id), draft(member, 1_100, 3)).unwrap();
        let debt = household.debt(id).unwrap();
        assert_eq!(debt.installments[1].amount, 500);
        assert_eq!(debt.installments[1].id, second);
    }

    #[test]
    fn overflowing_amount_edit_is_rejected_before_any_change() {
        let (mut household, member) = household_with_member();
        let id = DebtService::save(&mut household, None, draft(member, 900, 3)).unwrap();
        let second = DebtService::installment_at(&household, id, 2).unwrap();

        let err = DebtService::set_installment_amount(&mut household, id, second, u64::MAX)
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));

        let debt = household.debt(id).unwrap();
        assert_eq!(debt.total_amount, 900);
        assert_eq!(debt.installments[1].amount, 300);

        // the largest amount that still fits is accepted
        let total =
            DebtService::set_installment_amount(&mut household, id, second, u64::MAX - 600)
                .unwrap();
        assert_eq!(total, u64::MAX);
    }

    #[test]
    fn toggling_flips_status_both_ways() {
        let (mut household, member) = household_with_member();
        let id = DebtService::save(&mut household, None, draft(member, 900, 3)).unwrap();
        let first = DebtService::installment_at(&household, id, 1).unwrap();

        let status = DebtService::toggle_installment(&mut household, id, first).unwrap();
        assert_eq!(status, InstallmentStatus::Paid);
        let status = DebtService::toggle_installment(&mut household, id, first).unwrap();
        assert_eq!(status, InstallmentStatus::Pending);
    }

    #[test]
    fn installment_positions_are_one_based() {
        let (mut household, member) = household_with_member();
        let id = DebtService::save(&mut household, None, draft(member, 900, 3)).unwrap();
        assert!(DebtService::installment_at(&household, id, 0).is_err());
        assert!(DebtService::installment_at(&household, id, 4).is_err());
        assert!(DebtService::installment_at(&household, id, 3).is_ok());
    }

    #[test]
    fn resolves_debts_by_id_prefix() {
        let (mut household, member) = household_with_member();
        let id = DebtService::save(&mut household, None, draft(member, 900, 3)).unwrap();
        let prefix = &id.to_string()[..8];
        assert_eq!(DebtService::resolve(&household, prefix).unwrap(), id);
        assert!(DebtService::resolve(&household, "").is_err());
        DebtService::remove(&mut household, id).unwrap();
        assert!(matches!(
            DebtService::resolve(&household, prefix),
            Err(CoreError::DebtNotFound(_))
        ));
    }
}
