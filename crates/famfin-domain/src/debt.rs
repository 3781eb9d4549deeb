//! Debts and the installment schedules attached to them.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::{checked_total, Amounted, Displayable, Identifiable, NamedEntity, OwnedByMember};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Debt {
    pub id: Uuid,
    pub member_id: Uuid,
    pub name: String,
    /// Sum of all installment amounts once a schedule is attached.
    pub total_amount: u64,
    pub repayment_method: RepaymentMethod,
    #[serde(default)]
    pub amount_basis: AmountBasis,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub installments: Vec<Installment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Debt {
    pub fn new(
        member_id: Uuid,
        name: impl Into<String>,
        total_amount: u64,
        repayment_method: RepaymentMethod,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            member_id,
            name: name.into(),
            total_amount,
            repayment_method,
            amount_basis: AmountBasis::Total,
            start_date,
            installments: Vec::new(),
            description: None,
            created_at: Utc::now(),
        }
    }

    pub fn installment_count(&self) -> usize {
        self.installments.len()
    }

    pub fn installment(&self, id: Uuid) -> Option<&Installment> {
        self.installments.iter().find(|inst| inst.id == id)
    }

    pub fn installment_mut(&mut self, id: Uuid) -> Option<&mut Installment> {
        self.installments.iter_mut().find(|inst| inst.id == id)
    }

    /// Sum of the installment amounts; `None` on `u64` overflow.
    pub fn installments_total(&self) -> Option<u64> {
        checked_total(&self.installments)
    }

    pub fn paid_amount(&self) -> Option<u64> {
        checked_total(self.installments.iter().filter(|inst| inst.is_paid()))
    }

    pub fn outstanding_amount(&self) -> Option<u64> {
        self.installments_total()?.checked_sub(self.paid_amount()?)
    }

    /// Re-derives `total_amount` from the installment list. Leaves the total
    /// untouched and returns `None` when the installments overflow.
    pub fn recompute_total(&mut self) -> Option<u64> {
        let total = self.installments_total()?;
        self.total_amount = total;
        Some(total)
    }
}

impl Identifiable for Debt {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Debt {
    fn name(&self) -> &str {
        &self.name
    }
}

impl OwnedByMember for Debt {
    fn member_id(&self) -> Uuid {
        self.member_id
    }
}

impl Amounted for Debt {
    fn amount(&self) -> u64 {
        self.total_amount
    }
}

impl Displayable for Debt {
    fn display_label(&self) -> String {
        format!(
            "{} [{}, {} installment{}]",
            self.name,
            self.repayment_method,
            self.installments.len(),
            if self.installments.len() == 1 { "" } else { "s" }
        )
    }
}

/// One scheduled payment of a debt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Installment {
    pub id: Uuid,
    pub amount: u64,
    pub due_date: NaiveDate,
    pub status: InstallmentStatus,
}

impl Installment {
    pub fn new(amount: u64, due_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            due_date,
            status: InstallmentStatus::Pending,
        }
    }

    pub fn is_paid(&self) -> bool {
        self.status == InstallmentStatus::Paid
    }

    pub fn toggle_status(&mut self) {
        self.status = self.status.toggled();
    }
}

impl Identifiable for Installment {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Amounted for Installment {
    fn amount(&self) -> u64 {
        self.amount
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstallmentStatus {
    #[default]
    Pending,
    Paid,
}

impl InstallmentStatus {
    pub fn toggled(self) -> Self {
        match self {
            InstallmentStatus::Pending => InstallmentStatus::Paid,
            InstallmentStatus::Paid => InstallmentStatus::Pending,
        }
    }
}

impl fmt::Display for InstallmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InstallmentStatus::Pending => "Pending",
            InstallmentStatus::Paid => "Paid",
        };
        f.write_str(label)
    }
}

/// How a debt is repaid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RepaymentMethod {
    Installment,
    /// A single payment on the start date.
    LumpSum,
}

impl fmt::Display for RepaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RepaymentMethod::Installment => "Installments",
            RepaymentMethod::LumpSum => "Lump Sum",
        };
        f.write_str(label)
    }
}

/// Whether an entered amount is the debt total or the size of each installment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AmountBasis {
    #[default]
    Total,
    PerInstallment,
}

impl AmountBasis {
    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "total" => Some(AmountBasis::Total),
            "per" | "per-installment" | "per_installment" => Some(AmountBasis::PerInstallment),
            _ => None,
        }
    }
}

impl fmt::Display for AmountBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AmountBasis::Total => "Total",
            AmountBasis::PerInstallment => "Per Installment",
        };
        f.write_str(label)
    }
}
