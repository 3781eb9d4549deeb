use famfin_domain::{Household, Member};
use tracing::info;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};

pub struct MemberService;

impl MemberService {
    pub fn add(household: &mut Household, member: Member) -> CoreResult<Uuid> {
        Self::validate_name(household, None, &member.name)?;
        let id = household.put_member(member);
        info!(member = %id, "added member");
        Ok(id)
    }

    pub fn edit(household: &mut Household, id: Uuid, changes: Member) -> CoreResult<()> {
        Self::validate_name(household, Some(id), &changes.name)?;
        if household.member(id).is_none() {
            return Err(CoreError::MemberNotFound(id.to_string()));
        }
        household.put_member(Member { id, ..changes });
        Ok(())
    }

    /// Members that still own assets, debts, or incomes cannot be removed.
    pub fn remove(household: &mut Household, id: Uuid) -> CoreResult<()> {
        let linked = household.assets.iter().any(|asset| asset.member_id == id)
            || household.debts.iter().any(|debt| debt.member_id == id)
            || household.incomes.iter().any(|income| income.member_id == id);
        if linked {
            return Err(CoreError::Validation(
                "Member has linked assets, debts, or incomes".into(),
            ));
        }
        if !household.delete_member(id) {
            return Err(CoreError::MemberNotFound(id.to_string()));
        }
        info!(member = %id, "removed member");
        Ok(())
    }

    /// Looks a member up by id or by exact name.
    pub fn resolve(household: &Household, key: &str) -> CoreResult<Uuid> {
        if let Ok(id) = Uuid::parse_str(key.trim()) {
            if household.member(id).is_some() {
                return Ok(id);
            }
        }
        household
            .member_named(key)
            .map(|member| member.id)
            .ok_or_else(|| CoreError::MemberNotFound(key.to_string()))
    }

    fn validate_name(household: &Household, exclude: Option<Uuid>, candidate: &str) -> CoreResult<()> {
        let normalized = candidate.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(CoreError::Validation("Member name must not be empty".into()));
        }
        let duplicate = household.members.iter().any(|member| {
            member.name.trim().to_lowercase() == normalized && exclude.map_or(true, |id| member.id != id)
        });
        if duplicate {
            Err(CoreError::Validation(format!("Member `{}` already exists", candidate.trim())))
        } else {
            Ok(())
        }
    }
}
