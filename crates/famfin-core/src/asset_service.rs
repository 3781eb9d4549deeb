use famfin_domain::{checked_total, Asset, Household};
use tracing::info;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};

pub struct AssetService;

impl AssetService {
    pub fn add(household: &mut Household, asset: Asset) -> CoreResult<Uuid> {
        if asset.name.trim().is_empty() {
            return Err(CoreError::Validation("Asset name must not be empty".into()));
        }
        if household.member(asset.member_id).is_none() {
            return Err(CoreError::MemberNotFound(asset.member_id.to_string()));
        }
        let id = household.put_asset(asset);
        info!(asset = %id, "added asset");
        Ok(id)
    }

    pub fn remove(household: &mut Household, id: Uuid) -> CoreResult<()> {
        if household.delete_asset(id) {
            info!(asset = %id, "removed asset");
            Ok(())
        } else {
            Err(CoreError::AssetNotFound(id))
        }
    }

    pub fn total(household: &Household) -> CoreResult<u64> {
        checked_total(&household.assets)
            .ok_or_else(|| CoreError::Validation("Asset amounts overflow the household total".into()))
    }
}

#[cfg(test)]
mod tests {
    use famfin_domain::{AssetKind, Member};

    use super::*;

    #[test]
    fn assets_need_an_owner() {
        let mut household = Household::default();
        let orphan = Asset::new(Uuid::new_v4(), "Gold coins", AssetKind::Gold, 50);
        assert!(matches!(
            AssetService::add(&mut household, orphan),
            Err(CoreError::MemberNotFound(_))
        ));

        let owner = household.put_member(Member::new("Ali", "self"));
        AssetService::add(&mut household, Asset::new(owner, "Gold coins", AssetKind::Gold, 50)).unwrap();
        AssetService::add(&mut household, Asset::new(owner, "Pride", AssetKind::Car, 700)).unwrap();
        assert_eq!(AssetService::total(&household).unwrap(), 750);
    }

    #[test]
    fn removing_missing_asset_fails() {
        let mut household = Household::default();
        assert!(matches!(
            AssetService::remove(&mut household, Uuid::nil()),
            Err(CoreError::AssetNotFound(_))
        ));
    }
}
