use std::fs;

use famfin_core::{
    debt_service::{DebtDraft, DebtService},
    storage::HouseholdStorage,
    CoreError,
};
use famfin_domain::{jalali_to_gregorian, AmountBasis, Household, Member, RepaymentMethod};
use famfin_storage_json::JsonHouseholdStorage;
use tempfile::tempdir;

fn sample_household() -> Household {
    let mut household = Household::new("Rahimi");
    let member = household.put_member(Member::new("Ali", "self"));
    DebtService::save(
        &mut household,
        None,
        DebtDraft {
            member_id: member,
            name: "Car loan".into(),
            repayment_method: RepaymentMethod::Installment,
            basis: AmountBasis::Total,
            amount: 12_000_000,
            installment_count: 4,
            start_date: jalali_to_gregorian(1403, 1, 1).expect("date"),
            description: Some("dealer financing".into()),
        },
    )
    .expect("save debt");
    household
}

#[test]
fn missing_file_loads_an_empty_household() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonHouseholdStorage::new(dir.path().to_path_buf()).expect("create storage");

    let household = storage.load().expect("load");
    assert!(household.is_empty());
    assert!(!storage.household_path().exists());
}

#[test]
fn json_storage_can_save_and_load_household() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonHouseholdStorage::new(dir.path().to_path_buf()).expect("create storage");
    let household = sample_household();

    storage.save(&household).expect("save household");
    let loaded = storage.load().expect("load household");

    assert_eq!(loaded.name, "Rahimi");
    assert_eq!(loaded.members, household.members);
    assert_eq!(loaded.debts, household.debts);
    assert_eq!(loaded.debts[0].installments.len(), 4);
    assert!(!dir.path().join("household.json.tmp").exists());
}

#[test]
fn saving_over_an_existing_file_keeps_a_backup() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonHouseholdStorage::new(dir.path().to_path_buf()).expect("create storage");

    storage.save(&Household::new("First")).expect("first save");
    assert!(storage.list_backups().expect("list").is_empty());

    storage.save(&sample_household()).expect("second save");
    let backups = storage.list_backups().expect("list");
    assert_eq!(backups.len(), 1);
    let data = fs::read_to_string(&backups[0].path).expect("read backup");
    assert!(data.contains("\"First\""));
}

#[test]
fn backups_are_pruned_to_retention() {
    let dir = tempdir().expect("tempdir");
    let storage =
        JsonHouseholdStorage::with_retention(dir.path().to_path_buf(), 2).expect("create storage");
    for stamp in ["20240101_080000", "20240102_080000", "20240103_080000"] {
        fs::write(
            storage.backups_dir().join(format!("household_{stamp}.json")),
            "{}",
        )
        .expect("seed backup");
    }

    storage.save(&Household::new("One")).expect("save");
    storage.save(&Household::new("Two")).expect("save");

    let backups = storage.list_backups().expect("list");
    assert_eq!(backups.len(), 2);
    assert!(!backups[0].id.starts_with("household_202401"));
    assert_eq!(backups[1].id, "household_20240103_080000.json");
    assert!(!storage
        .backups_dir()
        .join("household_20240101_080000.json")
        .exists());
}

#[test]
fn corrupt_file_reports_serde_error() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonHouseholdStorage::new(dir.path().to_path_buf()).expect("create storage");
    fs::write(storage.household_path(), "[not a household").expect("write");

    assert!(matches!(storage.load(), Err(CoreError::Serde(_))));
}
