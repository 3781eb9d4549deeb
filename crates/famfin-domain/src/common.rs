//! Shared traits for household records.

use uuid::Uuid;

/// Exposes a stable identifier for records stored in the household.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Provides read-only access to a record's display name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Associates a record with the household member that owns it.
pub trait OwnedByMember {
    fn member_id(&self) -> Uuid;
}

/// Supplies a common contract for retrieving currency amounts.
pub trait Amounted {
    fn amount(&self) -> u64;
}

/// Converts a record into a user-facing display label.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Sums the amounts of `items`; `None` when the sum does not fit in a `u64`.
pub fn checked_total<'a, T, I>(items: I) -> Option<u64>
where
    T: Amounted + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items
        .into_iter()
        .try_fold(0u64, |sum, item| sum.checked_add(item.amount()))
}

/// Records in `items` that belong to `member_id`.
pub fn owned_by<T: OwnedByMember>(items: &[T], member_id: Uuid) -> impl Iterator<Item = &T> {
    items.iter().filter(move |item| item.member_id() == member_id)
}
