//! Sort engine: comparator for the active sort key and direction.
//!
//! Text columns collate on a folded key (diacritics stripped, lowercased),
//! so "Pöttinger" sits next to "Puma" rather than after "Zetor". Ties fall
//! to the case-folded text and then the raw text, so "deere" and "Deere"
//! sit together but still order the same way every time. Missing values
//! read as "" or 0. When the primary key ties, records fall back to
//! ascending `id` regardless of direction.

use std::cmp::Ordering;

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use crate::model::{
    equipment::EquipmentRecord,
    filter_state::{SortKey, SortOrder},
};

/// Canonical decomposition with combining marks dropped, lowercased.
fn collation_key(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn case_fold(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(char::to_lowercase)
}

/// Accent- and case-insensitive comparison, then case-folded, then raw.
#[must_use]
pub fn compare_text(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(collation_key(b))
        .then_with(|| case_fold(a).cmp(case_fold(b)))
        .then_with(|| a.cmp(b))
}

/// Compares two records on `key` only, ascending.
#[must_use]
pub fn compare_by_key(key: SortKey, a: &EquipmentRecord, b: &EquipmentRecord) -> Ordering {
    match key {
        SortKey::Name => compare_text(a.name_str(), b.name_str()),
        SortKey::Manufacturer => compare_text(a.manufacturer_str(), b.manufacturer_str()),
        SortKey::Status => compare_text(a.status_str(), b.status_str()),
        SortKey::Type => compare_text(a.type_str(), b.type_str()),
        SortKey::Year => a
            .known_year()
            .unwrap_or_default()
            .cmp(&b.known_year().unwrap_or_default()),
    }
}

/// Full comparator: primary key in the requested direction, then `id`.
pub fn comparator(
    key: SortKey,
    order: SortOrder,
) -> impl Fn(&EquipmentRecord, &EquipmentRecord) -> Ordering + Copy {
    move |a: &EquipmentRecord, b: &EquipmentRecord| -> Ordering {
        let primary = compare_by_key(key, a, b);
        let primary = match order {
            SortOrder::Ascending => primary,
            SortOrder::Descending => primary.reverse(),
        };

        primary.then_with(|| a.id.cmp(&b.id))
    }
}

/// Sort borrowed records in place.
pub fn sort_records(records: &mut [&EquipmentRecord], key: SortKey, order: SortOrder) {
    let cmp = comparator(key, order);
    records.sort_unstable_by(|a, b| cmp(*a, *b));
}
