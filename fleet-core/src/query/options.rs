//! Facet option deriver.
//!
//! Scans the whole fleet (never the filtered subset, so users can always
//! widen a filter back out) and lists the distinct values per facet with
//! how many records carry each one.

use std::collections::BTreeMap;

use enum_map::EnumMap;
use tracing::debug;

use crate::{
    model::{
        equipment::EquipmentRecord,
        facet::{Facet, FacetValue},
    },
    query::sort::compare_text,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetOption {
    pub value: FacetValue,

    /// Records in the full collection with this value
    pub count: usize,
}

/// Distinct values per facet.
///
/// Text facets are ordered case-insensitively; years newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetOptions {
    by_facet: EnumMap<Facet, Vec<FacetOption>>,
}

impl FacetOptions {
    #[must_use]
    pub fn derive(records: &[EquipmentRecord]) -> Self {
        let mut counts: EnumMap<Facet, BTreeMap<FacetValue, usize>> = EnumMap::default();

        for record in records {
            for facet in Facet::ALL {
                if let Some(value) = facet.value_of(record) {
                    *counts[facet].entry(value).or_default() += 1;
                }
            }
        }

        let by_facet = EnumMap::from_fn(|facet: Facet| -> Vec<FacetOption> {
            let mut options: Vec<FacetOption> = std::mem::take(&mut counts[facet])
                .into_iter()
                .map(|(value, count)| FacetOption { value, count })
                .collect();

            match facet {
                Facet::Year => options.sort_by(|a, b| b.value.cmp(&a.value)),
                _ => options.sort_by(|a, b| {
                    compare_text(
                        a.value.as_text().unwrap_or_default(),
                        b.value.as_text().unwrap_or_default(),
                    )
                }),
            }

            options
        });

        debug!(
            records = records.len(),
            statuses = by_facet[Facet::Status].len(),
            types = by_facet[Facet::Type].len(),
            manufacturers = by_facet[Facet::Manufacturer].len(),
            years = by_facet[Facet::Year].len(),
            "derived facet options"
        );

        Self { by_facet }
    }

    #[must_use]
    pub fn get(&self, facet: Facet) -> &[FacetOption] {
        &self.by_facet[facet]
    }

    pub fn values(&self, facet: Facet) -> impl Iterator<Item = &FacetValue> {
        self.by_facet[facet].iter().map(|option| &option.value)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_facet.values().all(Vec::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fleet() -> Vec<EquipmentRecord> {
        vec![
            EquipmentRecord::new(1, "A").with_manufacturer("kubota").with_year(2018).with_status("operational"),
            EquipmentRecord::new(2, "B").with_manufacturer("John Deere").with_year(2022).with_status("repair"),
            EquipmentRecord::new(3, "C").with_manufacturer("Claas").with_year(2020).with_status("operational"),
            EquipmentRecord::new(4, "D").with_manufacturer("").with_year(0),
            EquipmentRecord::new(5, "E").with_manufacturer("John Deere").with_year(2022),
        ]
    }

    #[test]
    fn years_are_newest_first() {
        let options = FacetOptions::derive(&fleet());
        let years: Vec<&FacetValue> = options.values(Facet::Year).collect();

        assert_eq!(years, [&FacetValue::Year(2022), &FacetValue::Year(2020), &FacetValue::Year(2018)]);
    }

    #[test]
    fn text_values_are_distinct_counted_and_case_insensitive() {
        let options = FacetOptions::derive(&fleet());

        assert_eq!(
            options.get(Facet::Manufacturer),
            [
                FacetOption { value: "Claas".into(), count: 1 },
                FacetOption { value: "John Deere".into(), count: 2 },
                FacetOption { value: "kubota".into(), count: 1 },
            ]
        );
    }

    #[test]
    fn no_synthetic_empty_options() {
        let options = FacetOptions::derive(&fleet());

        assert!(options.get(Facet::Type).is_empty());
        assert!(options.values(Facet::Manufacturer).all(|v| v.as_text() != Some("")));
        assert_eq!(options.get(Facet::Status).len(), 2);
    }

    #[test]
    fn empty_fleet_has_no_options() {
        assert!(FacetOptions::derive(&[]).is_empty());
    }
}
