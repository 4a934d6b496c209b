//! Predicate composer: one boolean test per record, built from the current
//! `FilterState`.
//!
//! The test is a plain conjunction of independent sub-predicates (search,
//! category, one per facet). An empty facet set imposes no constraint.

use enum_map::EnumMap;

use crate::model::{
    equipment::EquipmentRecord,
    facet::{Facet, FacetSet},
    filter_state::{ALL_CATEGORIES, FilterState},
};

/// Borrowed view over a `FilterState`, ready to test records.
#[derive(Debug, Clone)]
pub struct Predicate<'a> {
    /// Lower-cased search term, `None` when empty
    needle: Option<String>,

    /// `None` when the category selection is `"all"`
    category: Option<&'a str>,

    facets: &'a EnumMap<Facet, FacetSet>,
}

impl<'a> Predicate<'a> {
    #[must_use]
    pub fn compose(state: &'a FilterState) -> Self {
        let term = state.search_term();
        let category = state.selected_category();

        Self {
            needle: (!term.is_empty()).then(|| term.to_lowercase()),
            category: (category != ALL_CATEGORIES).then_some(category),
            facets: state.facets(),
        }
    }

    /// Conjunction of every sub-predicate.
    #[must_use]
    pub fn matches(&self, record: &EquipmentRecord) -> bool {
        self.matches_search(record)
            && self.matches_category(record)
            && Facet::ALL
                .into_iter()
                .all(|facet| self.matches_facet(facet, record))
    }

    /// Case-insensitive substring match on name, manufacturer or model.
    #[must_use]
    pub fn matches_search(&self, record: &EquipmentRecord) -> bool {
        let Some(needle) = self.needle.as_deref() else {
            return true;
        };

        [record.name_str(), record.manufacturer_str(), record.model_str()]
            .into_iter()
            .any(|field| !field.is_empty() && field.to_lowercase().contains(needle))
    }

    #[must_use]
    pub fn matches_category(&self, record: &EquipmentRecord) -> bool {
        self.category
            .is_none_or(|category| record.category_str() == category)
    }

    #[must_use]
    pub fn matches_facet(&self, facet: Facet, record: &EquipmentRecord) -> bool {
        let selected = &self.facets[facet];
        selected.is_empty() || facet.record_in(record, selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fleet() -> Vec<EquipmentRecord> {
        vec![
            EquipmentRecord::new(1, "Tractor A")
                .with_status("operational")
                .with_year(2020)
                .with_manufacturer("John Deere")
                .with_category("field")
                .with_type("tractor"),
            EquipmentRecord::new(2, "Tractor B")
                .with_status("maintenance")
                .with_year(2018)
                .with_manufacturer("Kubota")
                .with_model("M7-172")
                .with_category("field")
                .with_type("tractor"),
            EquipmentRecord::new(3, "Harvester C")
                .with_status("operational")
                .with_year(2022)
                .with_manufacturer("Claas")
                .with_category("harvest")
                .with_type("combine"),
            EquipmentRecord::new(4, "Mystery"),
        ]
    }

    #[test]
    fn empty_state_matches_everything() {
        let state = FilterState::new();
        let predicate = Predicate::compose(&state);

        assert!(fleet().iter().all(|r| predicate.matches(r)));
    }

    #[test]
    fn search_covers_name_manufacturer_and_model() {
        let mut state = FilterState::new();
        let records = fleet();

        for (term, expected) in [("TRACTOR", vec!["1", "2"]), ("deere", vec!["1"]), ("m7", vec!["2"])] {
            state.set_search_term(term);
            let predicate = Predicate::compose(&state);
            let hits: Vec<String> = records
                .iter()
                .filter(|r| predicate.matches(r))
                .map(|r| r.id.to_string())
                .collect();

            assert_eq!(hits, expected, "term {term}");
        }
    }

    #[test]
    fn missing_manufacturer_is_excluded_without_panicking() {
        let mut state = FilterState::new();
        state.set_search_term("deere");
        let predicate = Predicate::compose(&state);

        assert!(!predicate.matches(&EquipmentRecord::new(4, "Mystery")));
    }

    #[test]
    fn empty_facets_are_neutral() {
        let mut state = FilterState::new();
        state.toggle_filter("status", "operational");
        let predicate = Predicate::compose(&state);

        for record in fleet() {
            for facet in [Facet::Type, Facet::Manufacturer, Facet::Year] {
                assert!(predicate.matches_facet(facet, &record));
            }
        }
    }

    #[test]
    fn missing_values_never_match_a_selection() {
        let mut state = FilterState::new();
        state.toggle_filter("year", 2020);
        let predicate = Predicate::compose(&state);

        assert!(!predicate.matches_facet(Facet::Year, &EquipmentRecord::new(9, "No year")));
        assert!(!predicate.matches_facet(Facet::Year, &EquipmentRecord::new(9, "Zero").with_year(0)));
    }

    #[test]
    fn matches_is_the_conjunction_of_its_parts() {
        let mut state = FilterState::new();
        state.set_search_term("a");
        state.set_selected_category("field");
        state.toggle_filter("status", "operational");
        state.toggle_filter("manufacturer", "John Deere");
        state.toggle_filter("manufacturer", "Claas");
        let predicate = Predicate::compose(&state);

        for record in fleet() {
            let expected = predicate.matches_search(&record)
                && predicate.matches_category(&record)
                && Facet::ALL.iter().all(|f| predicate.matches_facet(*f, &record));
            assert_eq!(predicate.matches(&record), expected);
        }
    }

    #[test]
    fn category_selection_requires_exact_match() {
        let mut state = FilterState::new();
        state.set_selected_category("harvest");
        let predicate = Predicate::compose(&state);
        let records = fleet();

        assert!(predicate.matches(&records[2]));
        assert!(!predicate.matches(&records[0]));
        assert!(!predicate.matches(&records[3]));
    }
}
