//! Active-filter summary: the badge count and the removable chips.

use std::fmt;

use smallvec::SmallVec;

use crate::model::{
    facet::{Facet, FacetValue},
    filter_state::FilterState,
};

/// One selected facet value, removable by toggling it again.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilterChip {
    pub facet: Facet,
    pub value: FacetValue,
}

impl FilterChip {
    /// `Facet: value`, as shown on the chip.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}: {}", self.facet.label(), self.value)
    }

    /// Remove this chip's value from `state`.
    pub fn remove_from(&self, state: &mut FilterState) {
        if state.is_active(self.facet, &self.value) {
            state.toggle(self.facet, self.value.clone());
        }
    }
}

impl fmt::Display for FilterChip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.facet, self.value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSummary {
    pub count: usize,

    /// Facet order, then value order within a facet
    pub chips: SmallVec<[FilterChip; 8]>,
}

impl FilterSummary {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Count and chips for the facet selections. Search term and category are
/// tracked elsewhere and never show up here.
#[must_use]
pub fn summarize(state: &FilterState) -> FilterSummary {
    let chips: SmallVec<[FilterChip; 8]> = state
        .facets()
        .iter()
        .flat_map(|(facet, values)| {
            values.iter().map(move |value| FilterChip {
                facet,
                value: value.clone(),
            })
        })
        .collect();

    FilterSummary {
        count: chips.len(),
        chips,
    }
}
