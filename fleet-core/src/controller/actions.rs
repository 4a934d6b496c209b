//! fleet-core/src/controller/actions.rs
//! ============================================================================
//! # Actions: queued filter mutations
//!
//! UI widgets emit `FilterAction`s instead of touching `FilterState`
//! directly. Applying a batch runs each action against the state left by
//! the previous one, so rapid clicks queued before a recompute are never
//! lost to a stale snapshot.

use compact_str::CompactString;
use tracing::trace;

use crate::model::{
    facet::FacetValue,
    filter_state::{FilterState, SortKey, SortOrder},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterAction {
    /// Flip a facet value. Facet is a UI name; unknown names are ignored.
    ToggleFilter {
        facet: CompactString,
        value: FacetValue,
    },

    /// Empty one facet, or all of them.
    ClearFilters(Option<CompactString>),

    ResetAll,

    SetSearchTerm(CompactString),

    SetCategory(CompactString),

    SetSortBy(SortKey),

    SetSortOrder(SortOrder),

    ToggleSortOrder,

    /// Header click on a sortable column.
    SortByColumn(SortKey),
}

impl FilterAction {
    #[must_use]
    pub fn toggle(facet: &str, value: impl Into<FacetValue>) -> Self {
        Self::ToggleFilter {
            facet: CompactString::new(facet),
            value: value.into(),
        }
    }

    #[must_use]
    pub fn search(term: &str) -> Self {
        Self::SetSearchTerm(CompactString::new(term))
    }

    #[must_use]
    pub fn category(category: &str) -> Self {
        Self::SetCategory(CompactString::new(category))
    }
}

impl FilterState {
    pub fn apply(&mut self, action: FilterAction) {
        trace!(?action, "applying filter action");

        match action {
            FilterAction::ToggleFilter { facet, value } => self.toggle_filter(&facet, value),
            FilterAction::ClearFilters(facet) => self.clear_filters(facet.as_deref()),
            FilterAction::ResetAll => self.reset_all(),
            FilterAction::SetSearchTerm(term) => self.set_search_term(&term),
            FilterAction::SetCategory(category) => self.set_selected_category(&category),
            FilterAction::SetSortBy(key) => self.set_sort_by(key),
            FilterAction::SetSortOrder(order) => self.set_sort_order(order),
            FilterAction::ToggleSortOrder => self.toggle_sort_order(),
            FilterAction::SortByColumn(key) => self.sort_by_column(key),
        }
    }

    /// Apply actions in order, each against the latest state.
    pub fn apply_all<I>(&mut self, actions: I)
    where
        I: IntoIterator<Item = FilterAction>,
    {
        for action in actions {
            self.apply(action);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::facet::Facet;

    #[test]
    fn queued_toggles_are_all_applied() {
        let mut state = FilterState::new();

        state.apply_all([
            FilterAction::toggle("status", "operational"),
            FilterAction::toggle("status", "repair"),
            FilterAction::toggle("manufacturer", "Claas"),
        ]);

        assert_eq!(state.facet(Facet::Status).len(), 2);
        assert_eq!(state.active_filter_count(), 3);
    }

    #[test]
    fn double_click_cancels_out() {
        let mut state = FilterState::new();

        state.apply_all([FilterAction::toggle("year", 2021), FilterAction::toggle("year", "2021")]);

        assert_eq!(state, FilterState::new());
    }

    #[test]
    fn actions_mirror_direct_calls() {
        let mut via_actions = FilterState::new();
        via_actions.apply_all([
            FilterAction::search("deere"),
            FilterAction::category("field"),
            FilterAction::toggle("type", "tractor"),
            FilterAction::toggle("colour", "green"),
            FilterAction::SortByColumn(SortKey::Year),
            FilterAction::ToggleSortOrder,
            FilterAction::ClearFilters(Some("type".into())),
        ]);

        let mut direct = FilterState::new();
        direct.set_search_term("deere");
        direct.set_selected_category("field");
        direct.set_sort_by(SortKey::Year);
        direct.set_sort_order(SortOrder::Descending);

        assert_eq!(via_actions, direct);

        via_actions.apply(FilterAction::ResetAll);
        assert_eq!(via_actions.search_term(), "");
    }
}
