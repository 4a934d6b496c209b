//! ``fleet-core/src/query/executor.rs``
//! ============================================================================
//! # Query executor
//!
//! Filters with the composed predicate, then orders with the sort engine.
//! `execute` is the pure form. `QueryExecutor` memoizes it on the full
//! input: the collection is compared by `Arc` identity (hosts replace it
//! wholesale, never patch it) and the filter state by value.

use std::{ops::Index, sync::Arc};

use tracing::{debug, trace};

use crate::{
    model::{equipment::EquipmentRecord, filter_state::FilterState},
    query::{options::FacetOptions, predicate::Predicate, sort::comparator},
};

/// Positions into `records` of the visible rows, in display order.
#[must_use]
pub fn visible_indices(records: &[EquipmentRecord], state: &FilterState) -> Vec<usize> {
    let predicate = Predicate::compose(state);
    let cmp = comparator(state.sort_by(), state.sort_order());

    let mut indices: Vec<usize> = records
        .iter()
        .enumerate()
        .filter_map(|(idx, record)| predicate.matches(record).then_some(idx))
        .collect();

    // duplicate ids fall back to input position
    indices.sort_unstable_by(|&a, &b| cmp(&records[a], &records[b]).then(a.cmp(&b)));
    indices
}

/// Filtered and sorted view of `records`.
#[must_use]
pub fn execute<'a>(records: &'a [EquipmentRecord], state: &FilterState) -> Vec<&'a EquipmentRecord> {
    visible_indices(records, state)
        .into_iter()
        .map(|idx| &records[idx])
        .collect()
}

/// Cheaply cloneable result of a query.
#[derive(Debug, Clone)]
pub struct VisibleList {
    records: Arc<[EquipmentRecord]>,
    order: Arc<[usize]>,
}

impl VisibleList {
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[must_use]
    pub fn get(&self, position: usize) -> Option<&EquipmentRecord> {
        self.order.get(position).map(|&idx| &self.records[idx])
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &EquipmentRecord> {
        self.order.iter().map(|&idx| &self.records[idx])
    }

    /// Whether two lists are the very same memoized result.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.order, &other.order) && Arc::ptr_eq(&self.records, &other.records)
    }
}

impl Index<usize> for VisibleList {
    type Output = EquipmentRecord;

    fn index(&self, position: usize) -> &Self::Output {
        &self.records[self.order[position]]
    }
}

impl PartialEq for VisibleList {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecutorStats {
    pub hits: u64,
    pub misses: u64,
    pub option_hits: u64,
    pub option_misses: u64,
}

#[derive(Debug)]
struct CachedQuery {
    state: FilterState,
    visible: VisibleList,
}

#[derive(Debug)]
struct CachedOptions {
    records: Arc<[EquipmentRecord]>,
    options: Arc<FacetOptions>,
}

/// Memoizing front for `execute` and `FacetOptions::derive`.
#[derive(Debug, Default)]
pub struct QueryExecutor {
    last_query: Option<CachedQuery>,
    last_options: Option<CachedOptions>,
    stats: ExecutorStats,
}

impl QueryExecutor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Visible list for `(records, state)`, recomputed only when either
    /// input differs from the previous call.
    pub fn visible(&mut self, records: &Arc<[EquipmentRecord]>, state: &FilterState) -> VisibleList {
        if let Some(cached) = &self.last_query
            && Arc::ptr_eq(&cached.visible.records, records)
            && cached.state == *state
        {
            self.stats.hits += 1;
            trace!(rows = cached.visible.len(), "visible list cache hit");
            return cached.visible.clone();
        }

        self.stats.misses += 1;
        let visible = VisibleList {
            records: Arc::clone(records),
            order: visible_indices(records, state).into(),
        };

        debug!(
            total = records.len(),
            visible = visible.len(),
            sort_by = %state.sort_by(),
            sort_order = %state.sort_order(),
            active_filters = state.active_filter_count(),
            "recomputed visible list"
        );

        self.last_query = Some(CachedQuery {
            state: state.clone(),
            visible: visible.clone(),
        });

        visible
    }

    /// Facet options for `records`, recomputed only when the collection is
    /// replaced. Independent of any filter state.
    pub fn facet_options(&mut self, records: &Arc<[EquipmentRecord]>) -> Arc<FacetOptions> {
        if let Some(cached) = &self.last_options
            && Arc::ptr_eq(&cached.records, records)
        {
            self.stats.option_hits += 1;
            return Arc::clone(&cached.options);
        }

        self.stats.option_misses += 1;
        let options = Arc::new(FacetOptions::derive(records));

        self.last_options = Some(CachedOptions {
            records: Arc::clone(records),
            options: Arc::clone(&options),
        });

        options
    }

    #[must_use]
    pub const fn stats(&self) -> ExecutorStats {
        self.stats
    }

    /// Drop memoized results, e.g. when the host knows records were edited
    /// in place behind a shared `Arc`.
    pub fn invalidate(&mut self) {
        self.last_query = None;
        self.last_options = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::filter_state::{SortKey, SortOrder};
    use pretty_assertions::assert_eq;

    fn fleet() -> Arc<[EquipmentRecord]> {
        vec![
            EquipmentRecord::new(1, "Tractor A").with_status("operational").with_year(2020),
            EquipmentRecord::new(2, "Tractor B").with_status("maintenance").with_year(2018),
            EquipmentRecord::new(3, "Harvester C").with_status("operational").with_year(2022),
        ]
        .into()
    }

    fn names(list: &VisibleList) -> Vec<&str> {
        list.iter().map(EquipmentRecord::name_str).collect()
    }

    #[test]
    fn identical_inputs_hit_the_cache() {
        let records = fleet();
        let mut state = FilterState::new();
        state.set_search_term("tractor");
        let mut executor = QueryExecutor::new();

        let first = executor.visible(&records, &state);
        let second = executor.visible(&records, &state.clone());

        assert!(first.ptr_eq(&second));
        assert_eq!(executor.stats().hits, 1);
        assert_eq!(executor.stats().misses, 1);
    }

    #[test]
    fn any_state_change_recomputes() {
        let records = fleet();
        let mut state = FilterState::new();
        let mut executor = QueryExecutor::new();

        let by_name = executor.visible(&records, &state);
        state.set_sort_by(SortKey::Year);
        state.set_sort_order(SortOrder::Descending);
        let by_year = executor.visible(&records, &state);

        assert_eq!(names(&by_name), ["Harvester C", "Tractor A", "Tractor B"]);
        assert_eq!(names(&by_year), ["Harvester C", "Tractor A", "Tractor B"]);
        assert!(!by_name.ptr_eq(&by_year));
        assert_eq!(executor.stats().misses, 2);
    }

    #[test]
    fn replaced_collection_recomputes_even_when_equal() {
        let mut executor = QueryExecutor::new();
        let state = FilterState::new();

        let a = executor.visible(&fleet(), &state);
        let b = executor.visible(&fleet(), &state);

        assert_eq!(a, b);
        assert!(!a.ptr_eq(&b));
        assert_eq!(executor.stats().hits, 0);
    }

    #[test]
    fn facet_options_ignore_filter_state() {
        let records = fleet();
        let mut executor = QueryExecutor::new();

        let first = executor.facet_options(&records);
        let again = executor.facet_options(&records);

        assert!(Arc::ptr_eq(&first, &again));
        assert_eq!(executor.stats().option_misses, 1);

        executor.invalidate();
        let _ = executor.facet_options(&records);
        assert_eq!(executor.stats().option_misses, 2);
    }

    #[test]
    fn pure_execute_matches_memoized_result() {
        let records = fleet();
        let mut state = FilterState::new();
        state.toggle_filter("status", "operational");
        let mut executor = QueryExecutor::new();

        let pure: Vec<&EquipmentRecord> = execute(&records, &state);
        let memo = executor.visible(&records, &state);

        assert_eq!(pure, memo.iter().collect::<Vec<_>>());
        assert_eq!(memo[0].name_str(), "Harvester C");
        assert_eq!(memo.get(2), None);
    }
}
