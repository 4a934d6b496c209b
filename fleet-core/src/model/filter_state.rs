//! ``fleet-core/src/model/filter_state.rs``
//! ============================================================================
//! # `FilterState`: the query engine's single source of truth
//!
//! Holds the free-text search, the category selection, one value set per
//! facet and the sort settings. Mutated only through the methods below;
//! every visible list is a pure function of this state plus the records.

use std::{fmt, str::FromStr};

use compact_str::CompactString;
use enum_map::EnumMap;
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::{
    config::QueryConfig,
    error::FleetError,
    model::facet::{Facet, FacetSet, FacetValue},
};

/// Category value meaning "no category constraint".
pub const ALL_CATEGORIES: &str = "all";

/// Column the visible list is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Name,
    Manufacturer,
    Year,
    Status,
    Type,
}

impl SortKey {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Manufacturer => "manufacturer",
            Self::Year => "year",
            Self::Status => "status",
            Self::Type => "type",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = FleetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "manufacturer" => Ok(Self::Manufacturer),
            "year" => Ok(Self::Year),
            "status" => Ok(Self::Status),
            "type" => Ok(Self::Type),
            other => Err(FleetError::UnknownSortKey(CompactString::new(other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    #[serde(alias = "asc")]
    Ascending,

    #[serde(alias = "desc")]
    Descending,
}

impl SortOrder {
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'_ str = match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        };

        write!(f, "{s}")
    }
}

impl FromStr for SortOrder {
    type Err = FleetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            other => Err(FleetError::UnknownSortOrder(CompactString::new(other))),
        }
    }
}

/// Search, category, facet selections and sort settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    search_term: CompactString,

    selected_category: CompactString,

    facets: EnumMap<Facet, FacetSet>,

    sort_by: SortKey,

    sort_order: SortOrder,
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterState {
    /// Empty search, `"all"` categories, no facet selections, sort by name
    /// ascending.
    #[must_use]
    pub fn new() -> Self {
        Self {
            search_term: CompactString::default(),
            selected_category: CompactString::const_new(ALL_CATEGORIES),
            facets: EnumMap::default(),
            sort_by: SortKey::default(),
            sort_order: SortOrder::default(),
        }
    }

    /// Initial state with the configured default sort.
    #[must_use]
    pub fn from_config(config: &QueryConfig) -> Self {
        Self {
            sort_by: config.default_sort_by,
            sort_order: config.default_sort_order,
            ..Self::new()
        }
    }

    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    #[must_use]
    pub fn selected_category(&self) -> &str {
        &self.selected_category
    }

    #[must_use]
    pub const fn sort_by(&self) -> SortKey {
        self.sort_by
    }

    #[must_use]
    pub const fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    /// Selected values for one facet.
    #[must_use]
    pub fn facet(&self, facet: Facet) -> &FacetSet {
        &self.facets[facet]
    }

    #[must_use]
    pub const fn facets(&self) -> &EnumMap<Facet, FacetSet> {
        &self.facets
    }

    /// Number of individually selected facet values. Search term and
    /// category are not counted.
    #[must_use]
    pub fn active_filter_count(&self) -> usize {
        self.facets.values().map(FacetSet::len).sum()
    }

    // ────────────────────────────────────────────────────────────
    // Typed operations
    // ────────────────────────────────────────────────────────────

    /// Flip membership of `value` in `facet`. Returns whether the value is
    /// selected afterwards.
    pub fn toggle(&mut self, facet: Facet, value: FacetValue) -> bool {
        let value = facet.normalize(value);
        let selected = &mut self.facets[facet];

        let now_active = if selected.remove(&value) {
            false
        } else {
            selected.insert(value);
            true
        };

        trace!(%facet, active = now_active, count = selected.len(), "toggled facet value");
        now_active
    }

    #[must_use]
    pub fn is_active(&self, facet: Facet, value: &FacetValue) -> bool {
        self.facets[facet].contains(&facet.normalize(value.clone()))
    }

    /// Empty one facet, or every facet when `facet` is `None`.
    pub fn clear(&mut self, facet: Option<Facet>) {
        match facet {
            Some(facet) => self.facets[facet].clear(),
            None => self.facets.values_mut().for_each(FacetSet::clear),
        }
    }

    // ────────────────────────────────────────────────────────────
    // Name-based operations for UI wiring. Unknown facet names are
    // logged and ignored.
    // ────────────────────────────────────────────────────────────

    pub fn toggle_filter(&mut self, facet: &str, value: impl Into<FacetValue>) {
        match facet.parse::<Facet>() {
            Ok(facet) => {
                self.toggle(facet, value.into());
            }
            Err(e) => warn!(error = %e, "ignoring toggle on unsupported facet"),
        }
    }

    #[must_use]
    pub fn is_filter_active(&self, facet: &str, value: impl Into<FacetValue>) -> bool {
        facet
            .parse::<Facet>()
            .is_ok_and(|facet| self.is_active(facet, &value.into()))
    }

    pub fn clear_filters(&mut self, facet: Option<&str>) {
        match facet.map(str::parse::<Facet>) {
            None => self.clear(None),
            Some(Ok(facet)) => self.clear(Some(facet)),
            Some(Err(e)) => warn!(error = %e, "ignoring clear on unsupported facet"),
        }
    }

    /// Back to the initial filters: empty search, all categories, no facet
    /// selections. Sort settings are a view preference and survive.
    pub fn reset_all(&mut self) {
        self.search_term.clear();
        self.selected_category = CompactString::const_new(ALL_CATEGORIES);
        self.clear(None);
    }

    // ────────────────────────────────────────────────────────────
    // Setters
    // ────────────────────────────────────────────────────────────

    pub fn set_search_term(&mut self, term: &str) {
        self.search_term = CompactString::new(term);
    }

    pub fn set_selected_category(&mut self, category: &str) {
        self.selected_category = CompactString::new(category);
    }

    pub const fn set_sort_by(&mut self, key: SortKey) {
        self.sort_by = key;
    }

    pub const fn set_sort_order(&mut self, order: SortOrder) {
        self.sort_order = order;
    }

    pub const fn toggle_sort_order(&mut self) {
        self.sort_order = self.sort_order.reversed();
    }

    /// Column-header click: the active column flips direction, any other
    /// column becomes active in ascending order.
    pub fn sort_by_column(&mut self, key: SortKey) {
        if self.sort_by == key {
            self.toggle_sort_order();
        } else {
            self.sort_by = key;
            self.sort_order = SortOrder::Ascending;
        }
    }
}
