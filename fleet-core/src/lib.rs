//! Equipment fleet query engine.
//!
//! Takes the raw equipment collection plus the user's search, category,
//! facet and sort selections and produces the list to display, the facet
//! options for pickers and the active-filter chips.

pub mod error;

pub mod config;

pub mod controller {
    pub mod actions;
    pub use actions::FilterAction;
}

pub mod model {
    pub mod equipment;
    pub use equipment::{EquipmentId, EquipmentRecord, EquipmentStatus};

    pub mod facet;
    pub use facet::{Facet, FacetSet, FacetValue};

    pub mod filter_state;
    pub use filter_state::{ALL_CATEGORIES, FilterState, SortKey, SortOrder};
}

pub mod query {
    pub mod executor;
    pub use executor::{ExecutorStats, QueryExecutor, VisibleList, execute};

    pub mod options;
    pub use options::{FacetOption, FacetOptions};

    pub mod predicate;
    pub use predicate::Predicate;

    pub mod sort;
    pub use sort::comparator;

    pub mod summary;
    pub use summary::{FilterChip, FilterSummary, summarize};
}

pub mod logging;
pub use logging::Logger;

pub use config::Config;
pub use error::{FleetError, FleetResult};

pub use model::{EquipmentRecord, FilterState};
pub use query::QueryExecutor;
