//! Facets: the independently toggleable filter dimensions.

use std::{collections::BTreeSet, fmt, str::FromStr};

use compact_str::{CompactString, ToCompactString};
use enum_map::Enum;

use crate::{error::FleetError, model::equipment::EquipmentRecord};

/// Filter dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Enum)]
pub enum Facet {
    Status,
    Type,
    Manufacturer,
    Year,
}

impl Facet {
    pub const ALL: [Self; 4] = [Self::Status, Self::Type, Self::Manufacturer, Self::Year];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::Type => "type",
            Self::Manufacturer => "manufacturer",
            Self::Year => "year",
        }
    }

    /// Human label for chips and picker headings.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Status => "Status",
            Self::Type => "Type",
            Self::Manufacturer => "Manufacturer",
            Self::Year => "Year",
        }
    }

    /// The record's value for this facet, if it has a usable one.
    ///
    /// Empty strings and unknown years yield `None`: they never become
    /// options and never match a non-empty selection.
    #[must_use]
    pub fn value_of(self, record: &EquipmentRecord) -> Option<FacetValue> {
        match self {
            Self::Status => FacetValue::text(record.status_str()),
            Self::Type => FacetValue::text(record.type_str()),
            Self::Manufacturer => FacetValue::text(record.manufacturer_str()),
            Self::Year => record.known_year().map(FacetValue::Year),
        }
    }

    /// Membership test against the raw record fields. A record without a
    /// value for this facet is never a member.
    #[must_use]
    pub fn record_in(self, record: &EquipmentRecord, selected: &FacetSet) -> bool {
        let probe = match self {
            Self::Status => record.status_str(),
            Self::Type => record.type_str(),
            Self::Manufacturer => record.manufacturer_str(),
            Self::Year => {
                return record
                    .known_year()
                    .is_some_and(|year| selected.contains(&FacetValue::Year(year)));
            }
        };

        !probe.is_empty() && selected.contains(&FacetValue::Text(CompactString::new(probe)))
    }

    /// Coerce a value coming from UI wiring into this facet's shape.
    ///
    /// Year pickers often hand back strings; `"2020"` becomes `Year(2020)`.
    #[must_use]
    pub fn normalize(self, value: FacetValue) -> FacetValue {
        match (self, value) {
            (Self::Year, FacetValue::Text(raw)) => match raw.trim().parse::<u32>() {
                Ok(year) => FacetValue::Year(year),
                Err(_) => FacetValue::Text(raw),
            },
            (Self::Year, year @ FacetValue::Year(_)) => year,
            (_, FacetValue::Year(year)) => FacetValue::Text(year.to_compact_string()),
            (_, text) => text,
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Facet {
    type Err = FleetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "status" => Ok(Self::Status),
            "type" => Ok(Self::Type),
            "manufacturer" => Ok(Self::Manufacturer),
            "year" => Ok(Self::Year),
            other => Err(FleetError::unknown_facet(other)),
        }
    }
}

/// A selectable facet value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FacetValue {
    Year(u32),
    Text(CompactString),
}

impl FacetValue {
    fn text(raw: &str) -> Option<Self> {
        (!raw.is_empty()).then(|| Self::Text(CompactString::new(raw)))
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Year(_) => None,
        }
    }
}

impl fmt::Display for FacetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Year(year) => write!(f, "{year}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for FacetValue {
    fn from(value: &str) -> Self {
        Self::Text(CompactString::new(value))
    }
}

impl From<u32> for FacetValue {
    fn from(value: u32) -> Self {
        Self::Year(value)
    }
}

/// Selected values for one facet. Ordered so chip lists are stable.
pub type FacetSet = BTreeSet<FacetValue>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facet_names_round_trip() {
        for facet in Facet::ALL {
            assert_eq!(facet.as_str().parse::<Facet>().unwrap(), facet);
        }
        assert!("colour".parse::<Facet>().is_err());
    }

    #[test]
    fn year_strings_normalize_to_numbers() {
        assert_eq!(Facet::Year.normalize("2020".into()), FacetValue::Year(2020));
        assert_eq!(Facet::Year.normalize("n/a".into()), FacetValue::from("n/a"));
        assert_eq!(Facet::Type.normalize(FacetValue::Year(7)), FacetValue::from("7"));
    }

    #[test]
    fn missing_fields_have_no_facet_value() {
        let record = EquipmentRecord::new(1, "Bare").with_year(0);

        for facet in Facet::ALL {
            assert_eq!(facet.value_of(&record), None);
        }
    }

    #[test]
    fn record_in_matches_raw_strings() {
        let record = EquipmentRecord::new(1, "Quad")
            .with_status("grounded")
            .with_year(2019);
        let statuses: FacetSet = [FacetValue::from("grounded")].into();
        let years: FacetSet = [FacetValue::Year(2019)].into();

        assert!(Facet::Status.record_in(&record, &statuses));
        assert!(Facet::Year.record_in(&record, &years));
        assert!(!Facet::Manufacturer.record_in(&record, &statuses));
    }
}
