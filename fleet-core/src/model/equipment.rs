//! ``fleet-core/src/model/equipment.rs``
//! ============================================================================
//! # `EquipmentRecord`: read-only fleet input
//!
//! Records arrive from the host's data loader (network, cache, fixture). The
//! engine never mutates them; auxiliary display fields ride along untouched
//! in `details`.

use std::{fmt, path::Path};

use compact_str::CompactString;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{FleetError, FleetResult};

/// Opaque record key. Never parsed, only compared.
///
/// Numeric ids order by value and sort ahead of string ids, so the
/// tie-break stays total even for mixed fleets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EquipmentId {
    Number(i64),
    Text(CompactString),
}

impl fmt::Display for EquipmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for EquipmentId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for EquipmentId {
    fn from(value: &str) -> Self {
        Self::Text(CompactString::new(value))
    }
}

/// Equipment status.
///
/// The dashboard only ever writes the four known states, but persisted data
/// may carry others. Those are kept verbatim in `Other` so filtering and
/// sorting still see the raw string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EquipmentStatus {
    Operational,
    Maintenance,
    Repair,
    Inactive,
    Other(CompactString),
}

impl EquipmentStatus {
    /// Raw value as stored, used for comparisons and facet values.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Operational => "operational",
            Self::Maintenance => "maintenance",
            Self::Repair => "repair",
            Self::Inactive => "inactive",
            Self::Other(raw) => raw,
        }
    }

    /// Whether the value is one of the modeled states. Display code uses
    /// this to pick a badge; the engine never does.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<&str> for EquipmentStatus {
    fn from(raw: &str) -> Self {
        match raw {
            "operational" => Self::Operational,
            "maintenance" => Self::Maintenance,
            "repair" => Self::Repair,
            "inactive" => Self::Inactive,
            other => Self::Other(CompactString::new(other)),
        }
    }
}

impl From<String> for EquipmentStatus {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

impl From<EquipmentStatus> for String {
    fn from(status: EquipmentStatus) -> Self {
        status.as_str().to_owned()
    }
}

impl fmt::Display for EquipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One piece of equipment as the dashboard knows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentRecord {
    pub id: EquipmentId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<CompactString>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub equipment_type: Option<CompactString>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CompactString>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<CompactString>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<CompactString>,

    /// `0` in source data means "unknown", same as absent. Form-entered
    /// values that are not a non-negative integer read as absent too.
    #[serde(
        default,
        deserialize_with = "lenient_year",
        skip_serializing_if = "Option::is_none"
    )]
    pub year: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EquipmentStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<CompactString>,

    /// Display-only fields (`usage`, `nextService`, `image`, `serialNumber`,
    /// `purchaseDate`, `lastMaintenance`, ...). Passed through as-is.
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl EquipmentRecord {
    #[must_use]
    pub fn new(id: impl Into<EquipmentId>, name: &str) -> Self {
        Self {
            id: id.into(),
            name: Some(CompactString::new(name)),
            equipment_type: None,
            category: None,
            manufacturer: None,
            model: None,
            year: None,
            status: None,
            location: None,
            details: Map::new(),
        }
    }

    #[must_use]
    pub fn with_type(mut self, equipment_type: &str) -> Self {
        self.equipment_type = Some(CompactString::new(equipment_type));
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(CompactString::new(category));
        self
    }

    #[must_use]
    pub fn with_manufacturer(mut self, manufacturer: &str) -> Self {
        self.manufacturer = Some(CompactString::new(manufacturer));
        self
    }

    #[must_use]
    pub fn with_model(mut self, model: &str) -> Self {
        self.model = Some(CompactString::new(model));
        self
    }

    #[must_use]
    pub const fn with_year(mut self, year: u32) -> Self {
        self.year = Some(year);
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: impl Into<EquipmentStatus>) -> Self {
        self.status = Some(status.into());
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: &str) -> Self {
        self.location = Some(CompactString::new(location));
        self
    }

    // Missing text reads as "" so search never has to special-case it.

    #[must_use]
    pub fn name_str(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn type_str(&self) -> &str {
        self.equipment_type.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn category_str(&self) -> &str {
        self.category.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn manufacturer_str(&self) -> &str {
        self.manufacturer.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn model_str(&self) -> &str {
        self.model.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn status_str(&self) -> &str {
        self.status.as_ref().map_or("", EquipmentStatus::as_str)
    }

    /// Model year, with `0` folded into `None`.
    #[must_use]
    pub fn known_year(&self) -> Option<u32> {
        self.year.filter(|year| *year != 0)
    }
}

fn lenient_year<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let year = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64().and_then(|y| u32::try_from(y).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(year)
}

/// Parse a JSON array of records as served by the dashboard API.
pub fn records_from_json(json: &str) -> FleetResult<Vec<EquipmentRecord>> {
    let records: Vec<EquipmentRecord> = serde_json::from_str(json)?;
    debug!(count = records.len(), "parsed equipment records");
    Ok(records)
}

/// Read a JSON fixture from disk.
pub fn load_records(path: &Path) -> FleetResult<Vec<EquipmentRecord>> {
    let text = std::fs::read_to_string(path).map_err(|e| FleetError::record_io(path, e))?;
    records_from_json(&text)
}
