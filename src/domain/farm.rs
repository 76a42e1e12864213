// Farm location domain model
use super::environment::{lenient, EnvironmentalData};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Farmer {
    pub first_name: String,
    pub last_name: String,
}

impl Farmer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}

/// Decimal-degree coordinates plus optional place names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmLocation {
    pub id: String,
    pub farmer: Farmer,
    pub location: Location,
    #[serde(default)]
    pub is_self: bool,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub environmental_data: Option<EnvironmentalData>,
}

impl FarmLocation {
    /// Name to show on a map marker: the place name if known, else the farmer.
    pub fn display_name(&self) -> String {
        match &self.location.name {
            Some(name) if !name.trim().is_empty() => name.trim().to_string(),
            _ => self.farmer.full_name(),
        }
    }
}
