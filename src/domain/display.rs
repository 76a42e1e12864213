// UI-ready shapes derived from environmental readings
use super::environment::{BlightType, RiskLevel};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskDisplay {
    pub level: RiskLevel,
    pub label: &'static str,
    pub color: &'static str,
}

impl RiskDisplay {
    pub fn new(level: RiskLevel) -> Self {
        Self {
            level,
            label: level.label(),
            color: level.color(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayDeltas {
    pub temperature: Option<String>,
    pub humidity: Option<String>,
    pub rainfall: Option<String>,
    pub soil_moisture: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DisplayChanges {
    pub daily: Option<DisplayDeltas>,
    pub weekly: Option<DisplayDeltas>,
}

/// A reading ready to render. Metrics are display strings with units;
/// `None` means there is no data for that metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayData {
    pub cri: f64,
    pub risk: RiskDisplay,
    pub blight_type: Option<BlightType>,
    pub blight_label: Option<&'static str>,
    pub temperature: Option<String>,
    pub humidity: Option<String>,
    pub rainfall: Option<String>,
    pub soil_moisture: Option<String>,
    pub date: Option<String>,
    pub changes: Option<DisplayChanges>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub name: String,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    pub fn new(name: String, points: Vec<ChartPoint>) -> Self {
        Self { name, points }
    }
}
