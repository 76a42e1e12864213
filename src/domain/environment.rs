// Environmental reading domain models
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// A single environmental metric as delivered by a data source.
///
/// The live API sends raw numbers while the mock path sends values that are
/// already formatted for display, so both shapes are accepted here and
/// normalised in one place (`application::formatter::normalize_metric`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Metric {
    Raw(f64),
    Formatted(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Temperature,
    Humidity,
    Rainfall,
    SoilMoisture,
}

impl MetricKind {
    pub fn unit(&self) -> &'static str {
        match self {
            MetricKind::Temperature => "°C",
            MetricKind::Humidity => "%",
            MetricKind::Rainfall => "mm",
            MetricKind::SoilMoisture => "%",
        }
    }

    pub fn precision(&self) -> usize {
        match self {
            MetricKind::Temperature | MetricKind::Rainfall => 1,
            MetricKind::Humidity | MetricKind::SoilMoisture => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::Critical => "Critical",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            RiskLevel::Low => "#22c55e",
            RiskLevel::Medium => "#f59e0b",
            RiskLevel::High => "#f97316",
            RiskLevel::Critical => "#ef4444",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlightType {
    Healthy,
    #[serde(rename = "Early Blight", alias = "EarlyBlight")]
    EarlyBlight,
    #[serde(rename = "Late Blight", alias = "LateBlight")]
    LateBlight,
}

impl BlightType {
    pub fn label(&self) -> &'static str {
        match self {
            BlightType::Healthy => "Healthy",
            BlightType::EarlyBlight => "Early Blight",
            BlightType::LateBlight => "Late Blight",
        }
    }
}

/// Per-metric change against a prior period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricDeltas {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub temperature: Option<Metric>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub humidity: Option<Metric>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub rainfall: Option<Metric>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub soil_moisture: Option<Metric>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PercentageChanges {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub daily: Option<MetricDeltas>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub weekly: Option<MetricDeltas>,
}

/// Pre-formatted snapshot of the current conditions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentConditions {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub temperature: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub humidity: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub rainfall: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub soil_moisture: Option<String>,
}

/// One environmental reading. `cri` and `risk_level` are produced together
/// upstream and are never recomputed here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentalData {
    pub cri: f64,
    pub risk_level: RiskLevel,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub blight_type: Option<BlightType>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub temperature: Option<Metric>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub humidity: Option<Metric>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub rainfall: Option<Metric>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub soil_moisture: Option<Metric>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub percentage_changes: Option<PercentageChanges>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub current_conditions: Option<CurrentConditions>,
}

#[cfg(test)]
impl EnvironmentalData {
    pub fn new(cri: f64, risk_level: RiskLevel) -> Self {
        Self {
            cri,
            risk_level,
            blight_type: None,
            temperature: None,
            humidity: None,
            rainfall: None,
            soil_moisture: None,
            date: None,
            percentage_changes: None,
            current_conditions: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriPoint {
    pub date: String,
    pub value: f64,
}

impl CriPoint {
    pub fn new(date: impl Into<String>, value: f64) -> Self {
        Self {
            date: date.into(),
            value,
        }
    }
}

/// Chronological CRI samples, one per period. Gaps are left as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CriHistory {
    pub points: Vec<CriPoint>,
}

impl CriHistory {
    pub fn new(points: Vec<CriPoint>) -> Self {
        Self { points }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryWindow {
    Day,
    #[default]
    Week,
    Month,
}

impl HistoryWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryWindow::Day => "day",
            HistoryWindow::Week => "week",
            HistoryWindow::Month => "month",
        }
    }
}

/// Optional fields that fail to parse are treated as absent rather than
/// rejecting the whole record.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_metric_accepts_number_or_string() {
        let data: EnvironmentalData = serde_json::from_value(json!({
            "cri": 42.0,
            "riskLevel": "Medium",
            "temperature": 24.5,
            "humidity": "78%",
        }))
        .unwrap();

        assert_eq!(data.temperature, Some(Metric::Raw(24.5)));
        assert_eq!(data.humidity, Some(Metric::Formatted("78%".to_string())));
        assert_eq!(data.rainfall, None);
    }

    #[test]
    fn test_blight_type_wire_names() {
        let data: EnvironmentalData = serde_json::from_value(json!({
            "cri": 80,
            "riskLevel": "Critical",
            "blightType": "Late Blight",
        }))
        .unwrap();
        assert_eq!(data.blight_type, Some(BlightType::LateBlight));

        let data: EnvironmentalData = serde_json::from_value(json!({
            "cri": 50,
            "riskLevel": "High",
            "blightType": "EarlyBlight",
        }))
        .unwrap();
        assert_eq!(data.blight_type, Some(BlightType::EarlyBlight));
    }

    #[test]
    fn test_malformed_optional_fields_are_dropped() {
        let data: EnvironmentalData = serde_json::from_value(json!({
            "cri": 12,
            "riskLevel": "Low",
            "blightType": "Powdery Mildew",
            "temperature": {"unexpected": true},
            "percentageChanges": {"daily": {"temperature": 1.5, "humidity": [1]}},
            "currentConditions": null,
        }))
        .unwrap();

        assert_eq!(data.blight_type, None);
        assert_eq!(data.temperature, None);
        assert_eq!(data.current_conditions, None);
        let daily = data.percentage_changes.unwrap().daily.unwrap();
        assert_eq!(daily.temperature, Some(Metric::Raw(1.5)));
        assert_eq!(daily.humidity, None);
    }

    #[test]
    fn test_history_is_a_plain_array() {
        let history: CriHistory = serde_json::from_value(json!([
            {"date": "2024-01-01", "value": 10},
            {"date": "2024-01-02", "value": 20},
        ]))
        .unwrap();

        assert_eq!(
            history.points,
            vec![CriPoint::new("2024-01-01", 10.0), CriPoint::new("2024-01-02", 20.0)]
        );
    }

    #[test]
    fn test_history_window_names() {
        assert_eq!(HistoryWindow::default(), HistoryWindow::Week);
        assert_eq!(HistoryWindow::Month.as_str(), "month");
    }
}
