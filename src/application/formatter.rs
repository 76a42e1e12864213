// Formatter - Pure mapping from readings to UI-ready shapes
use crate::domain::display::{
    ChartPoint, ChartSeries, DisplayChanges, DisplayData, DisplayDeltas, RiskDisplay,
};
use crate::domain::environment::{
    CriHistory, EnvironmentalData, Metric, MetricDeltas, MetricKind, PercentageChanges,
};

pub const CRI_SERIES_NAME: &str = "CRI";

/// Render a metric for display. Raw numbers get the kind's precision and
/// unit; already formatted strings pass through unchanged.
pub fn normalize_metric(metric: &Metric, kind: MetricKind) -> String {
    match metric {
        Metric::Raw(value) => format!("{:.*}{}", kind.precision(), value, kind.unit()),
        Metric::Formatted(text) => text.clone(),
    }
}

/// Render a period-over-period change. Raw deltas are percentages with an
/// explicit sign.
pub fn normalize_delta(metric: &Metric) -> String {
    match metric {
        Metric::Raw(value) => format!("{:+.1}%", value),
        Metric::Formatted(text) => text.clone(),
    }
}

pub fn format_for_ui(data: &EnvironmentalData) -> DisplayData {
    let conditions = data.current_conditions.as_ref();

    DisplayData {
        cri: data.cri,
        risk: RiskDisplay::new(data.risk_level),
        blight_type: data.blight_type,
        blight_label: data.blight_type.map(|b| b.label()),
        temperature: display_metric(
            data.temperature.as_ref(),
            conditions.and_then(|c| c.temperature.as_deref()),
            MetricKind::Temperature,
        ),
        humidity: display_metric(
            data.humidity.as_ref(),
            conditions.and_then(|c| c.humidity.as_deref()),
            MetricKind::Humidity,
        ),
        rainfall: display_metric(
            data.rainfall.as_ref(),
            conditions.and_then(|c| c.rainfall.as_deref()),
            MetricKind::Rainfall,
        ),
        soil_moisture: display_metric(
            data.soil_moisture.as_ref(),
            conditions.and_then(|c| c.soil_moisture.as_deref()),
            MetricKind::SoilMoisture,
        ),
        date: data.date.clone(),
        changes: data.percentage_changes.as_ref().map(display_changes),
    }
}

pub fn format_history_for_chart(history: &CriHistory) -> ChartSeries {
    let points = history
        .points
        .iter()
        .map(|p| ChartPoint {
            label: p.date.clone(),
            value: p.value,
        })
        .collect();

    ChartSeries::new(CRI_SERIES_NAME.to_string(), points)
}

impl EnvironmentalData {
    /// Same reading with every raw metric replaced by its display string.
    pub fn normalized(&self) -> EnvironmentalData {
        let formatted = |metric: &Option<Metric>, kind: MetricKind| {
            metric
                .as_ref()
                .map(|m| Metric::Formatted(normalize_metric(m, kind)))
        };

        EnvironmentalData {
            temperature: formatted(&self.temperature, MetricKind::Temperature),
            humidity: formatted(&self.humidity, MetricKind::Humidity),
            rainfall: formatted(&self.rainfall, MetricKind::Rainfall),
            soil_moisture: formatted(&self.soil_moisture, MetricKind::SoilMoisture),
            percentage_changes: self.percentage_changes.as_ref().map(|changes| {
                PercentageChanges {
                    daily: changes.daily.as_ref().map(normalized_deltas),
                    weekly: changes.weekly.as_ref().map(normalized_deltas),
                }
            }),
            ..self.clone()
        }
    }
}

fn display_metric(
    metric: Option<&Metric>,
    fallback: Option<&str>,
    kind: MetricKind,
) -> Option<String> {
    match metric {
        Some(m) => Some(normalize_metric(m, kind)),
        None => fallback
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string),
    }
}

fn display_changes(changes: &PercentageChanges) -> DisplayChanges {
    DisplayChanges {
        daily: changes.daily.as_ref().map(display_deltas),
        weekly: changes.weekly.as_ref().map(display_deltas),
    }
}

fn display_deltas(deltas: &MetricDeltas) -> DisplayDeltas {
    DisplayDeltas {
        temperature: deltas.temperature.as_ref().map(normalize_delta),
        humidity: deltas.humidity.as_ref().map(normalize_delta),
        rainfall: deltas.rainfall.as_ref().map(normalize_delta),
        soil_moisture: deltas.soil_moisture.as_ref().map(normalize_delta),
    }
}

fn normalized_deltas(deltas: &MetricDeltas) -> MetricDeltas {
    let formatted = |m: &Option<Metric>| {
        m.as_ref()
            .map(|m| Metric::Formatted(normalize_delta(m)))
    };
    MetricDeltas {
        temperature: formatted(&deltas.temperature),
        humidity: formatted(&deltas.humidity),
        rainfall: formatted(&deltas.rainfall),
        soil_moisture: formatted(&deltas.soil_moisture),
    }
}
