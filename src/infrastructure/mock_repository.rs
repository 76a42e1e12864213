// Mock repository - Generated readings, history and farms for offline use

use crate::application::environmental_repository::EnvironmentalRepository;
use crate::domain::environment::{
    BlightType, CriHistory, CriPoint, CurrentConditions, EnvironmentalData, HistoryWindow, Metric,
    MetricDeltas, PercentageChanges, RiskLevel,
};
use crate::domain::farm::{FarmLocation, Farmer, Location};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

const FIRST_NAMES: [&str; 8] = [
    "Amina", "Brian", "Grace", "Joseph", "Mercy", "Peter", "Wanjiru", "Otieno",
];
const LAST_NAMES: [&str; 6] = ["Kamau", "Mwangi", "Njoroge", "Achieng", "Kiprono", "Mutua"];
const DISTRICTS: [&str; 5] = ["Kirinyaga", "Nyeri", "Murang'a", "Kiambu", "Meru"];

/// Region the generated farms are scattered around, in decimal degrees.
const CENTER: (f64, f64) = (-0.45, 37.2);
const SPREAD_DEG: f64 = 0.35;

struct Conditions {
    temperature: f64,
    humidity: f64,
    rainfall: f64,
    soil_moisture: f64,
}

pub struct MockRepository {
    rng: Mutex<StdRng>,
    farm_count: usize,
}

impl MockRepository {
    pub fn new(seed: Option<u64>, farm_count: usize) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        tracing::debug!("Creating MockRepository (seed: {:?}, farms: {})", seed, farm_count);
        Self {
            rng: Mutex::new(rng),
            farm_count,
        }
    }

    /// Banding used by the generator. Clients never re-derive this.
    pub fn risk_level_for(cri: f64) -> RiskLevel {
        if cri < 30.0 {
            RiskLevel::Low
        } else if cri < 60.0 {
            RiskLevel::Medium
        } else if cri < 80.0 {
            RiskLevel::High
        } else {
            RiskLevel::Critical
        }
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> Result<T> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| anyhow::anyhow!("mock generator lock poisoned"))?;
        Ok(f(&mut rng))
    }

    fn conditions(rng: &mut StdRng) -> Conditions {
        Conditions {
            temperature: rng.gen_range(14.0..32.0),
            humidity: rng.gen_range(45.0..98.0),
            rainfall: rng.gen_range(0.0..25.0),
            soil_moisture: rng.gen_range(20.0..80.0),
        }
    }

    /// Blight thrives in warm, wet, humid weather; late blight prefers it cooler.
    fn cri_for(c: &Conditions) -> f64 {
        let humidity = ((c.humidity - 50.0) / 45.0).clamp(0.0, 1.0) * 50.0;
        let temperature = if (15.0..=28.0).contains(&c.temperature) { 30.0 } else { 10.0 };
        let rainfall = (c.rainfall / 20.0).min(1.0) * 20.0;
        ((humidity + temperature + rainfall).clamp(0.0, 100.0) * 10.0).round() / 10.0
    }

    fn blight_for(risk: RiskLevel, temperature: f64) -> BlightType {
        match risk {
            RiskLevel::Low => BlightType::Healthy,
            RiskLevel::Medium if temperature > 24.0 => BlightType::EarlyBlight,
            RiskLevel::Medium => BlightType::Healthy,
            _ if temperature > 24.0 => BlightType::EarlyBlight,
            _ => BlightType::LateBlight,
        }
    }

    fn percent_change(current: f64, previous: f64) -> Metric {
        let change = if previous.abs() < f64::EPSILON {
            0.0
        } else {
            (current - previous) / previous * 100.0
        };
        Metric::Raw((change * 10.0).round() / 10.0)
    }

    fn deltas(current: &Conditions, previous: &Conditions) -> MetricDeltas {
        MetricDeltas {
            temperature: Some(Self::percent_change(current.temperature, previous.temperature)),
            humidity: Some(Self::percent_change(current.humidity, previous.humidity)),
            rainfall: Some(Self::percent_change(current.rainfall, previous.rainfall)),
            soil_moisture: Some(Self::percent_change(
                current.soil_moisture,
                previous.soil_moisture,
            )),
        }
    }

    /// Build the reading from raw numbers, then emit it pre-formatted the way
    /// the offline path delivers it.
    pub fn generate_reading(rng: &mut StdRng, at: DateTime<Utc>) -> EnvironmentalData {
        let current = Self::conditions(rng);
        let yesterday = Self::conditions(rng);
        let last_week = Self::conditions(rng);

        let cri = Self::cri_for(&current);
        let risk_level = Self::risk_level_for(cri);

        let raw = EnvironmentalData {
            cri,
            risk_level,
            blight_type: Some(Self::blight_for(risk_level, current.temperature)),
            temperature: Some(Metric::Raw(current.temperature)),
            humidity: Some(Metric::Raw(current.humidity)),
            rainfall: Some(Metric::Raw(current.rainfall)),
            soil_moisture: Some(Metric::Raw(current.soil_moisture)),
            date: Some(at.to_rfc3339()),
            percentage_changes: Some(PercentageChanges {
                daily: Some(Self::deltas(&current, &yesterday)),
                weekly: Some(Self::deltas(&current, &last_week)),
            }),
            current_conditions: None,
        };

        let mut reading = raw.normalized();
        reading.current_conditions = Some(CurrentConditions {
            temperature: Self::text(&reading.temperature),
            humidity: Self::text(&reading.humidity),
            rainfall: Self::text(&reading.rainfall),
            soil_moisture: Self::text(&reading.soil_moisture),
        });
        reading
    }

    fn text(metric: &Option<Metric>) -> Option<String> {
        match metric {
            Some(Metric::Formatted(text)) => Some(text.clone()),
            _ => None,
        }
    }

    /// One sample per period, oldest first, ending at `now`.
    pub fn generate_history(
        rng: &mut StdRng,
        window: HistoryWindow,
        now: DateTime<Utc>,
    ) -> CriHistory {
        let (count, step, format) = match window {
            HistoryWindow::Day => (24, Duration::hours(1), "%Y-%m-%dT%H:00:00Z"),
            HistoryWindow::Week => (7, Duration::days(1), "%Y-%m-%d"),
            HistoryWindow::Month => (30, Duration::days(1), "%Y-%m-%d"),
        };

        let points = (0..count)
            .rev()
            .map(|i| {
                let at = now - step * i;
                let value = Self::cri_for(&Self::conditions(rng));
                CriPoint::new(at.format(format).to_string(), value)
            })
            .collect();

        CriHistory::new(points)
    }

    pub fn generate_farms(rng: &mut StdRng, count: usize, now: DateTime<Utc>) -> Vec<FarmLocation> {
        (0..count)
            .map(|i| {
                let first_name = FIRST_NAMES.choose(rng).copied().unwrap_or("Farmer");
                let last_name = LAST_NAMES.choose(rng).copied().unwrap_or("Unknown");
                let district = DISTRICTS.choose(rng).copied().unwrap_or("Unknown");
                let latitude = CENTER.0 + rng.gen_range(-SPREAD_DEG..SPREAD_DEG);
                let longitude = CENTER.1 + rng.gen_range(-SPREAD_DEG..SPREAD_DEG);
                // Some farms have no sensors installed yet.
                let environmental_data = (i % 5 != 4).then(|| Self::generate_reading(rng, now));

                FarmLocation {
                    id: format!("farm-{}", i + 1),
                    farmer: Farmer {
                        first_name: first_name.to_string(),
                        last_name: last_name.to_string(),
                    },
                    location: Location {
                        latitude: (latitude * 1e5).round() / 1e5,
                        longitude: (longitude * 1e5).round() / 1e5,
                        district: Some(district.to_string()),
                        name: Some(format!("{} Farm {}", district, i + 1)),
                    },
                    is_self: i == 0,
                    environmental_data,
                }
            })
            .collect()
    }
}

#[async_trait]
impl EnvironmentalRepository for MockRepository {
    async fn fetch_latest(&self) -> Result<EnvironmentalData> {
        self.with_rng(|rng| Self::generate_reading(rng, Utc::now()))
    }

    async fn fetch_history(&self, window: HistoryWindow) -> Result<CriHistory> {
        self.with_rng(|rng| Self::generate_history(rng, window, Utc::now()))
    }

    async fn list_farm_locations(&self) -> Result<Vec<FarmLocation>> {
        let count = self.farm_count;
        self.with_rng(|rng| Self::generate_farms(rng, count, Utc::now()))
    }
}
