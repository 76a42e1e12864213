// Farm service - Use case for the farm map
use crate::application::environmental_repository::EnvironmentalRepository;
use crate::domain::environment::RiskLevel;
use crate::domain::farm::FarmLocation;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskOverview {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub critical: usize,
    pub unknown: usize,
    pub own_farm_id: Option<String>,
}

impl RiskOverview {
    pub fn from_farms(farms: &[FarmLocation]) -> Self {
        let mut overview = Self::default();
        for farm in farms {
            match farm.environmental_data.as_ref().map(|d| d.risk_level) {
                Some(RiskLevel::Low) => overview.low += 1,
                Some(RiskLevel::Medium) => overview.medium += 1,
                Some(RiskLevel::High) => overview.high += 1,
                Some(RiskLevel::Critical) => overview.critical += 1,
                None => overview.unknown += 1,
            }
            if farm.is_self && overview.own_farm_id.is_none() {
                overview.own_farm_id = Some(farm.id.clone());
            }
        }
        overview
    }
}

/// A farm as shown on the map, with the label its marker carries.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmMarker {
    #[serde(flatten)]
    pub farm: FarmLocation,
    pub display_name: String,
}

impl From<FarmLocation> for FarmMarker {
    fn from(farm: FarmLocation) -> Self {
        let display_name = farm.display_name();
        Self { farm, display_name }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FarmMap {
    pub farms: Vec<FarmMarker>,
    pub overview: RiskOverview,
}

#[derive(Clone)]
pub struct FarmService {
    repository: Arc<dyn EnvironmentalRepository>,
}

impl FarmService {
    pub fn new(repository: Arc<dyn EnvironmentalRepository>) -> Self {
        Self { repository }
    }

    pub async fn farm_map(&self) -> anyhow::Result<FarmMap> {
        let farms = self.repository.list_farm_locations().await?;
        let overview = RiskOverview::from_farms(&farms);
        tracing::debug!("Loaded {} farm locations", farms.len());
        Ok(FarmMap {
            farms: farms.into_iter().map(FarmMarker::from).collect(),
            overview,
        })
    }
}
