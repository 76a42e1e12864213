// Repository trait for environmental data access
use crate::domain::environment::{CriHistory, EnvironmentalData, HistoryWindow};
use crate::domain::farm::FarmLocation;
use async_trait::async_trait;

#[async_trait]
pub trait EnvironmentalRepository: Send + Sync {
    /// Latest environmental reading for the signed-in farmer
    async fn fetch_latest(&self) -> anyhow::Result<EnvironmentalData>;

    /// CRI samples for the given window, oldest first
    async fn fetch_history(&self, window: HistoryWindow) -> anyhow::Result<CriHistory>;

    /// Farm locations for the map, including the caller's own farm
    async fn list_farm_locations(&self) -> anyhow::Result<Vec<FarmLocation>>;
}
