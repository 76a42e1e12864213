// Environmental view-model - Fetch, hold and project the dashboard state
use crate::application::environmental_repository::EnvironmentalRepository;
use crate::application::formatter::{format_for_ui, format_history_for_chart};
use crate::application::notifier::Notifier;
use crate::application::session::Session;
use crate::domain::display::{ChartSeries, DisplayData};
use crate::domain::environment::{CriHistory, EnvironmentalData, HistoryWindow, RiskLevel};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

pub const LOAD_FAILURE_MESSAGE: &str = "Failed to load environmental data";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed,
}

/// Raw state slot. Each completed fetch replaces `latest` and `history`
/// with fresh snapshots; a failure keeps whatever was there before.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub phase: Phase,
    pub error: Option<String>,
    pub latest: Option<Arc<EnvironmentalData>>,
    pub history: Option<Arc<CriHistory>>,
}

/// What the dashboard renders. Always projected from a single `ViewState`,
/// so `cri_value` and `risk_level` agree with `environmental_data`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadModel {
    pub phase: Phase,
    pub loading: bool,
    pub error: Option<String>,
    pub environmental_data: Option<DisplayData>,
    pub cri_value: Option<f64>,
    pub cri_trend_data: Option<ChartSeries>,
    pub risk_level: Option<RiskLevel>,
}

impl ReadModel {
    pub fn project(state: &ViewState) -> Self {
        let latest = state.latest.as_deref();
        Self {
            phase: state.phase,
            loading: state.phase == Phase::Loading,
            error: state.error.clone(),
            environmental_data: latest.map(format_for_ui),
            cri_value: latest.map(|d| d.cri),
            cri_trend_data: state.history.as_deref().map(format_history_for_chart),
            risk_level: latest.map(|d| d.risk_level),
        }
    }
}

pub struct EnvironmentalViewModel {
    repository: Arc<dyn EnvironmentalRepository>,
    notifier: Arc<dyn Notifier>,
    session: Arc<Session>,
    window: HistoryWindow,
    state: watch::Sender<ViewState>,
    generation: AtomicU64,
    mounted: AtomicBool,
}

impl EnvironmentalViewModel {
    pub fn new(
        repository: Arc<dyn EnvironmentalRepository>,
        notifier: Arc<dyn Notifier>,
        session: Arc<Session>,
        window: HistoryWindow,
    ) -> Self {
        let (state, _) = watch::channel(ViewState::default());
        Self {
            repository,
            notifier,
            session,
            window,
            state,
            generation: AtomicU64::new(0),
            mounted: AtomicBool::new(false),
        }
    }

    /// Start accepting results and run the first refresh if signed in.
    pub async fn mount(&self) {
        self.mounted.store(true, Ordering::SeqCst);
        self.refresh().await;
    }

    /// Results that settle after this point are dropped.
    pub fn unmount(&self) {
        self.mounted.store(false, Ordering::SeqCst);
        tracing::debug!("Environmental view-model unmounted");
    }

    /// Run one fetch cycle: latest reading and CRI history, concurrently.
    ///
    /// Overlapping calls are not serialised. Each call takes a new
    /// generation and only the newest generation may write state, so a
    /// slow earlier cycle can never overwrite a newer result.
    pub async fn refresh(&self) {
        if !self.mounted.load(Ordering::SeqCst) {
            tracing::debug!("Ignoring refresh on unmounted view-model");
            return;
        }

        let session = self.session.snapshot();
        if session.loading || !session.is_authenticated {
            tracing::debug!("Skipping environmental refresh: session not authenticated");
            return;
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.apply(generation, |state| {
            state.phase = Phase::Loading;
            state.error = None;
        });

        let result = tokio::try_join!(
            self.repository.fetch_latest(),
            self.repository.fetch_history(self.window)
        );

        match result {
            Ok((latest, history)) => {
                let cri = latest.cri;
                let points = history.points.len();
                let applied = self.apply(generation, move |state| {
                    state.phase = Phase::Ready;
                    state.error = None;
                    state.latest = Some(Arc::new(latest));
                    state.history = Some(Arc::new(history));
                });

                if applied {
                    tracing::info!(
                        "Environmental data loaded: cri={}, history points={}",
                        cri,
                        points
                    );
                } else {
                    tracing::debug!(
                        "Dropping stale environmental result (generation {})",
                        generation
                    );
                }
            }
            Err(e) => {
                let applied = self.apply(generation, |state| {
                    state.phase = Phase::Failed;
                    state.error = Some(LOAD_FAILURE_MESSAGE.to_string());
                });

                if applied {
                    tracing::error!("Error fetching environmental data: {:#}", e);
                    self.notifier.notify(LOAD_FAILURE_MESSAGE);
                } else {
                    tracing::debug!(
                        "Dropping stale environmental failure (generation {}): {:#}",
                        generation,
                        e
                    );
                }
            }
        }
    }

    pub fn snapshot(&self) -> ReadModel {
        ReadModel::project(&self.state.borrow())
    }

    #[cfg(test)]
    pub fn phase(&self) -> Phase {
        self.state.borrow().phase
    }

    #[cfg(test)]
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    fn is_current(&self, generation: u64) -> bool {
        self.mounted.load(Ordering::SeqCst) && self.generation.load(Ordering::SeqCst) == generation
    }

    fn apply(&self, generation: u64, update: impl FnOnce(&mut ViewState)) -> bool {
        self.state.send_if_modified(|state| {
            if !self.is_current(generation) {
                return false;
            }
            update(state);
            true
        })
    }
}
