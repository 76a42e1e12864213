// API diagnostics - Reachability of the endpoint families the dashboard uses

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

/// Endpoint families probed, one lightweight `GET` each.
pub const PROBED_ENDPOINTS: [&str; 3] = ["/user", "/environmental/latest", "/map/farm-locations"];

#[async_trait]
pub trait EndpointChecker: Send + Sync {
    /// Issue a `GET` against `path` and return the HTTP status code.
    async fn check(&self, path: &str) -> anyhow::Result<u16>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProbeStatus {
    Success,
    PartialSuccess,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EndpointReport {
    pub path: String,
    pub available: bool,
    pub status: Option<u16>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbeReport {
    pub timestamp: String,
    pub status: ProbeStatus,
    pub endpoints: Vec<EndpointReport>,
}

impl ProbeReport {
    pub fn available_count(&self) -> usize {
        self.endpoints.iter().filter(|e| e.available).count()
    }
}

pub fn classify(endpoints: &[EndpointReport]) -> ProbeStatus {
    let available = endpoints.iter().filter(|e| e.available).count();
    if available == endpoints.len() && !endpoints.is_empty() {
        ProbeStatus::Success
    } else if available > 0 {
        ProbeStatus::PartialSuccess
    } else {
        ProbeStatus::Failed
    }
}

#[derive(Clone)]
pub struct DiagnosticsService {
    checker: Arc<dyn EndpointChecker>,
}

impl DiagnosticsService {
    pub fn new(checker: Arc<dyn EndpointChecker>) -> Self {
        Self { checker }
    }

    /// Never fails; every problem is recorded in the report instead.
    pub async fn probe_api(&self) -> ProbeReport {
        let checks = PROBED_ENDPOINTS.iter().map(|path| self.check_endpoint(path));
        let endpoints = futures::future::join_all(checks).await;
        let report = ProbeReport {
            timestamp: Utc::now().to_rfc3339(),
            status: classify(&endpoints),
            endpoints,
        };

        match report.status {
            ProbeStatus::Success => tracing::info!("API probe: all endpoints available"),
            _ => tracing::warn!(
                "API probe: {}/{} endpoints available",
                report.available_count(),
                report.endpoints.len()
            ),
        }

        report
    }

    async fn check_endpoint(&self, path: &str) -> EndpointReport {
        match self.checker.check(path).await {
            Ok(code) => {
                let available = (200..300).contains(&code);
                tracing::debug!("Probe {} -> {}", path, code);
                EndpointReport {
                    path: path.to_string(),
                    available,
                    status: Some(code),
                    error: (!available).then(|| format!("HTTP {}", code)),
                }
            }
            Err(e) => {
                tracing::debug!("Probe {} failed: {:#}", path, e);
                EndpointReport {
                    path: path.to_string(),
                    available: false,
                    status: None,
                    error: Some(format!("{:#}", e)),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct FakeChecker {
        responses: HashMap<&'static str, Result<u16, &'static str>>,
    }

    #[async_trait]
    impl EndpointChecker for FakeChecker {
        async fn check(&self, path: &str) -> anyhow::Result<u16> {
            match self.responses.get(path) {
                Some(Ok(code)) => Ok(*code),
                Some(Err(message)) => Err(anyhow::anyhow!(*message)),
                None => Err(anyhow::anyhow!("no response configured")),
            }
        }
    }

    fn service(responses: &[(&'static str, Result<u16, &'static str>)]) -> DiagnosticsService {
        DiagnosticsService::new(Arc::new(FakeChecker {
            responses: responses.iter().cloned().collect(),
        }))
    }

    #[tokio::test]
    async fn test_all_endpoints_available() {
        let report = service(&[
            ("/user", Ok(200)),
            ("/environmental/latest", Ok(200)),
            ("/map/farm-locations", Ok(204)),
        ])
        .probe_api()
        .await;

        assert_eq!(report.status, ProbeStatus::Success);
        assert_eq!(report.available_count(), 3);
        let paths: Vec<&str> = report.endpoints.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, PROBED_ENDPOINTS.to_vec());
    }

    #[tokio::test]
    async fn test_partial_failure() {
        let report = service(&[
            ("/user", Ok(401)),
            ("/environmental/latest", Ok(200)),
            ("/map/farm-locations", Err("connection reset")),
        ])
        .probe_api()
        .await;

        assert_eq!(report.status, ProbeStatus::PartialSuccess);
        assert_eq!(report.endpoints[0].status, Some(401));
        assert_eq!(report.endpoints[0].error.as_deref(), Some("HTTP 401"));
        assert!(report.endpoints[1].available);
        assert_eq!(report.endpoints[2].status, None);
        assert_eq!(report.endpoints[2].error.as_deref(), Some("connection reset"));
    }

    #[tokio::test]
    async fn test_nothing_available() {
        let report = service(&[]).probe_api().await;
        assert_eq!(report.status, ProbeStatus::Failed);
        assert_eq!(report.available_count(), 0);
    }

    #[test]
    fn test_classify_empty_is_failed() {
        assert_eq!(classify(&[]), ProbeStatus::Failed);
    }
}
