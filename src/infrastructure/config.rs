use crate::application::session::SessionContext;
use crate::domain::environment::HistoryWindow;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub api: ApiSettings,
    pub access: AccessSettings,
    pub mock: MockSettings,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerSettings {
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ApiSettings {
    pub base_url: String,
    pub token: Option<String>,
    /// No timeout unless set; a hung request keeps the dashboard loading.
    pub timeout_secs: Option<u64>,
    /// Serve generated data instead of calling the API.
    pub offline: bool,
    pub history_window: HistoryWindow,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/api".to_string(),
            token: None,
            timeout_secs: None,
            offline: false,
            history_window: HistoryWindow::Week,
        }
    }
}

impl ApiSettings {
    /// Offline mode or a configured token count as signed in.
    pub fn initial_session(&self) -> SessionContext {
        let has_token = self
            .token
            .as_deref()
            .map(|t| !t.trim().is_empty())
            .unwrap_or(false);

        SessionContext {
            is_authenticated: self.offline || has_token,
            loading: false,
            is_offline: self.offline,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AccessSettings {
    pub allow_unauthenticated_for: Vec<String>,
}

impl Default for AccessSettings {
    fn default() -> Self {
        Self {
            allow_unauthenticated_for: vec!["/healthz".to_string()],
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MockSettings {
    pub seed: Option<u64>,
    pub farm_count: usize,
}

impl Default for MockSettings {
    fn default() -> Self {
        Self {
            seed: None,
            farm_count: 12,
        }
    }
}

pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/app").required(false))
        .add_source(
            config::Environment::with_prefix("TOMATO")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("access.allow_unauthenticated_for")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> AppConfig {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse("");
        assert_eq!(config.server.bind, "0.0.0.0:8080");
        assert_eq!(config.api.history_window, HistoryWindow::Week);
        assert_eq!(config.api.timeout_secs, None);
        assert_eq!(config.access.allow_unauthenticated_for, vec!["/healthz".to_string()]);
        assert_eq!(config.mock.farm_count, 12);
    }

    #[test]
    fn test_overrides() {
        let config = parse(
            r#"
            [api]
            base_url = "https://tomato.example.com/api"
            token = "secret"
            timeout_secs = 15
            history_window = "month"

            [access]
            allow_unauthenticated_for = ["/healthz", "/admin/diagnostics/api"]
            "#,
        );

        assert_eq!(config.api.base_url, "https://tomato.example.com/api");
        assert_eq!(config.api.timeout_secs, Some(15));
        assert_eq!(config.api.history_window, HistoryWindow::Month);
        assert_eq!(config.access.allow_unauthenticated_for.len(), 2);
        assert!(config.api.initial_session().is_authenticated);
    }

    #[test]
    fn test_initial_session() {
        let mut api = ApiSettings::default();
        assert!(!api.initial_session().is_authenticated);

        api.token = Some("  ".to_string());
        assert!(!api.initial_session().is_authenticated);

        api.token = None;
        api.offline = true;
        let session = api.initial_session();
        assert!(session.is_authenticated);
        assert!(session.is_offline);
    }
}
