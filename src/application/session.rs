// Session context and route access policy
use serde::Serialize;
use std::collections::HashSet;
use std::sync::RwLock;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionContext {
    pub is_authenticated: bool,
    pub loading: bool,
    pub is_offline: bool,
}

/// Shared holder for the current session. Readers always get a copy.
#[derive(Debug, Default)]
pub struct Session {
    context: RwLock<SessionContext>,
}

impl Session {
    pub fn new(context: SessionContext) -> Self {
        Self {
            context: RwLock::new(context),
        }
    }

    pub fn snapshot(&self) -> SessionContext {
        match self.context.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessDenied {
    #[error("session is still being established")]
    SessionLoading,
    #[error("authentication required for {0}")]
    Unauthenticated(String),
}

/// Routes listed in `allow_unauthenticated_for` skip the session check.
#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    allow_unauthenticated_for: HashSet<String>,
}

impl AccessPolicy {
    pub fn new<I, S>(routes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allow_unauthenticated_for: routes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn check(&self, path: &str, session: &SessionContext) -> Result<(), AccessDenied> {
        if self.allow_unauthenticated_for.contains(path) {
            return Ok(());
        }
        if session.loading {
            return Err(AccessDenied::SessionLoading);
        }
        if !session.is_authenticated {
            return Err(AccessDenied::Unauthenticated(path.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIGNED_IN: SessionContext = SessionContext {
        is_authenticated: true,
        loading: false,
        is_offline: false,
    };

    #[test]
    fn test_allowed_route_skips_session() {
        let policy = AccessPolicy::new(["/healthz"]);
        assert_eq!(policy.check("/healthz", &SessionContext::default()), Ok(()));
    }

    #[test]
    fn test_unauthenticated_is_denied() {
        let policy = AccessPolicy::new(["/healthz"]);
        assert_eq!(
            policy.check("/dashboard", &SessionContext::default()),
            Err(AccessDenied::Unauthenticated("/dashboard".to_string()))
        );
        assert_eq!(policy.check("/dashboard", &SIGNED_IN), Ok(()));
    }

    #[test]
    fn test_loading_session_is_denied() {
        let policy = AccessPolicy::default();
        let loading = SessionContext {
            loading: true,
            ..SIGNED_IN
        };
        assert_eq!(policy.check("/farms", &loading), Err(AccessDenied::SessionLoading));
    }

    #[test]
    fn test_session_snapshot() {
        assert!(!Session::default().snapshot().is_authenticated);
        assert_eq!(Session::new(SIGNED_IN).snapshot(), SIGNED_IN);
    }
}
