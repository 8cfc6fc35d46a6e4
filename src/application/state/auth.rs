//! Admin session lifecycle.
//!
//! ```text
//! Checking ──session ok──▶ Authenticated ──logout / 401──▶ Unauthenticated
//!    │                                                          ▲
//!    └──────────────no session / check failed───────────────────┘
//! ```
//!
//! Pages render only in `Authenticated`.

use crate::application::client::ApiError;
use crate::application::dto::SessionInfo;
use crate::application::services::AuthService;

use super::Reducer;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthPhase {
    #[default]
    Checking,
    Authenticated { username: Option<String> },
    Unauthenticated { reason: Option<String> },
}

#[derive(Debug, Clone, PartialEq)]
pub enum AuthAction {
    CheckStarted,
    SessionResolved(SessionInfo),
    CheckFailed(String),
    LoggedOut,
    /// Any request came back 401
    SessionExpired,
}

impl AuthPhase {
    pub fn can_render(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    pub fn is_checking(&self) -> bool {
        matches!(self, Self::Checking)
    }
}

impl Reducer for AuthPhase {
    type Action = AuthAction;

    fn reduce(&mut self, action: AuthAction) {
        *self = match action {
            AuthAction::CheckStarted => Self::Checking,
            AuthAction::SessionResolved(session) if session.authenticated => Self::Authenticated {
                username: session.username,
            },
            AuthAction::SessionResolved(_) => Self::Unauthenticated { reason: None },
            AuthAction::CheckFailed(reason) => Self::Unauthenticated {
                reason: Some(reason),
            },
            AuthAction::LoggedOut => Self::Unauthenticated { reason: None },
            AuthAction::SessionExpired => Self::Unauthenticated {
                reason: Some("Your session has expired. Please log in again.".into()),
            },
        };
    }
}

/// Run the session check against the backend and fold the result in.
pub async fn check_session(service: &dyn AuthService, phase: &mut AuthPhase) {
    phase.reduce(AuthAction::CheckStarted);
    let action = match service.session().await {
        Ok(session) => AuthAction::SessionResolved(session),
        Err(err) => AuthAction::CheckFailed(err.user_message()),
    };
    phase.reduce(action);
}

/// Log in and fold the resulting session in.
pub async fn login(
    service: &dyn AuthService,
    phase: &mut AuthPhase,
    password: &str,
) -> Result<(), ApiError> {
    let session = service.login(password).await?;
    phase.reduce(AuthAction::SessionResolved(session));
    Ok(())
}

/// Log out. The local session ends even if the backend call fails.
pub async fn logout(service: &dyn AuthService, phase: &mut AuthPhase) -> Result<(), ApiError> {
    let result = service.logout().await;
    phase.reduce(AuthAction::LoggedOut);
    result
}

/// Feed a request error in; a 401 ends the session.
pub fn observe_error(phase: &mut AuthPhase, err: &ApiError) {
    if err.is_unauthorized() {
        phase.reduce(AuthAction::SessionExpired);
    }
}
